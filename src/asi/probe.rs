//! Probe
//!
//!     The probe plays the part of a host parser over a whole source file. It tokenizes the
//!     file with a small logos lexer (see [tokens]), and after every significant token and
//!     every comment asks the scanner whether a terminator goes there. The accepted-kind set
//!     it passes mirrors what a parser would: the automatic semicolon is only accepted after
//!     a token that can end a statement.
//!
//!     Comments count as sites because a parser treats them as extras: after `foo() // x`
//!     the scanner is asked once after `)`, where it sees the comment and rejects, and once
//!     after the comment, where it sees the line break.
//!
//! Site Modes
//!
//!     - token-end: every candidate is checked.
//!     - line-end: only candidates whose remaining line is blank are checked. Insertions
//!       before a closing brace on the same line are not reported in this mode.
//!
//!     Insertions at the same offset are reported once.

pub mod tokens;

use std::fmt::Write as _;
use std::ops::Range;

use asi_config::SiteMode;
use serde::Serialize;

use self::tokens::tokenize;
use super::cursor::SourceCursor;
use super::decider::{evaluate, Reason};
use super::error::ProbeError;
use super::lookahead::is_line_break;
use super::token::{TokenKind, ValidSymbols};

/// How the probe walks a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    pub sites: SiteMode,
    /// Byte ranges the host considers part of the document. `None` means the whole file;
    /// an empty list means nothing is visible.
    pub included_ranges: Option<Vec<Range<usize>>>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            sites: SiteMode::TokenEnd,
            included_ranges: None,
        }
    }
}

/// A synthesized terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Insertion {
    /// Byte offset of the zero-width token.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    pub reason: Reason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// Number of times the scanner was asked.
    pub sites_checked: usize,
    pub insertions: Vec<Insertion>,
}

impl ProbeReport {
    pub fn to_json(&self) -> Result<String, ProbeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One line per insertion: `line:column reason`. With `show_context`, each is followed by
    /// the source line and a caret under the insertion point.
    pub fn render_text(&self, source: &str, show_context: bool) -> String {
        let index = LineIndex::new(source);
        let mut out = String::new();
        for insertion in &self.insertions {
            let _ = writeln!(out, "{}:{} {}", insertion.line, insertion.column, insertion.reason);
            if show_context {
                let text = index.line_text(source, insertion.line);
                let _ = writeln!(out, "    {}", text);
                let _ = writeln!(out, "    {}^", " ".repeat(insertion.column - 1));
            }
        }
        out
    }
}

/// Run the scanner over every candidate site in `source`.
pub fn probe(source: &str, options: &ProbeOptions) -> ProbeReport {
    let tokens = tokenize(source);
    let index = LineIndex::new(source);
    let mut cursor = match &options.included_ranges {
        Some(ranges) => SourceCursor::with_included_ranges(source, ranges),
        None => SourceCursor::new(source),
    };
    log::debug!(
        "probing {} tokens in {} bytes ({} sites)",
        tokens.len(),
        source.len(),
        options.sites
    );

    let mut report = ProbeReport::default();
    let mut statement_can_end = false;

    for (token, span) in tokens {
        if token.is_trivia() || !is_visible(&cursor, span.end) {
            continue;
        }
        if !token.is_comment() {
            statement_can_end = token.can_end_statement(&source[span.clone()]);
        }

        let offset = span.end;
        if options.sites == SiteMode::LineEnd && !rest_of_line_is_blank(source, offset) {
            continue;
        }

        let valid = if statement_can_end {
            ValidSymbols::from(TokenKind::AutomaticSemicolon)
        } else {
            ValidSymbols::empty()
        };

        cursor.seek(offset);
        let verdict = evaluate(&mut cursor, valid);
        report.sites_checked += 1;
        if !verdict.is_insert() {
            continue;
        }

        let at = cursor.marked_end().unwrap_or(offset);
        if report.insertions.last().is_some_and(|last| last.offset == at) {
            continue;
        }
        let (line, column) = index.line_column(source, at);
        log::debug!("insertion at {}:{} ({})", line, column, verdict.reason);
        report.insertions.push(Insertion {
            offset: at,
            line,
            column,
            reason: verdict.reason,
        });
    }

    report
}

/// Parse an included range written as `START..END`.
pub fn parse_included_range(text: &str) -> Result<Range<usize>, ProbeError> {
    let invalid = || ProbeError::InvalidRange(text.to_string());
    let (start, end) = text.split_once("..").ok_or_else(invalid)?;
    let start: usize = start.trim().parse().map_err(|_| invalid())?;
    let end: usize = end.trim().parse().map_err(|_| invalid())?;
    if start > end {
        return Err(invalid());
    }
    Ok(start..end)
}

/// Sites at the very end of an included range are still visible: the scanner sees the
/// boundary there.
fn is_visible(cursor: &SourceCursor<'_>, offset: usize) -> bool {
    !cursor.is_restricted()
        || cursor
            .included_ranges()
            .iter()
            .any(|r| r.start < offset && offset <= r.end)
}

fn rest_of_line_is_blank(source: &str, offset: usize) -> bool {
    source[offset..]
        .chars()
        .take_while(|c| !is_line_break(*c))
        .all(char::is_whitespace)
}

/// Byte offsets of line starts, for turning offsets into line/column pairs.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .char_indices()
                .filter(|(_, c)| is_line_break(*c))
                .map(|(i, c)| i + c.len_utf8()),
        );
        Self { starts }
    }

    fn line_column(&self, source: &str, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|start| *start <= offset);
        let start = self.starts[line - 1];
        let column = source[start..offset].chars().count() + 1;
        (line, column)
    }

    fn line_text<'s>(&self, source: &'s str, line: usize) -> &'s str {
        let start = self.starts[line - 1];
        let end = source[start..]
            .char_indices()
            .find(|(_, c)| is_line_break(*c))
            .map_or(source.len(), |(i, _)| start + i);
        &source[start..end]
    }
}
