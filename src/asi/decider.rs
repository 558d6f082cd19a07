//! Terminator decision
//!
//!     [evaluate] runs the whole decision and returns a [Verdict] naming why it inserted or
//!     rejected; [decide] is the boolean a host scanner entry point returns.
//!
//!     The scan only moves forward and never allocates. It visits three phases in order:
//!     skipping whitespace up to a line break, classifying the first character after it,
//!     and, for words starting with `i`, matching the `in` / `instanceof` suffix.
//!
//!     The end of the synthesized token is marked before anything is consumed, so an
//!     inserted terminator is zero-width at the position the host asked about. Characters
//!     peeked afterwards are consumed as trivia whatever the outcome.

use std::fmt;

use super::cursor::Cursor;
use super::keyword::{match_binary_keyword, KeywordMatch};
use super::lookahead::{classify, is_line_break, Follow};
use super::token::{TokenKind, ValidSymbols};

/// Whether a terminator is synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decision {
    Insert,
    Reject,
}

/// Why the scanner decided what it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    /// The host does not accept an automatic terminator here.
    NotAccepted,
    /// Only whitespace remains.
    EndOfInput,
    /// A closing brace follows.
    ClosingBrace,
    /// A new included range starts here.
    RangeBoundary,
    /// Something other than whitespace appears before any line break.
    SameLine,
    /// The next line starts with punctuation that extends an expression.
    Continuation,
    /// The next line starts with `.` and a digit.
    DecimalLiteral,
    /// The next line starts with `.` and something else.
    MemberAccess,
    /// The next line starts with `++`.
    Increment,
    /// The next line starts with `--`.
    Decrement,
    /// The next line starts with a lone `+`.
    UnaryPlus,
    /// The next line starts with a lone `-`.
    UnaryMinus,
    /// The next line starts with `!=`.
    NotEqual,
    /// The next line starts with a lone `!`.
    LogicalNot,
    /// The next line starts with the `in` operator.
    InKeyword,
    /// The next line starts with the `instanceof` operator.
    InstanceofKeyword,
    /// The next line starts with a word that only looks like `in`.
    Identifier,
    /// The next line starts anything else.
    NewStatement,
}

impl Reason {
    pub fn decision(self) -> Decision {
        match self {
            Reason::NotAccepted
            | Reason::SameLine
            | Reason::Continuation
            | Reason::DecimalLiteral
            | Reason::Increment
            | Reason::Decrement
            | Reason::LogicalNot
            | Reason::InKeyword
            | Reason::InstanceofKeyword => Decision::Reject,
            Reason::EndOfInput
            | Reason::ClosingBrace
            | Reason::RangeBoundary
            | Reason::MemberAccess
            | Reason::UnaryPlus
            | Reason::UnaryMinus
            | Reason::NotEqual
            | Reason::Identifier
            | Reason::NewStatement => Decision::Insert,
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Reason::NotAccepted => "not accepted",
            Reason::EndOfInput => "end of input",
            Reason::ClosingBrace => "closing brace",
            Reason::RangeBoundary => "included range boundary",
            Reason::SameLine => "same line",
            Reason::Continuation => "continuation",
            Reason::DecimalLiteral => "decimal literal",
            Reason::MemberAccess => "member access",
            Reason::Increment => "increment",
            Reason::Decrement => "decrement",
            Reason::UnaryPlus => "unary plus",
            Reason::UnaryMinus => "unary minus",
            Reason::NotEqual => "not equal",
            Reason::LogicalNot => "logical not",
            Reason::InKeyword => "in keyword",
            Reason::InstanceofKeyword => "instanceof keyword",
            Reason::Identifier => "identifier",
            Reason::NewStatement => "new statement",
        };
        f.write_str(text)
    }
}

/// A decision together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Verdict {
    pub decision: Decision,
    pub reason: Reason,
}

impl Verdict {
    fn from_reason(reason: Reason) -> Self {
        Verdict {
            decision: reason.decision(),
            reason,
        }
    }

    pub fn is_insert(&self) -> bool {
        self.decision == Decision::Insert
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decision {
            Decision::Insert => write!(f, "insert ({})", self.reason),
            Decision::Reject => write!(f, "reject ({})", self.reason),
        }
    }
}

/// Decide whether to synthesize an automatic terminator at the cursor.
pub fn decide<C: Cursor>(cursor: &mut C, valid: ValidSymbols) -> bool {
    evaluate(cursor, valid).is_insert()
}

/// Decide whether to synthesize an automatic terminator, and say why.
pub fn evaluate<C: Cursor>(cursor: &mut C, valid: ValidSymbols) -> Verdict {
    if !valid.contains(TokenKind::AutomaticSemicolon) {
        return Verdict::from_reason(Reason::NotAccepted);
    }

    cursor.mark_end();
    let reason = match scan_to_line_break(cursor) {
        Some(reason) => reason,
        None => {
            cursor.skip();
            classify_next_line(cursor)
        }
    };

    log::trace!("automatic semicolon: {:?} ({})", reason.decision(), reason);
    Verdict::from_reason(reason)
}

/// Skip whitespace until the first line break. Returns `None` with the cursor on the break,
/// or the reason the scan ended early.
fn scan_to_line_break<C: Cursor>(cursor: &mut C) -> Option<Reason> {
    loop {
        let Some(c) = cursor.lookahead() else {
            return Some(Reason::EndOfInput);
        };
        if c == '}' {
            return Some(Reason::ClosingBrace);
        }
        if cursor.is_at_included_range_start() {
            return Some(Reason::RangeBoundary);
        }
        if is_line_break(c) {
            return None;
        }
        if !c.is_whitespace() {
            return Some(Reason::SameLine);
        }
        cursor.skip();
    }
}

/// Look at the start of the line after the break.
fn classify_next_line<C: Cursor>(cursor: &mut C) -> Reason {
    match classify(cursor.lookahead()) {
        Follow::NewStatement => Reason::NewStatement,
        Follow::Continues => Reason::Continuation,
        Follow::Dot => {
            cursor.skip();
            if cursor.lookahead().is_some_and(|c| c.is_ascii_digit()) {
                Reason::DecimalLiteral
            } else {
                Reason::MemberAccess
            }
        }
        Follow::Plus => {
            cursor.skip();
            if cursor.lookahead() == Some('+') {
                Reason::Increment
            } else {
                Reason::UnaryPlus
            }
        }
        Follow::Minus => {
            cursor.skip();
            if cursor.lookahead() == Some('-') {
                Reason::Decrement
            } else {
                Reason::UnaryMinus
            }
        }
        Follow::Bang => {
            cursor.skip();
            if cursor.lookahead() == Some('=') {
                Reason::NotEqual
            } else {
                Reason::LogicalNot
            }
        }
        Follow::KeywordStart => match match_binary_keyword(cursor) {
            KeywordMatch::In => Reason::InKeyword,
            KeywordMatch::Instanceof => Reason::InstanceofKeyword,
            KeywordMatch::Identifier => Reason::Identifier,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asi::cursor::SourceCursor;

    fn verdict(input: &str) -> Verdict {
        let mut cursor = SourceCursor::new(input);
        evaluate(&mut cursor, ValidSymbols::all())
    }

    #[test]
    fn test_not_accepted_leaves_cursor_untouched() {
        let mut cursor = SourceCursor::new("\nfoo");
        let verdict = evaluate(&mut cursor, ValidSymbols::empty());
        assert_eq!(verdict.reason, Reason::NotAccepted);
        assert!(!verdict.is_insert());
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.marked_end(), None);
    }

    #[test]
    fn test_insert_is_zero_width_before_whitespace() {
        let mut cursor = SourceCursor::new("   \n  foo");
        assert!(decide(&mut cursor, ValidSymbols::all()));
        assert_eq!(cursor.marked_end(), Some(0));
        assert_eq!(cursor.token_span(), 0..0);
        // Consumed up to and including the line break
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_early_exits() {
        assert_eq!(verdict("").reason, Reason::EndOfInput);
        assert_eq!(verdict(" \t ").reason, Reason::EndOfInput);
        assert_eq!(verdict("  }").reason, Reason::ClosingBrace);
        assert_eq!(verdict(" x").reason, Reason::SameLine);
        assert_eq!(verdict(" ;").reason, Reason::SameLine);
    }

    #[test]
    fn test_carriage_return_is_whitespace() {
        assert_eq!(verdict("\r\nfoo").reason, Reason::NewStatement);
    }

    #[test]
    fn test_unicode_line_breaks() {
        assert_eq!(verdict("\u{2028}foo").reason, Reason::NewStatement);
        assert_eq!(verdict("\u{2029}(x)").reason, Reason::Continuation);
    }

    #[test]
    fn test_range_boundary() {
        let source = "a  <%x%>b";
        let mut cursor = SourceCursor::with_included_ranges(source, &[0..3, 8..9]);
        cursor.seek(1);
        let verdict = evaluate(&mut cursor, ValidSymbols::all());
        assert_eq!(verdict.reason, Reason::RangeBoundary);
        assert!(verdict.is_insert());
    }

    #[test]
    fn test_break_then_end_of_input() {
        assert_eq!(verdict("\n").reason, Reason::NewStatement);
        assert_eq!(verdict("\n.").reason, Reason::MemberAccess);
        assert_eq!(verdict("\ni").reason, Reason::Identifier);
        assert_eq!(verdict("\nin").reason, Reason::InKeyword);
    }

    #[test]
    fn test_next_line_is_not_whitespace_skipped() {
        // Only the first character after the break is classified
        assert_eq!(verdict("\n  (x)").reason, Reason::NewStatement);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(verdict("\n++x").to_string(), "reject (increment)");
        assert_eq!(verdict("\n+x").to_string(), "insert (unary plus)");
    }
}
