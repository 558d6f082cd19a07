//! Cursor capability
//!
//!     The scanner never sees the host's buffer. It reads one code point at a time through
//!     [Cursor], which mirrors what a tree-sitter style lexer hands to an external scanner:
//!     the current lookahead, a way to step over it (optionally as trivia), a way to mark
//!     where the produced token ends, and whether an included range starts here.
//!
//!     The mark is independent of the read position. The scanner marks first and then peeks
//!     ahead, so the token it reports can end before characters it has already looked at.
//!
//! SourceCursor
//!
//!     [SourceCursor] implements the capability over a `&str` with byte offsets. It may be
//!     restricted to a list of included ranges; bytes outside them are invisible and
//!     advancing past the end of one range lands on the start of the next.

use std::ops::Range;

/// The read-only-forward view of the input a scanner works through.
pub trait Cursor {
    /// The current code point, or `None` at end of input.
    fn lookahead(&self) -> Option<char>;

    /// Step over the current code point. With `skip` set it is trivia and does not become
    /// part of the token.
    fn advance(&mut self, skip: bool);

    /// Record the current position as the end of the token being produced.
    fn mark_end(&mut self);

    /// Whether the cursor sits at the start of a new included range.
    fn is_at_included_range_start(&self) -> bool;

    /// Step over the current code point as trivia.
    #[inline]
    fn skip(&mut self) {
        self.advance(true);
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn lookahead(&self) -> Option<char> {
        (**self).lookahead()
    }

    fn advance(&mut self, skip: bool) {
        (**self).advance(skip)
    }

    fn mark_end(&mut self) {
        (**self).mark_end()
    }

    fn is_at_included_range_start(&self) -> bool {
        (**self).is_at_included_range_start()
    }
}

/// A [Cursor] over source text.
#[derive(Debug, Clone)]
pub struct SourceCursor<'a> {
    source: &'a str,
    ranges: Vec<Range<usize>>,
    /// Set when the cursor was built from included ranges, even if none survived.
    restricted: bool,
    range_index: usize,
    position: usize,
    token_start: usize,
    token_end: Option<usize>,
}

impl<'a> SourceCursor<'a> {
    /// A cursor over the whole source, positioned at its start.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            ranges: Vec::new(),
            restricted: false,
            range_index: 0,
            position: 0,
            token_start: 0,
            token_end: None,
        }
    }

    /// A cursor that only sees the given byte ranges.
    ///
    /// Ranges are clamped to the source and widened to whole code points. Empty ones are
    /// dropped, the rest are sorted and overlapping ranges are merged. The cursor starts at
    /// the first range; if no range is left, nothing is visible.
    pub fn with_included_ranges(source: &'a str, ranges: &[Range<usize>]) -> Self {
        let mut clamped: Vec<Range<usize>> = ranges
            .iter()
            .map(|r| floor_char_boundary(source, r.start)..ceil_char_boundary(source, r.end))
            .filter(|r| r.start < r.end)
            .collect();
        clamped.sort_by_key(|r| r.start);

        let mut merged: Vec<Range<usize>> = Vec::with_capacity(clamped.len());
        for range in clamped {
            match merged.last_mut() {
                Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
                _ => merged.push(range),
            }
        }

        let start = merged.first().map_or(source.len(), |r| r.start);
        let mut cursor = Self {
            source,
            ranges: merged,
            restricted: true,
            range_index: 0,
            position: 0,
            token_start: 0,
            token_end: None,
        };
        cursor.reset_at(start);
        cursor
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn included_ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Whether only [Self::included_ranges] are visible. A restricted cursor with no ranges
    /// sees nothing.
    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    /// Current read position as a byte offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The position recorded by the last [Cursor::mark_end], if any.
    pub fn marked_end(&self) -> Option<usize> {
        self.token_end
    }

    /// The span of the token produced since the last seek: from the first non-trivia
    /// position to the marked end (or the read position if nothing was marked).
    pub fn token_span(&self) -> Range<usize> {
        let end = self.token_end.unwrap_or(self.position);
        self.token_start.min(end)..end
    }

    /// Reposition the cursor for a new scan. Offsets outside every included range move
    /// forward to the next visible byte; offsets inside a code point move to its start.
    pub fn seek(&mut self, offset: usize) {
        self.reset_at(floor_char_boundary(self.source, offset));
    }

    fn reset_at(&mut self, offset: usize) {
        self.position = offset;
        self.range_index = 0;
        if self.restricted {
            match self.ranges.iter().position(|r| offset < r.end) {
                Some(index) => {
                    self.range_index = index;
                    self.position = offset.max(self.ranges[index].start);
                }
                None => {
                    self.range_index = self.ranges.len();
                    self.position = self.source.len();
                }
            }
        }
        self.token_start = self.position;
        self.token_end = None;
    }

    /// End of the visible text for the current range.
    fn visible_end(&self) -> usize {
        if !self.restricted {
            self.source.len()
        } else {
            self.ranges
                .get(self.range_index)
                .map_or(self.source.len(), |r| r.end)
        }
    }
}

fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn ceil_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset += 1;
    }
    offset
}

impl Cursor for SourceCursor<'_> {
    fn lookahead(&self) -> Option<char> {
        if self.position >= self.visible_end() {
            return None;
        }
        self.source[self.position..].chars().next()
    }

    fn advance(&mut self, skip: bool) {
        let Some(c) = self.lookahead() else {
            return;
        };
        self.position += c.len_utf8();

        if self.restricted && self.position >= self.visible_end() {
            self.range_index += 1;
            self.position = self
                .ranges
                .get(self.range_index)
                .map_or(self.source.len(), |r| r.start);
        }

        if skip {
            self.token_start = self.position;
        }
    }

    fn mark_end(&mut self) {
        self.token_end = Some(self.position);
    }

    fn is_at_included_range_start(&self) -> bool {
        self.range_index > 0
            && self
                .ranges
                .get(self.range_index)
                .is_some_and(|r| r.start == self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_code_points() {
        let mut cursor = SourceCursor::new("a\u{2028}b");
        assert_eq!(cursor.lookahead(), Some('a'));
        cursor.advance(false);
        assert_eq!(cursor.lookahead(), Some('\u{2028}'));
        cursor.advance(false);
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.lookahead(), Some('b'));
        cursor.advance(false);
        assert_eq!(cursor.lookahead(), None);
        // Advancing at end of input is a no-op
        cursor.advance(false);
        assert_eq!(cursor.position(), 5);
    }

    #[test]
    fn test_mark_end_is_independent_of_position() {
        let mut cursor = SourceCursor::new("ab");
        cursor.advance(false);
        cursor.mark_end();
        cursor.advance(false);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.marked_end(), Some(1));
        assert_eq!(cursor.token_span(), 0..1);
    }

    #[test]
    fn test_skip_moves_token_start() {
        let mut cursor = SourceCursor::new("  x");
        cursor.skip();
        cursor.skip();
        cursor.advance(false);
        cursor.mark_end();
        assert_eq!(cursor.token_span(), 2..3);
    }

    #[test]
    fn test_seek_resets_token() {
        let mut cursor = SourceCursor::new("hello");
        cursor.advance(false);
        cursor.mark_end();
        cursor.seek(3);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.marked_end(), None);
        assert_eq!(cursor.token_span(), 3..3);
    }

    #[test]
    fn test_seek_snaps_to_char_boundary() {
        let mut cursor = SourceCursor::new("é!");
        cursor.seek(1);
        assert_eq!(cursor.position(), 0);
        cursor.seek(100);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_no_ranges_never_reports_range_start() {
        let cursor = SourceCursor::new("abc");
        assert!(!cursor.is_at_included_range_start());
    }

    #[test]
    fn test_included_ranges_jump_over_hidden_text() {
        let source = "ab<%HIDDEN%>cd";
        let mut cursor = SourceCursor::with_included_ranges(source, &[0..2, 12..14]);
        assert!(!cursor.is_at_included_range_start());
        cursor.advance(false);
        cursor.advance(false);
        assert_eq!(cursor.position(), 12);
        assert_eq!(cursor.lookahead(), Some('c'));
        assert!(cursor.is_at_included_range_start());
        cursor.advance(false);
        assert!(!cursor.is_at_included_range_start());
        cursor.advance(false);
        assert_eq!(cursor.lookahead(), None);
    }

    #[test]
    fn test_included_ranges_are_normalized() {
        let cursor = SourceCursor::with_included_ranges("0123456789", &[6..20, 0..3, 2..4, 5..5]);
        assert_eq!(cursor.included_ranges(), &[0..4, 6..10]);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_range_bounds_snap_to_code_points() {
        // "é" occupies bytes 3..5; both bounds below fall inside it
        let source = "ab\néx";
        let mut cursor = SourceCursor::with_included_ranges(source, &[0..2, 4..6]);
        assert_eq!(cursor.included_ranges(), &[0..2, 3..6]);
        cursor.advance(false);
        cursor.advance(false);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.lookahead(), Some('é'));

        let cursor = SourceCursor::with_included_ranges(source, &[0..4]);
        assert_eq!(cursor.included_ranges(), &[0..5]);
    }

    #[test]
    fn test_only_empty_ranges_hide_everything() {
        let mut cursor = SourceCursor::with_included_ranges("abc", &[0..0, 2..2]);
        assert!(cursor.is_restricted());
        assert!(cursor.included_ranges().is_empty());
        assert_eq!(cursor.lookahead(), None);
        assert_eq!(cursor.position(), 3);
        cursor.seek(0);
        assert_eq!(cursor.lookahead(), None);
        assert!(!cursor.is_at_included_range_start());
        assert!(!SourceCursor::new("abc").is_restricted());
    }

    #[test]
    fn test_seek_outside_ranges_moves_to_next_range() {
        let mut cursor = SourceCursor::with_included_ranges("0123456789", &[0..2, 5..7]);
        cursor.seek(3);
        assert_eq!(cursor.position(), 5);
        assert!(cursor.is_at_included_range_start());
        cursor.seek(8);
        assert_eq!(cursor.lookahead(), None);
    }
}
