//! Testing utilities for scanner decisions
//!
//!     Scanner tests describe an input, run one decision over it and check the outcome. Use
//!     [assert_scan] rather than calling the decider and poking at the cursor by hand, so
//!     every test also checks the mark/consume invariants.
//!
//!     ```rust,ignore
//!     use asi_scanner::asi::testing::assert_scan;
//!     use asi_scanner::asi::Reason;
//!
//!     assert_scan("\n.5").rejects().because(Reason::DecimalLiteral);
//!     assert_scan("   \nfoo").inserts().token_at(0).consumed(4);
//!     ```
//!
//!     [RecordingCursor] wraps any cursor and counts what the scanner did with it, for tests
//!     that drive a cursor of their own.

use super::cursor::{Cursor, SourceCursor};
use super::decider::{evaluate, Decision, Reason, Verdict};
use super::token::ValidSymbols;

/// A cursor wrapper that counts the calls made through it.
#[derive(Debug)]
pub struct RecordingCursor<C> {
    inner: C,
    pub marks: usize,
    pub skips: usize,
    pub advances: usize,
}

impl<C: Cursor> RecordingCursor<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            marks: 0,
            skips: 0,
            advances: 0,
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Cursor> Cursor for RecordingCursor<C> {
    fn lookahead(&self) -> Option<char> {
        self.inner.lookahead()
    }

    fn advance(&mut self, skip: bool) {
        if skip {
            self.skips += 1;
        } else {
            self.advances += 1;
        }
        self.inner.advance(skip);
    }

    fn mark_end(&mut self) {
        self.marks += 1;
        self.inner.mark_end();
    }

    fn is_at_included_range_start(&self) -> bool {
        self.inner.is_at_included_range_start()
    }
}

/// Run one decision over `input`, with the automatic semicolon accepted, and return an
/// assertion handle.
pub fn assert_scan(input: &str) -> ScanAssertion<'_> {
    assert_scan_with(input, ValidSymbols::all())
}

/// Like [assert_scan] with an explicit accepted-kind set.
pub fn assert_scan_with(input: &str, valid: ValidSymbols) -> ScanAssertion<'_> {
    let mut cursor = RecordingCursor::new(SourceCursor::new(input));
    let verdict = evaluate(&mut cursor, valid);

    // The scanner only ever consumes trivia
    assert_eq!(cursor.advances, 0, "scanner consumed non-trivia in {input:?}");
    if verdict.is_insert() {
        assert_eq!(cursor.marks, 1, "insert without mark_end in {input:?}");
    }

    ScanAssertion {
        input,
        verdict,
        cursor: cursor.into_inner(),
    }
}

/// The outcome of one decision, with chainable checks.
pub struct ScanAssertion<'a> {
    input: &'a str,
    verdict: Verdict,
    cursor: SourceCursor<'a>,
}

impl<'a> ScanAssertion<'a> {
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn inserts(self) -> Self {
        assert_eq!(
            self.verdict.decision,
            Decision::Insert,
            "expected insert for {:?}, got {}",
            self.input,
            self.verdict
        );
        self
    }

    pub fn rejects(self) -> Self {
        assert_eq!(
            self.verdict.decision,
            Decision::Reject,
            "expected reject for {:?}, got {}",
            self.input,
            self.verdict
        );
        self
    }

    pub fn because(self, reason: Reason) -> Self {
        assert_eq!(
            self.verdict.reason, reason,
            "wrong reason for {:?}",
            self.input
        );
        self
    }

    /// The inserted token is zero-width at `offset`.
    pub fn token_at(self, offset: usize) -> Self {
        assert_eq!(
            self.cursor.token_span(),
            offset..offset,
            "wrong token span for {:?}",
            self.input
        );
        self
    }

    /// The scanner left the read position at byte `offset`.
    pub fn consumed(self, offset: usize) -> Self {
        assert_eq!(
            self.cursor.position(),
            offset,
            "wrong read position for {:?}",
            self.input
        );
        self
    }
}

/// Shorthand for the boolean decision over `input`.
pub fn decide_str(input: &str) -> bool {
    assert_scan(input).verdict().is_insert()
}
