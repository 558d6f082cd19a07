//! Property-based tests for the terminator decision
//!
//! These check the properties that hold for every input rather than specific cases:
//! - the decision is a pure function of the visible input
//! - without a line break, only end of input or a closing brace inserts
//! - an insert is always zero-width at the starting position
//! - the scanner never consumes anything as part of the token

use asi_scanner::asi::cursor::SourceCursor;
use asi_scanner::asi::testing::RecordingCursor;
use asi_scanner::asi::{decide, evaluate, AsiScanner, ExternalScanner, Reason, ValidSymbols};
use proptest::prelude::*;

/// Horizontal whitespace only, no line terminators
fn inline_whitespace_strategy() -> impl Strategy<Value = String> {
    "[ \t\r\u{000B}\u{000C}\u{00A0}]{0,6}"
}

/// Text that may start with anything, including line breaks and punctuation
fn source_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ \t\n]{0,3}[a-z.+!}(=-]{0,3}[a-z0-9 ]{0,6}",
        "[ \t]{0,3}\n(in|instanceof|index|instances|i)[ a-z]{0,3}",
        any::<String>(),
    ]
}

proptest! {
    #[test]
    fn test_decision_is_pure(source in source_strategy()) {
        let first = evaluate(&mut SourceCursor::new(&source), ValidSymbols::all());
        let second = evaluate(&mut SourceCursor::new(&source), ValidSymbols::all());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_same_line_text_rejects(
        ws in inline_whitespace_strategy(),
        word in "[a-zA-Z0-9(;=+*/.,\\[\"']{1,5}",
    ) {
        let source = format!("{ws}{word}");
        let verdict = evaluate(&mut SourceCursor::new(&source), ValidSymbols::all());
        prop_assert_eq!(verdict.reason, Reason::SameLine);
        prop_assert!(!verdict.is_insert());
    }

    #[test]
    fn test_end_of_input_or_brace_inserts(
        ws in inline_whitespace_strategy(),
        brace in proptest::bool::ANY,
        tail in "[a-z ;]{0,5}",
    ) {
        let source = if brace { format!("{ws}}}{tail}") } else { ws.clone() };
        let mut cursor = SourceCursor::new(&source);
        prop_assert!(decide(&mut cursor, ValidSymbols::all()));
        prop_assert_eq!(cursor.token_span(), 0..0);
        prop_assert_eq!(cursor.position(), ws.len());
    }

    #[test]
    fn test_insert_is_zero_width_and_marked(source in source_strategy()) {
        let mut cursor = RecordingCursor::new(SourceCursor::new(&source));
        let verdict = evaluate(&mut cursor, ValidSymbols::all());

        prop_assert_eq!(cursor.advances, 0);
        prop_assert_eq!(cursor.marks, 1);
        if verdict.is_insert() {
            prop_assert_eq!(cursor.inner().token_span(), 0..0);
        }
    }

    #[test]
    fn test_not_accepted_never_touches_cursor(source in source_strategy()) {
        let mut cursor = RecordingCursor::new(SourceCursor::new(&source));
        prop_assert!(!decide(&mut cursor, ValidSymbols::empty()));
        prop_assert_eq!(cursor.marks + cursor.skips + cursor.advances, 0);
    }

    #[test]
    fn test_lookahead_is_bounded(
        ws in inline_whitespace_strategy(),
        rest in "[a-z.+!=-]{0,20}",
    ) {
        // Whitespace, the break, and at most "instanceof" beyond it
        let source = format!("{ws}\n{rest}");
        let mut cursor = SourceCursor::new(&source);
        decide(&mut cursor, ValidSymbols::all());
        prop_assert!(cursor.position() <= ws.len() + 1 + "instanceof".len());
    }

    #[test]
    fn test_scanner_hooks_round_trip(
        source in source_strategy(),
        bytes in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        let mut scanner = AsiScanner::create();
        let mut buffer = [0u8; 16];
        prop_assert_eq!(scanner.serialize(&mut buffer), 0);
        scanner.deserialize(&bytes);

        let expected = decide(&mut SourceCursor::new(&source), ValidSymbols::all());
        let scanned = scanner.scan(&mut SourceCursor::new(&source), ValidSymbols::all());
        prop_assert_eq!(scanned, expected);
    }
}
