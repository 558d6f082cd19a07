//! `in` / `instanceof` matching
//!
//!     A line starting with `in` or `instanceof` continues the previous expression, since
//!     both are binary operators. A line starting with any longer identifier (`index`,
//!     `instances`, `inner`) begins a new statement. The matcher walks the fixed suffix one
//!     character at a time and stops at the first mismatch; it never buffers.

use super::cursor::Cursor;

const INSTANCEOF_SUFFIX: &str = "stanceof";

/// What the word at the start of the next line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMatch {
    /// The `in` operator.
    In,
    /// The `instanceof` operator.
    Instanceof,
    /// Some other word beginning with `i`.
    Identifier,
}

/// Match a binary keyword at the cursor, which must sit on the leading `i`.
///
/// Every character looked at is consumed as trivia.
pub fn match_binary_keyword<C: Cursor>(cursor: &mut C) -> KeywordMatch {
    debug_assert_eq!(cursor.lookahead(), Some('i'));
    cursor.skip();

    if cursor.lookahead() != Some('n') {
        return KeywordMatch::Identifier;
    }
    cursor.skip();

    if !continues_word(cursor.lookahead()) {
        return KeywordMatch::In;
    }

    for expected in INSTANCEOF_SUFFIX.chars() {
        if cursor.lookahead() != Some(expected) {
            return KeywordMatch::Identifier;
        }
        cursor.skip();
    }

    if continues_word(cursor.lookahead()) {
        KeywordMatch::Identifier
    } else {
        KeywordMatch::Instanceof
    }
}

/// Keywords end where alphabetic characters stop.
#[inline]
fn continues_word(c: Option<char>) -> bool {
    c.is_some_and(char::is_alphabetic)
}
