//! Automatic Semicolon Insertion
//!
//!     A host parser asks, at every position where a statement terminator is allowed but not
//!     present, whether one should be synthesized. The answer depends only on the characters
//!     visible from the cursor, so the scanner keeps no state between calls.
//!
//! Decision Flow
//!
//!     1. The host passes a cursor and the set of token kinds it currently accepts. Nothing
//!        happens unless the automatic terminator is in that set.
//!     2. Whitespace is skipped up to the first line break. End of input, a closing brace or
//!        the start of an included range insert right away; any other character on the same
//!        line rejects.
//!     3. The line break is consumed and the next character is classified. Punctuation that
//!        can only continue an expression rejects, as do the binary keywords `in` and
//!        `instanceof`. Everything else inserts.
//!
//!     The synthesized token is zero-width and sits where the cursor was when the host asked,
//!     before any whitespace or the line break.
//!
//! Hosts
//!
//!     [cursor::SourceCursor] is a cursor over a `&str` with optional included ranges, and
//!     [probe] walks a whole file with it the way a parser would.

pub mod cursor;
pub mod decider;
pub mod error;
pub mod keyword;
pub mod lookahead;
pub mod probe;
pub mod scanner;
pub mod testing;
pub mod token;

pub use cursor::{Cursor, SourceCursor};
pub use decider::{decide, evaluate, Decision, Reason, Verdict};
pub use error::ProbeError;
pub use scanner::{AsiScanner, ExternalScanner};
pub use token::{TokenKind, ValidSymbols};
