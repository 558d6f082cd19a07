//! Scanner lifecycle
//!
//!     Hosts that load external scanners as plugins expect the same five entry points from
//!     every scanner: create, destroy, serialize, deserialize and scan. Serialization lets
//!     the host snapshot scanner state alongside its parse stack for incremental reparsing.
//!
//!     [AsiScanner] keeps nothing between calls. Its state is a zero-sized value, it
//!     serializes to zero bytes and ignores whatever it is asked to restore. The hooks exist
//!     for the host interface only.

use super::cursor::Cursor;
use super::decider::decide;
use super::token::ValidSymbols;

/// Size of the buffer hosts hand to [ExternalScanner::serialize].
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// The uniform interface a host drives an external scanner through.
pub trait ExternalScanner: Sized {
    fn create() -> Self;

    fn destroy(self) {}

    /// Write the scanner state into `buffer`, returning the number of bytes written.
    fn serialize(&self, buffer: &mut [u8]) -> usize;

    /// Restore state previously written by [ExternalScanner::serialize]. An empty slice
    /// means the initial state.
    fn deserialize(&mut self, bytes: &[u8]);

    /// Try to produce one of the host's external tokens at the cursor.
    fn scan<C: Cursor>(&mut self, cursor: &mut C, valid: ValidSymbols) -> bool;
}

/// The automatic semicolon scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsiScanner;

impl ExternalScanner for AsiScanner {
    fn create() -> Self {
        AsiScanner
    }

    fn serialize(&self, _buffer: &mut [u8]) -> usize {
        0
    }

    fn deserialize(&mut self, _bytes: &[u8]) {}

    fn scan<C: Cursor>(&mut self, cursor: &mut C, valid: ValidSymbols) -> bool {
        decide(cursor, valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asi::cursor::SourceCursor;

    #[test]
    fn test_state_is_zero_sized() {
        assert_eq!(std::mem::size_of::<AsiScanner>(), 0);
    }

    #[test]
    fn test_serialize_writes_nothing() {
        let scanner = AsiScanner::create();
        let mut buffer = [0xAAu8; SERIALIZATION_BUFFER_SIZE];
        assert_eq!(scanner.serialize(&mut buffer), 0);
        assert!(buffer.iter().all(|b| *b == 0xAA));
        scanner.destroy();
    }

    #[test]
    fn test_deserialize_ignores_input() {
        let mut scanner = AsiScanner::create();
        scanner.deserialize(&[1, 2, 3]);
        scanner.deserialize(&[]);
        assert_eq!(scanner, AsiScanner);
    }

    #[test]
    fn test_scan_delegates_to_decider() {
        let mut scanner = AsiScanner::create();
        let mut cursor = SourceCursor::new("\nfoo()");
        assert!(scanner.scan(&mut cursor, ValidSymbols::all()));

        let mut cursor = SourceCursor::new("\nfoo()");
        assert!(!scanner.scan(&mut cursor, ValidSymbols::empty()));
    }

    #[test]
    fn test_restored_scanner_decides_the_same() {
        let mut original = AsiScanner::create();
        let mut buffer = [0u8; SERIALIZATION_BUFFER_SIZE];
        let written = original.serialize(&mut buffer);

        let mut restored = AsiScanner::create();
        restored.deserialize(&buffer[..written]);

        for input in ["\n(x)", "\nfoo", " + 1", "\ninstanceof T"] {
            let a = original.scan(&mut SourceCursor::new(input), ValidSymbols::all());
            let b = restored.scan(&mut SourceCursor::new(input), ValidSymbols::all());
            assert_eq!(a, b, "input {input:?}");
        }
    }
}
