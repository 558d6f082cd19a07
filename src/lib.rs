//! # asi-scanner
//!
//! Automatic semicolon insertion for grammar-driven parsers.
//!
//! The crate is laid out around a single decision routine and the pieces a host needs to
//! drive it:
//!
//! src/asi
//!   ├── token      Token kinds and the accepted-kind set handed over by the host
//!   ├── cursor     The cursor capability the scanner reads through, plus a `&str` cursor
//!   ├── lookahead  Classification table for the character after a line break
//!   ├── keyword    The `in` / `instanceof` suffix matcher
//!   ├── decider    The terminator decision itself
//!   ├── scanner    Lifecycle hooks for hosts with a plugin-style scanner interface
//!   └── probe      A host simulation that reports every insertion in a source file
//!
//! For testing helpers, see the [testing module](asi::testing).

pub mod asi;
