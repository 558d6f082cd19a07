//! External token kinds and the accepted-kind set
//!
//!     The host grammar declares which tokens it expects an external scanner to produce. This
//!     scanner produces exactly one, the zero-width automatic semicolon. At every call the
//!     host says which of those kinds are valid at the current parse state; the scanner
//!     checks membership before touching the cursor.

use std::fmt;

/// Tokens this scanner can produce, in the order the host grammar declares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum TokenKind {
    AutomaticSemicolon = 0,
}

impl TokenKind {
    /// All kinds, indexed by their declaration order.
    pub const ALL: [TokenKind; 1] = [TokenKind::AutomaticSemicolon];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::AutomaticSemicolon => write!(f, "automatic semicolon"),
        }
    }
}

/// The set of token kinds the host accepts at the current position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValidSymbols(u32);

impl ValidSymbols {
    pub const fn empty() -> Self {
        ValidSymbols(0)
    }

    pub const fn all() -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < TokenKind::ALL.len() {
            bits |= TokenKind::ALL[i].bit();
            i += 1;
        }
        ValidSymbols(bits)
    }

    /// Build the set from a host's per-kind flag array (`valid_symbols[kind]`).
    ///
    /// Flags past the last known kind are ignored; missing flags count as `false`.
    pub fn from_flags(flags: &[bool]) -> Self {
        TokenKind::ALL
            .iter()
            .filter(|kind| flags.get(kind.index()).copied().unwrap_or(false))
            .fold(Self::empty(), |set, kind| set.with(*kind))
    }

    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        ValidSymbols(self.0 | kind.bit())
    }

    #[must_use]
    pub const fn without(self, kind: TokenKind) -> Self {
        ValidSymbols(self.0 & !kind.bit())
    }

    #[inline]
    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<TokenKind> for ValidSymbols {
    fn from(kind: TokenKind) -> Self {
        ValidSymbols::empty().with(kind)
    }
}
