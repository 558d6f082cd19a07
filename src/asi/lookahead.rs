//! Classification of the character after a line break
//!
//!     Once the scanner has crossed a line break it looks at exactly one character to guess
//!     whether the next line continues the current statement. The guess is a constant table
//!     over ASCII; anything outside ASCII starts a new statement.
//!
//!     Some entries only settle the question after one more character (`.`, `+`, `-`, `!`)
//!     or after a keyword suffix (`i`). Those are returned as [Follow] variants for the
//!     decider to resolve.

/// What the first character of the next line says about the current statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Follow {
    /// The next line starts a new statement.
    NewStatement,
    /// Punctuation that can only extend the previous expression.
    Continues,
    /// `.`: a decimal literal if a digit follows, member access otherwise.
    Dot,
    /// `+`: `++` continues, a lone `+` starts a new statement.
    Plus,
    /// `-`: `--` continues, a lone `-` starts a new statement.
    Minus,
    /// `!`: `!=` starts a new statement, a lone `!` continues.
    Bang,
    /// `i`: may begin the binary keywords `in` or `instanceof`.
    KeywordStart,
}

const CONTINUATION_CHARS: &[u8] = b"`,:;*%><=[(?^|&/";

const fn build_table() -> [Follow; 128] {
    let mut table = [Follow::NewStatement; 128];
    let mut i = 0;
    while i < CONTINUATION_CHARS.len() {
        table[CONTINUATION_CHARS[i] as usize] = Follow::Continues;
        i += 1;
    }
    table[b'.' as usize] = Follow::Dot;
    table[b'+' as usize] = Follow::Plus;
    table[b'-' as usize] = Follow::Minus;
    table[b'!' as usize] = Follow::Bang;
    table[b'i' as usize] = Follow::KeywordStart;
    table
}

static FOLLOW_TABLE: [Follow; 128] = build_table();

/// Classify the first character of the line after a break. End of input starts nothing and
/// so ends the statement.
#[inline]
pub fn classify(c: Option<char>) -> Follow {
    match c {
        Some(c) if c.is_ascii() => FOLLOW_TABLE[c as usize],
        _ => Follow::NewStatement,
    }
}

/// Line terminators that make a statement eligible for insertion.
#[inline]
pub fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\u{2028}' | '\u{2029}')
}
