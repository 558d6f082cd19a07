//! Token definitions for the probe host
//!
//! Just enough of the host grammar's lexical structure to find where a parser would ask the
//! scanner for a terminator: trivia, comments, literals, words and the few punctuators that
//! can end a statement. Everything else is a single-character punctuator.
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProbeToken {
    // Whitespace other than line breaks
    #[regex(r"[\t\x{0B}\x{0C}\r \x{85}\x{A0}\x{1680}\x{2000}-\x{200A}\x{202F}\x{205F}\x{3000}]+")]
    Whitespace,

    #[regex(r"[\n\x{2028}\x{2029}]")]
    LineBreak,

    #[regex(r"//[^\n\x{2028}\x{2029}]*")]
    LineComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    CharLiteral,

    #[regex(r"`([^`\\]|\\.)*`")]
    TemplateLiteral,

    #[regex(r"[0-9][0-9a-zA-Z_.]*")]
    #[regex(r"\.[0-9][0-9a-zA-Z_]*")]
    Number,

    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*")]
    Word,

    #[token("++")]
    Increment,
    #[token("--")]
    Decrement,
    #[token(")")]
    CloseParen,
    #[token("]")]
    CloseBracket,
    #[token("}")]
    CloseBrace,

    // Any other single character; the closers above are excluded
    #[regex(r"[^\s\p{L}\p{N}_$)\]}]")]
    Punct,
}

/// Keywords after which a statement cannot end.
const OPEN_KEYWORDS: &[&str] = &[
    "and", "as", "case", "catch", "class", "construct", "delegate", "do", "else", "enhancement",
    "extends", "final", "finally", "for", "foreach", "function", "if", "implements", "in",
    "instanceof", "interface", "new", "not", "or", "override", "package", "private", "property",
    "protected", "public", "static", "switch", "throw", "try", "typeas", "typeis", "typeof", "uses",
    "using", "var", "while",
];

impl ProbeToken {
    pub fn is_trivia(&self) -> bool {
        matches!(self, ProbeToken::Whitespace | ProbeToken::LineBreak)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, ProbeToken::LineComment | ProbeToken::BlockComment)
    }

    /// Whether a statement may end right after this token. `text` is the token's source.
    pub fn can_end_statement(&self, text: &str) -> bool {
        match self {
            ProbeToken::StringLiteral
            | ProbeToken::CharLiteral
            | ProbeToken::TemplateLiteral
            | ProbeToken::Number
            | ProbeToken::Increment
            | ProbeToken::Decrement
            | ProbeToken::CloseParen
            | ProbeToken::CloseBracket
            | ProbeToken::CloseBrace => true,
            ProbeToken::Word => !OPEN_KEYWORDS.contains(&text),
            _ => false,
        }
    }
}

/// Tokenize source text with byte spans. Unrecognized bytes are dropped.
pub fn tokenize(source: &str) -> Vec<(ProbeToken, logos::Span)> {
    let mut lexer = ProbeToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}
