//! Token kinds and the raw token produced by the scanner.

use std::fmt;

/// Kind of a jdsl token.
///
/// Discriminants are grouped: punctuation 1-8, keywords 16-18, and
/// value-carrying tokens 32-34.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // Punctuation
    Colon = 1,
    Comma = 2,
    LeftParen = 3,
    RightParen = 4,
    LeftBrace = 5,
    RightBrace = 6,
    LeftBracket = 7,
    RightBracket = 8,

    // Keywords
    Null = 16,
    False = 17,
    True = 18,

    // Value-carrying tokens
    Number = 32,
    Ident = 33,
    String = 34,
}

impl TokenKind {
    /// The fixed source text of this kind, if it has one.
    pub const fn lexeme(self) -> Option<&'static str> {
        match self {
            TokenKind::Colon => Some(":"),
            TokenKind::Comma => Some(","),
            TokenKind::LeftParen => Some("("),
            TokenKind::RightParen => Some(")"),
            TokenKind::LeftBrace => Some("{"),
            TokenKind::RightBrace => Some("}"),
            TokenKind::LeftBracket => Some("["),
            TokenKind::RightBracket => Some("]"),
            TokenKind::Null => Some("null"),
            TokenKind::False => Some("false"),
            TokenKind::True => Some("true"),
            TokenKind::Number | TokenKind::Ident | TokenKind::String => None,
        }
    }

    /// Resolve a reserved word. Returns `None` for ordinary identifiers.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        match text {
            "null" => Some(TokenKind::Null),
            "false" => Some(TokenKind::False),
            "true" => Some(TokenKind::True),
            _ => None,
        }
    }

    /// Whether a token of this kind can close a list (`)`, `]`, or `}`).
    pub const fn is_closing(self) -> bool {
        matches!(
            self,
            TokenKind::RightParen | TokenKind::RightBrace | TokenKind::RightBracket
        )
    }

    /// Human-readable name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
            TokenKind::LeftBracket => "`[`",
            TokenKind::RightBracket => "`]`",
            TokenKind::Null => "`null`",
            TokenKind::False => "`false`",
            TokenKind::True => "`true`",
            TokenKind::Number => "number",
            TokenKind::Ident => "identifier",
            TokenKind::String => "string",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token as a `(kind, offset, len)` triple into the scanned slice.
///
/// The scanner never copies token text; callers slice their own buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawToken {
    pub tag: TokenKind,
    pub offset: usize,
    pub len: usize,
}

impl RawToken {
    /// Offset one past the last byte of the token.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}
