//! Token source for jdsl.
//!
//! Two layers sit on top of the raw scanner in `jdsl_lexer_core`:
//!
//! - [`Tokenizer`] drives the scanner over any [`std::io::Read`], growing
//!   its buffer when a token straddles a read boundary, and yields owned
//!   [`Token`]s with absolute byte positions.
//! - [`TokenStream`] adds bounded lookahead (`peek(n)`, `discard(n)`,
//!   `read_one()`) over any token iterator. The decoder is written against
//!   this layer only.

mod stream;
mod tokenizer;

use std::fmt;

pub use jdsl_lexer_core::{ScanErrorKind, TokenKind};
pub use stream::{StreamError, TokenStream};
pub use tokenizer::{tokenize, Tokenizer, TokenizerConfig};

use thiserror::Error;

/// Absolute byte offset into the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(pub usize);

impl Pos {
    /// Position `n` bytes further on.
    #[inline]
    #[must_use]
    pub fn offset_by(self, n: usize) -> Pos {
        Pos(self.0 + n)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}", self.0)
    }
}

/// A token with its kind, absolute position, and source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
    pub text: String,
}

impl Token {
    /// Position one past the last byte of the token.
    pub fn end(&self) -> Pos {
        self.pos.offset_by(self.text.len())
    }
}

/// Errors produced while turning input bytes into tokens.
#[derive(Debug, Error)]
pub enum LexError {
    /// The scanner or literal cooker rejected the input.
    #[error("{kind} at {pos}")]
    Scan { pos: Pos, kind: ScanErrorKind },

    /// The underlying reader failed.
    #[error("read error at {pos}: {source}")]
    Io {
        pos: Pos,
        #[source]
        source: std::io::Error,
    },
}

impl LexError {
    #[cold]
    pub fn scan(pos: Pos, kind: ScanErrorKind) -> Self {
        LexError::Scan { pos, kind }
    }

    pub fn pos(&self) -> Pos {
        match self {
            LexError::Scan { pos, .. } | LexError::Io { pos, .. } => *pos,
        }
    }

    /// Whether the input simply ended too early (unterminated string).
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            LexError::Scan {
                kind: ScanErrorKind::UnterminatedString,
                ..
            }
        )
    }
}
