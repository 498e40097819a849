//! Decode errors.

use std::fmt;

use jdsl_lexer::{LexError, Pos, ScanErrorKind, TokenKind};
use jdsl_value::ErrorCategory;
use thiserror::Error;

/// What went wrong while decoding.
#[derive(Debug, Error)]
pub enum DecodeErrorKind {
    /// The tokenizer or literal cooker rejected the input.
    #[error("{0}")]
    Lex(ScanErrorKind),

    /// The reader failed.
    #[error("read error: {0}")]
    Io(#[source] std::io::Error),

    /// A token other than the one the grammar requires here.
    #[error("expected token {expected} (found {found})")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },

    /// A token that cannot begin a value.
    #[error("unexpected token {0} at beginning of value")]
    UnexpectedStart(TokenKind),

    /// The input ended inside a construct.
    #[error("unexpected end of input")]
    Truncated,

    /// Arrays, objects, and invocations nested deeper than allowed.
    #[error("nesting deeper than {0} levels")]
    NestingLimit(usize),
}

/// A decode failure with its position and structural context.
///
/// Context notes are appended as the error unwinds, innermost first:
/// `expected token `,` (found number) at offset 4 in array`.
#[derive(Debug, Error)]
#[error("{kind} at {pos}{}", Context(.context))]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub pos: Pos,
    pub context: Vec<&'static str>,
}

impl DecodeError {
    #[cold]
    pub fn new(kind: DecodeErrorKind, pos: Pos) -> Self {
        DecodeError {
            kind,
            pos,
            context: Vec::new(),
        }
    }

    #[cold]
    pub fn truncated(pos: Pos) -> Self {
        Self::new(DecodeErrorKind::Truncated, pos)
    }

    #[cold]
    pub fn unexpected(expected: TokenKind, found: TokenKind, pos: Pos) -> Self {
        Self::new(DecodeErrorKind::UnexpectedToken { expected, found }, pos)
    }

    /// Append a context note.
    #[must_use]
    pub fn context(mut self, note: &'static str) -> Self {
        self.context.push(note);
        self
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.kind {
            DecodeErrorKind::Lex(_) => ErrorCategory::Lex,
            DecodeErrorKind::Io(_) => ErrorCategory::Io,
            DecodeErrorKind::UnexpectedToken { .. } | DecodeErrorKind::UnexpectedStart(_) => {
                ErrorCategory::Syntax
            }
            DecodeErrorKind::Truncated => ErrorCategory::TruncatedInput,
            DecodeErrorKind::NestingLimit(_) => ErrorCategory::Limit,
        }
    }
}

impl From<LexError> for DecodeError {
    fn from(err: LexError) -> Self {
        match err {
            LexError::Scan {
                pos,
                kind: ScanErrorKind::UnterminatedString,
            } => DecodeError::truncated(pos).context("in string literal"),
            LexError::Scan { pos, kind } => DecodeError::new(DecodeErrorKind::Lex(kind), pos),
            LexError::Io { pos, source } => DecodeError::new(DecodeErrorKind::Io(source), pos),
        }
    }
}

struct Context<'a>(&'a [&'static str]);

impl fmt::Display for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for note in self.0 {
            write!(f, " {note}")?;
        }
        Ok(())
    }
}
