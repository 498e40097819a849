//! Bounded lookahead over a token source.

use std::collections::VecDeque;

use thiserror::Error;

use crate::{LexError, Token};

/// Failure of [`TokenStream::read_one`].
#[derive(Debug, Error)]
pub enum StreamError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// Lookahead buffer over any iterator of tokens.
///
/// The first lexical error is handed out once; afterwards the stream
/// behaves as if the input ended there.
pub struct TokenStream<I> {
    source: I,
    lookahead: VecDeque<Token>,
    exhausted: bool,
}

impl<I> TokenStream<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    pub fn new(source: I) -> Self {
        TokenStream {
            source,
            lookahead: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Up to `n` upcoming tokens without consuming them.
    ///
    /// Returns fewer than `n` only when the input ends first; an empty
    /// slice means no tokens remain.
    pub fn peek(&mut self, n: usize) -> Result<&[Token], LexError> {
        while self.lookahead.len() < n && !self.exhausted {
            match self.source.next() {
                Some(Ok(token)) => self.lookahead.push_back(token),
                Some(Err(err)) => {
                    self.exhausted = true;
                    return Err(err);
                }
                None => self.exhausted = true,
            }
        }
        let len = n.min(self.lookahead.len());
        Ok(&self.lookahead.make_contiguous()[..len])
    }

    /// The next token, if any, without consuming it.
    pub fn peek_one(&mut self) -> Result<Option<&Token>, LexError> {
        Ok(self.peek(1)?.first())
    }

    /// Drop up to `n` tokens, returning how many were dropped.
    pub fn discard(&mut self, n: usize) -> Result<usize, LexError> {
        let available = self.peek(n)?.len();
        self.lookahead.drain(..available);
        Ok(available)
    }

    /// Consume and return the next token. Running out is an error.
    pub fn read_one(&mut self) -> Result<Token, StreamError> {
        self.peek(1)?;
        self.lookahead.pop_front().ok_or(StreamError::UnexpectedEof)
    }

    /// Whether no tokens remain.
    pub fn is_at_end(&mut self) -> Result<bool, LexError> {
        Ok(self.peek(1)?.is_empty())
    }
}

#[cfg(test)]
mod tests;
