//! Reader-driven tokenizer.
//!
//! Bytes are read in chunks into a single buffer. The raw scanner runs over
//! the unconsumed tail; when it reports `Incomplete` the consumed prefix is
//! dropped and another chunk is appended, so a token longer than one chunk
//! simply grows the buffer until it fits.

use std::io::{ErrorKind, Read};

use jdsl_lexer_core::{RawScanner, Scan, ScanErrorKind};
use tracing::trace;

use crate::{LexError, Pos, Token};

/// Tokenizer settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Bytes requested from the reader per refill. Values below 1 are
    /// treated as 1.
    pub chunk_size: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig { chunk_size: 4096 }
    }
}

/// Streaming tokenizer over a reader.
///
/// Fused: after the first error or the end of input every further call
/// returns `Ok(None)`.
pub struct Tokenizer<R> {
    reader: R,
    buf: Vec<u8>,
    /// First unconsumed byte in `buf`.
    start: usize,
    /// Absolute offset of `buf[0]`.
    base: usize,
    at_eof: bool,
    done: bool,
    chunk_size: usize,
}

impl<R: Read> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, TokenizerConfig::default())
    }

    pub fn with_config(reader: R, config: TokenizerConfig) -> Self {
        Tokenizer {
            reader,
            buf: Vec::new(),
            start: 0,
            base: 0,
            at_eof: false,
            done: false,
            chunk_size: config.chunk_size.max(1),
        }
    }

    /// Absolute position of the first byte not yet turned into a token.
    pub fn pos(&self) -> Pos {
        Pos(self.base + self.start)
    }

    /// Produce the next token, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if self.done {
            return Ok(None);
        }
        loop {
            let scan = RawScanner::new(&self.buf[self.start..], self.at_eof).next_token();
            match scan {
                Ok(Scan::Token(raw)) => {
                    let begin = self.start + raw.offset;
                    let bytes = &self.buf[begin..begin + raw.len];
                    let pos = Pos(self.base + begin);
                    let text = match std::str::from_utf8(bytes) {
                        Ok(text) => text.to_owned(),
                        Err(err) => {
                            self.done = true;
                            let bad = err.valid_up_to();
                            return Err(LexError::scan(
                                pos.offset_by(bad),
                                ScanErrorKind::InvalidUtf8(bytes[bad]),
                            ));
                        }
                    };
                    self.start = begin + raw.len;
                    return Ok(Some(Token {
                        kind: raw.tag,
                        pos,
                        text,
                    }));
                }
                Ok(Scan::End) => {
                    self.done = true;
                    return Ok(None);
                }
                Ok(Scan::Incomplete) => self.fill()?,
                Err(err) => {
                    self.done = true;
                    return Err(LexError::scan(self.pos().offset_by(err.offset), err.kind));
                }
            }
        }
    }

    /// Drop consumed bytes and append one chunk from the reader.
    fn fill(&mut self) -> Result<(), LexError> {
        if self.start > 0 {
            self.buf.drain(..self.start);
            self.base += self.start;
            self.start = 0;
        }
        let filled = self.buf.len();
        self.buf.resize(filled + self.chunk_size, 0);
        let read = loop {
            match self.reader.read(&mut self.buf[filled..]) {
                Ok(n) => break n,
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(source) => {
                    self.buf.truncate(filled);
                    self.done = true;
                    return Err(LexError::Io {
                        pos: Pos(self.base + filled),
                        source,
                    });
                }
            }
        };
        self.buf.truncate(filled + read);
        if read == 0 {
            self.at_eof = true;
        }
        trace!(base = self.base, buffered = self.buf.len(), read, "token buffer refill");
        Ok(())
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Tokenize a complete source string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(source.as_bytes()).collect()
}

#[cfg(test)]
mod tests;
