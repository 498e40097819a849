//! Hand-written raw scanner producing `(TokenKind, offset, len)` triples.
//!
//! # Design
//!
//! The main dispatch looks at the first non-whitespace byte and calls a
//! focused method that advances the cursor. Every method that can run off
//! the end of the buffer checks `at_eof` before deciding: with more input
//! pending it answers [`Scan::Incomplete`], at true end of input it either
//! finishes the token or reports an error.

use crate::cursor::Cursor;
use crate::error::{NumberPlace, ScanError, ScanErrorKind};
use crate::tag::{RawToken, TokenKind};

/// Outcome of one scanning step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scan {
    /// A complete token.
    Token(RawToken),
    /// The buffer ends inside a token or inside whitespace and more input
    /// may follow. Retry with a larger buffer starting at the same offset.
    Incomplete,
    /// Only whitespace remained and there is no more input.
    End,
}

/// Scanner over one buffered slice.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    buf: &'a [u8],
    at_eof: bool,
}

impl<'a> RawScanner<'a> {
    /// Create a scanner. `at_eof` tells it whether `buf` holds the rest of
    /// the input.
    pub fn new(buf: &'a [u8], at_eof: bool) -> Self {
        RawScanner {
            cursor: Cursor::new(buf),
            buf,
            at_eof,
        }
    }

    /// Offset of the first byte not yet consumed.
    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    /// Produce the next token.
    ///
    /// After `Incomplete` or an error the scanner position is unspecified;
    /// callers restart from the end of the last token they accepted.
    pub fn next_token(&mut self) -> Result<Scan, ScanError> {
        if let Some(stop) = self.skip_whitespace()? {
            return Ok(stop);
        }
        let start = self.cursor.pos();
        let Some(byte) = self.cursor.current() else {
            return Ok(self.end_of_buffer());
        };
        match byte {
            b':' => Ok(self.single(start, TokenKind::Colon)),
            b',' => Ok(self.single(start, TokenKind::Comma)),
            b'(' => Ok(self.single(start, TokenKind::LeftParen)),
            b')' => Ok(self.single(start, TokenKind::RightParen)),
            b'{' => Ok(self.single(start, TokenKind::LeftBrace)),
            b'}' => Ok(self.single(start, TokenKind::RightBrace)),
            b'[' => Ok(self.single(start, TokenKind::LeftBracket)),
            b']' => Ok(self.single(start, TokenKind::RightBracket)),
            b'-' | b'0'..=b'9' => self.number(start),
            b'"' => self.string(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => Ok(self.identifier(start)),
            _ => self.unexpected(start),
        }
    }

    fn end_of_buffer(&self) -> Scan {
        if self.at_eof {
            Scan::End
        } else {
            Scan::Incomplete
        }
    }

    fn token(&self, start: usize, tag: TokenKind) -> Scan {
        Scan::Token(RawToken {
            tag,
            offset: start,
            len: self.cursor.pos() - start,
        })
    }

    /// Skip Unicode whitespace. Returns `Some` when the buffer ran out.
    fn skip_whitespace(&mut self) -> Result<Option<Scan>, ScanError> {
        loop {
            let Some(byte) = self.cursor.current() else {
                return Ok(Some(self.end_of_buffer()));
            };
            if byte.is_ascii() {
                // U+0085 and the other non-ASCII spaces are handled below.
                if matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C) {
                    self.cursor.advance();
                    continue;
                }
                return Ok(None);
            }
            match self.decode_char()? {
                None => return Ok(Some(Scan::Incomplete)),
                Some(ch) if ch.is_whitespace() => self.cursor.advance_n(ch.len_utf8()),
                Some(_) => return Ok(None),
            }
        }
    }

    /// Decode the character at the cursor. `None` means the sequence is cut
    /// off by the end of the buffer and more input may complete it.
    fn decode_char(&self) -> Result<Option<char>, ScanError> {
        let rest = self.cursor.rest();
        let Some(&lead) = rest.first() else {
            return Ok(None);
        };
        let width = Cursor::utf8_char_width(lead);
        let invalid = || ScanError::new(self.cursor.pos(), ScanErrorKind::InvalidUtf8(lead));
        if rest.len() < width {
            return if self.at_eof {
                Err(invalid())
            } else {
                Ok(None)
            };
        }
        std::str::from_utf8(&rest[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(invalid)
    }

    fn unexpected(&mut self, start: usize) -> Result<Scan, ScanError> {
        match self.decode_char()? {
            None => Ok(Scan::Incomplete),
            Some(ch) => Err(ScanError::new(
                start,
                ScanErrorKind::UnexpectedCharacter(ch),
            )),
        }
    }

    fn single(&mut self, start: usize, tag: TokenKind) -> Scan {
        self.cursor.advance();
        self.token(start, tag)
    }

    /// `-? digits (. digits)? ([eE] [+-]? digits)?`, with at least one
    /// mantissa digit. A `.`, exponent marker, or sign directly after the
    /// literal is malformed rather than the start of the next token.
    fn number(&mut self, start: usize) -> Result<Scan, ScanError> {
        if self.cursor.current() == Some(b'-') {
            self.cursor.advance();
        }
        let int_digits = self.cursor.eat_while(|b| b.is_ascii_digit());
        let mut place = NumberPlace::Mantissa;
        let mut frac_digits = 0;
        if self.cursor.current() == Some(b'.') {
            self.cursor.advance();
            frac_digits = self.cursor.eat_while(|b| b.is_ascii_digit());
            place = NumberPlace::Fraction;
        }
        if self.cursor.is_eof() && !self.at_eof {
            return Ok(Scan::Incomplete);
        }
        if int_digits + frac_digits == 0 {
            return Err(self.number_fault(NumberPlace::Mantissa));
        }
        if matches!(self.cursor.current(), Some(b'e' | b'E')) {
            self.cursor.advance();
            if matches!(self.cursor.current(), Some(b'+' | b'-')) {
                self.cursor.advance();
            }
            let exp_digits = self.cursor.eat_while(|b| b.is_ascii_digit());
            if self.cursor.is_eof() && !self.at_eof {
                return Ok(Scan::Incomplete);
            }
            place = NumberPlace::Exponent;
            if exp_digits == 0 {
                return Err(self.number_fault(place));
            }
        }
        match self.cursor.current() {
            Some(found @ (b'.' | b'e' | b'E' | b'+' | b'-')) => Err(ScanError::new(
                self.cursor.pos(),
                ScanErrorKind::MalformedNumber {
                    found: char::from(found),
                    place,
                },
            )),
            _ => Ok(self.token(start, TokenKind::Number)),
        }
    }

    /// Digits were required at the cursor but something else is there.
    #[cold]
    fn number_fault(&self, place: NumberPlace) -> ScanError {
        let kind = match self.cursor.current() {
            Some(b) if b.is_ascii_graphic() && !b.is_ascii_alphanumeric() => {
                ScanErrorKind::MalformedNumber {
                    found: char::from(b),
                    place,
                }
            }
            _ => ScanErrorKind::MissingDigits(place),
        };
        ScanError::new(self.cursor.pos(), kind)
    }

    /// Scan to the closing unescaped quote. A backslash always consumes the
    /// byte after it, so `\"` and `\\` never close or open anything.
    fn string(&mut self, start: usize) -> Result<Scan, ScanError> {
        self.cursor.advance();
        loop {
            match self.cursor.skip_to_string_delim() {
                Some(b'"') => {
                    self.cursor.advance();
                    return Ok(self.token(start, TokenKind::String));
                }
                Some(_) => {
                    self.cursor.advance();
                    if self.cursor.is_eof() {
                        break;
                    }
                    self.cursor.advance();
                }
                None => break,
            }
        }
        if self.at_eof {
            Err(ScanError::new(start, ScanErrorKind::UnterminatedString))
        } else {
            Ok(Scan::Incomplete)
        }
    }

    fn identifier(&mut self, start: usize) -> Scan {
        self.cursor
            .eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        if self.cursor.is_eof() && !self.at_eof {
            return Scan::Incomplete;
        }
        let tag = match &self.buf[start..self.cursor.pos()] {
            b"null" => TokenKind::Null,
            b"false" => TokenKind::False,
            b"true" => TokenKind::True,
            _ => TokenKind::Ident,
        };
        self.token(start, tag)
    }
}
