//! Byte cursor over a possibly partial buffer.
//!
//! Unlike a cursor over a whole file, this one cannot rely on a sentinel
//! byte: the slice it walks may end in the middle of a token because the
//! rest of the input has not been read yet. Every accessor therefore
//! returns `Option<u8>`, and `None` means "end of what is buffered", not
//! necessarily end of input.

use memchr::memchr2;

/// Cursor over a byte slice.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    /// Byte at the current position.
    #[inline]
    pub fn current(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Byte one past the current position.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos + 1).copied()
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    /// Whether every buffered byte has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Bytes from the current position to the end of the buffer.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        self.buf.get(self.pos..).unwrap_or_default()
    }

    /// Advance while `pred` holds, returning the number of bytes eaten.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while let Some(b) = self.current() {
            if !pred(b) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    /// Jump to the next `"` or `\`, returning it, or to the end of the
    /// buffer returning `None`.
    pub fn skip_to_string_delim(&mut self) -> Option<u8> {
        if let Some(i) = memchr2(b'"', b'\\', self.rest()) {
            self.pos += i;
            self.current()
        } else {
            self.pos = self.buf.len();
            None
        }
    }

    /// Width in bytes of the UTF-8 sequence introduced by `byte`.
    ///
    /// Continuation bytes and invalid lead bytes report width 1 so the
    /// caller can reject them one byte at a time.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> usize {
        match byte {
            0x00..=0x7F => 1,
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => 1,
        }
    }
}
