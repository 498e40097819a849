//! Cooking of literal token text into values.
//!
//! The scanner only finds token boundaries. Once the decoder commits to a
//! string or number token it calls into this module to produce the actual
//! content. Error offsets are relative to the start of the token text.

use crate::error::{ScanError, ScanErrorKind};

/// Parse a number token into the nearest `f64`.
pub fn parse_number(text: &str) -> Result<f64, ScanError> {
    text.parse::<f64>()
        .map_err(|_| ScanError::new(0, ScanErrorKind::InvalidNumber(text.to_owned())))
}

/// Unescape a quoted string token, quotes included.
///
/// Supported escapes: `\" \\ \/ \' \a \b \f \n \r \t \v`, `\xHH` (ASCII
/// only), `\uXXXX` (surrogate pairs are combined), and `\UXXXXXXXX`.
/// Raw control characters below U+0020 are rejected.
pub fn unescape(text: &str) -> Result<String, ScanError> {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .ok_or_else(|| ScanError::new(0, ScanErrorKind::UnterminatedString))?;

    // Fast path: nothing to rewrite.
    if !inner.bytes().any(|b| b == b'\\' || b < 0x20) {
        return Ok(inner.to_owned());
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        // +1 for the opening quote
        let offset = i + 1;
        if ch != '\\' {
            if let Ok(byte @ 0x00..=0x1F) = u8::try_from(ch) {
                return Err(ScanError::new(offset, ScanErrorKind::ControlCharacter(byte)));
            }
            out.push(ch);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            return Err(invalid_escape(offset, "\\"));
        };
        let cooked = match esc {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            '\'' => '\'',
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0B}',
            'x' => {
                let code = hex_digits(inner, i + 2, 2).filter(|&c| c < 0x80);
                let ch = code
                    .and_then(char::from_u32)
                    .ok_or_else(|| invalid_escape(offset, escape_text(inner, i, 4)))?;
                skip(&mut chars, 2);
                ch
            }
            'u' => {
                let (ch, consumed) = unicode_escape(inner, i)
                    .ok_or_else(|| invalid_escape(offset, escape_text(inner, i, 6)))?;
                skip(&mut chars, consumed);
                ch
            }
            'U' => {
                let ch = hex_digits(inner, i + 2, 8)
                    .and_then(char::from_u32)
                    .ok_or_else(|| invalid_escape(offset, escape_text(inner, i, 10)))?;
                skip(&mut chars, 8);
                ch
            }
            other => {
                let end = i + 1 + other.len_utf8();
                return Err(invalid_escape(offset, &inner[i..end]));
            }
        };
        out.push(cooked);
    }
    Ok(out)
}

#[cold]
fn invalid_escape(offset: usize, sequence: &str) -> ScanError {
    ScanError::new(offset, ScanErrorKind::InvalidEscape(sequence.to_owned()))
}

/// Up to `len` bytes of escape text starting at `start`, clipped to a
/// character boundary.
fn escape_text(s: &str, start: usize, len: usize) -> &str {
    let mut end = (start + len).min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[start..end]
}

/// Parse exactly `count` hex digits at byte offset `at`.
fn hex_digits(s: &str, at: usize, count: usize) -> Option<u32> {
    let digits = s.get(at..at + count)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Decode `\uXXXX` at byte offset `at` (pointing at the backslash),
/// combining a following `\uXXXX` low surrogate. Returns the character and
/// the number of characters consumed after the `u`.
fn unicode_escape(s: &str, at: usize) -> Option<(char, usize)> {
    let high = hex_digits(s, at + 2, 4)?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high).map(|ch| (ch, 4));
    }
    if s.get(at + 6..at + 8)? != "\\u" {
        return None;
    }
    let low = hex_digits(s, at + 8, 4)?;
    if !(0xDC00..0xE000).contains(&low) {
        return None;
    }
    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(code).map(|ch| (ch, 10))
}

fn skip(chars: &mut impl Iterator, n: usize) {
    for _ in 0..n {
        chars.next();
    }
}

#[cfg(test)]
mod tests;
