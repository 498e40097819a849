//! Scanner and literal errors.

use thiserror::Error;

/// What went wrong while scanning or cooking a token.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScanErrorKind {
    /// A byte or character that cannot begin any token.
    #[error("unexpected character {0:?} at start of token")]
    UnexpectedCharacter(char),

    /// Bytes that do not form valid UTF-8.
    #[error("invalid UTF-8 byte {0:#04x}")]
    InvalidUtf8(u8),

    /// A character in a position a numeric literal does not allow.
    #[error("invalid character {found:?} {place} of numeric literal")]
    MalformedNumber { found: char, place: NumberPlace },

    /// A numeric literal with no mantissa digits, or an exponent with no digits.
    #[error("missing digits {0} of numeric literal")]
    MissingDigits(NumberPlace),

    /// A numeric literal the float parser rejects.
    #[error("invalid numeric literal `{0}`")]
    InvalidNumber(String),

    /// End of input inside a string literal.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// An unknown or malformed escape sequence.
    #[error("invalid escape sequence `{0}` in string literal")]
    InvalidEscape(String),

    /// A raw control character inside a string literal.
    #[error("control character {0:#04x} in string literal")]
    ControlCharacter(u8),
}

/// Where in a numeric literal a fault was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberPlace {
    Mantissa,
    Fraction,
    Exponent,
}

impl std::fmt::Display for NumberPlace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            NumberPlace::Mantissa => "in mantissa",
            NumberPlace::Fraction => "after decimal point",
            NumberPlace::Exponent => "in exponent",
        })
    }
}

/// A scan failure at a byte offset relative to the scanned slice.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ScanError {
    pub offset: usize,
    pub kind: ScanErrorKind,
}

impl ScanError {
    #[cold]
    pub fn new(offset: usize, kind: ScanErrorKind) -> Self {
        ScanError { offset, kind }
    }

    /// Move the offset forward by `base` bytes.
    #[must_use]
    pub fn shifted(mut self, base: usize) -> Self {
        self.offset += base;
        self
    }
}
