//! Low-level tokenizer for jdsl source text.
//!
//! This crate turns a byte slice into raw tokens one at a time. It knows
//! nothing about readers or positions in a larger stream: callers hand it
//! whatever bytes they have buffered and a flag saying whether more input
//! can follow. When a token might continue past the end of the buffer the
//! scanner answers [`Scan::Incomplete`] instead of guessing, so a streaming
//! driver can refill and retry without losing data.
//!
//! # Layers
//!
//! - [`Cursor`]: byte cursor over an unterminated slice
//! - [`RawScanner`]: dispatch on the first byte, produce [`RawToken`]s
//! - [`literal`]: cook string and number token text into values
//!
//! The scanner does not unescape strings or parse numbers. Those steps run
//! in [`literal`] once the decoder has committed to a token.

mod cursor;
mod error;
pub mod literal;
mod raw_scanner;
mod tag;

pub use cursor::Cursor;
pub use error::{NumberPlace, ScanError, ScanErrorKind};
pub use raw_scanner::{RawScanner, Scan};
pub use tag::{RawToken, TokenKind};
