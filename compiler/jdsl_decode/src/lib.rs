//! Decoder for jdsl source.
//!
//! Decoding turns source text straight into [`Value`]s, one top-level
//! statement at a time. Operators stay unevaluated ([`Value::Op`]); the
//! evaluator resolves them later against a scope.
//!
//! ```text
//! Value      := null | false | true | Number | String | Array | Object | Op
//! Array      := '[' (Value (',' Value)* ','?)? ']'
//! Object     := '{' (Member (',' Member)* ','?)? '}'
//! Member     := Value ':' Value
//! Op         := Ident Invocation*
//! Invocation := '(' (Value (',' Value)* ','?)? ')'
//! ```
//!
//! Strings are unescaped and numbers parsed while decoding, so decode
//! errors cover every malformed literal before evaluation starts.

mod decoder;
mod error;

pub use decoder::{DecodeConfig, Decoder};
pub use error::{DecodeError, DecodeErrorKind};
pub use jdsl_lexer::{Pos, TokenizerConfig};

use jdsl_value::Value;

/// Decode every statement in `source`.
pub fn decode_all(source: &str) -> Result<Vec<Value>, DecodeError> {
    Decoder::from_source(source).collect()
}
