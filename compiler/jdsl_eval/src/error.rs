//! Errors from the decode-then-evaluate entry points.

use jdsl_decode::DecodeError;
use jdsl_value::{ErrorCategory, EvalError};
use thiserror::Error;

/// A failure while decoding or evaluating source.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Decode(err) => err.category(),
            Error::Eval(err) => err.category(),
        }
    }
}
