//! Evaluation errors.
//!
//! [`EvalErrorKind`] carries the structured category; factory functions
//! (e.g. [`undefined_name`]) are the public way to build errors and set
//! both `kind` and `message`. While an error unwinds out of nested arrays,
//! objects, and argument lists, each level appends a context note, so the
//! rendered message reads innermost first:
//!
//! ```text
//! undefined name `y` at argument 1 of `add` at array index 2
//! ```

use std::fmt;

use crate::value::{Arity, Value};

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Coarse error taxonomy shared by the decoder and the evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bytes that do not form a token.
    Lex,
    /// Tokens in an order the grammar does not allow.
    Syntax,
    /// Input ended inside a construct.
    TruncatedInput,
    /// Reference to an unbound name.
    Name,
    /// Wrong number of arguments.
    Arity,
    /// Operation applied to a value of the wrong kind.
    Type,
    /// A configured depth limit was exceeded.
    Limit,
    /// Failure of the input source itself.
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorCategory::Lex => "lex error",
            ErrorCategory::Syntax => "syntax error",
            ErrorCategory::TruncatedInput => "truncated input",
            ErrorCategory::Name => "name error",
            ErrorCategory::Arity => "arity error",
            ErrorCategory::Type => "type error",
            ErrorCategory::Limit => "limit exceeded",
            ErrorCategory::Io => "i/o error",
        })
    }
}

/// Structured evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Name
    UndefinedName {
        name: String,
    },

    // Arity
    ArityMismatch {
        callee: String,
        expected: Arity,
        got: usize,
    },

    // Type
    WrongArgType {
        callee: String,
        index: usize,
        expected: &'static str,
        got: &'static str,
    },
    NotCallable {
        type_name: &'static str,
    },
    UnhashableKey {
        type_name: &'static str,
    },
    InvalidBindingName {
        callee: String,
        index: usize,
    },

    // Limit
    StackOverflow {
        depth: usize,
    },
}

impl EvalErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UndefinedName { .. } => ErrorCategory::Name,
            Self::ArityMismatch { .. } => ErrorCategory::Arity,
            Self::WrongArgType { .. }
            | Self::NotCallable { .. }
            | Self::UnhashableKey { .. }
            | Self::InvalidBindingName { .. } => ErrorCategory::Type,
            Self::StackOverflow { .. } => ErrorCategory::Limit,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedName { name } => write!(f, "undefined name `{name}`"),
            Self::ArityMismatch {
                callee,
                expected,
                got,
            } => write!(f, "{callee} expects {expected}, found {got}"),
            Self::WrongArgType {
                callee,
                index,
                expected,
                got,
            } => write!(
                f,
                "argument {index} of {callee} must be {expected}, found {got}"
            ),
            Self::NotCallable { type_name } => {
                write!(f, "call of nonfunction type: {type_name}")
            }
            Self::UnhashableKey { type_name } => write!(f, "unhashable type {type_name}"),
            Self::InvalidBindingName { callee, index } => {
                write!(f, "not a valid variable in argument {index} of {callee}")
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum recursion depth exceeded (limit: {depth})")
            }
        }
    }
}

/// Evaluation error with its context trail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Rendering of `kind`.
    pub message: String,
    /// Structural context, innermost first (`at array index 2`).
    pub context: Vec<String>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            context: Vec::new(),
        }
    }

    /// Append a context note as the error leaves a construct.
    #[must_use]
    pub fn with_context(mut self, note: impl Into<String>) -> Self {
        self.context.push(note.into());
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for note in &self.context {
            write!(f, " {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Factory functions

#[cold]
pub fn undefined_name(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedName {
        name: name.to_owned(),
    })
}

#[cold]
pub fn arity_mismatch(callee: &str, expected: Arity, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        callee: callee.to_owned(),
        expected,
        got,
    })
}

#[cold]
pub fn wrong_arg_type(callee: &str, index: usize, expected: &'static str, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgType {
        callee: callee.to_owned(),
        index,
        expected,
        got: got.type_name(),
    })
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: value.type_name(),
    })
}

#[cold]
pub fn unhashable_key(key: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnhashableKey {
        type_name: key.type_name(),
    })
}

#[cold]
pub fn invalid_binding_name(callee: &str, index: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBindingName {
        callee: callee.to_owned(),
        index,
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth: limit })
}
