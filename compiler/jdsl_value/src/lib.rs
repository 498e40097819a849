//! Data model shared by the jdsl decoder and evaluator.
//!
//! This crate contains:
//! - [`Value`]: the closed set of runtime values, including unevaluated
//!   operators ([`Op`]) and callables ([`FunctionValue`])
//! - [`ObjectValue`] and [`Key`]: insertion-ordered objects keyed by
//!   primitive values
//! - [`Scope`] and [`LocalScope`]: the parent-chained binding environment
//! - [`EvalError`]: structured evaluation errors and their factory functions

pub mod errors;
mod name;
mod scope;
#[cfg(feature = "serde")]
mod serialize;
mod value;

pub use errors::{ErrorCategory, EvalError, EvalErrorKind, EvalResult};
pub use name::Name;
pub use scope::{LocalScope, Scope};
pub use value::{
    Arity, Builtin, Closure, FunctionValue, Heap, Invocation, Key, ObjectValue, Op, Value,
};
