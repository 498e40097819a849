//! Evaluator for jdsl.
//!
//! Decoded values are evaluated against a parent-chained [`Scope`]:
//! literals evaluate to themselves, arrays and objects element-wise in
//! source order, and operators by looking up their identifier and folding
//! the invocation chain left to right, so `f(a)(b)` calls the result of
//! `f(a)` with `b`.
//!
//! ```text
//! bind(inc, lambda(x, add(x, 1)))
//! inc(41)                          -> 42
//! lambda(x, y, add(x, y))(2)(3)    -> 5
//! ```
//!
//! Builtins: `bind`, `lambda`, `add`, `sub`, `mul`, `div`, `sum`, `mean`.

mod builtins;
pub mod diagnostics;
mod error;
mod evaluator;

pub use error::Error;
pub use evaluator::{EvalConfig, Evaluator};
pub use jdsl_value::{
    ErrorCategory, EvalError, EvalErrorKind, EvalResult, FunctionValue, LocalScope, Scope, Value,
};

/// Evaluate `value` in `scope`, which acts as the root scope.
pub fn eval(scope: &LocalScope<Scope>, value: &Value) -> EvalResult {
    Evaluator::with_scope(scope.clone()).eval(value)
}

/// Decode and evaluate every statement of `source` in `scope`, returning
/// the last value.
pub fn eval_source(scope: &LocalScope<Scope>, source: &str) -> Result<Value, Error> {
    Evaluator::with_scope(scope.clone()).eval_source(source)
}
