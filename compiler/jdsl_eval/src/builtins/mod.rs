//! Builtin operations.
//!
//! The arithmetic builtins receive evaluated arguments. `bind` and
//! `lambda` see their arguments as written; this module validates those
//! raw arguments and builds closures, while the evaluator performs the
//! one evaluation `bind` needs. Argument counts are checked by the caller.

use jdsl_value::errors::{invalid_binding_name, wrong_arg_type};
use jdsl_value::{EvalError, EvalResult, FunctionValue, LocalScope, Name, Scope, Value};

pub(crate) fn add(args: &[Value]) -> EvalResult {
    binary("add", args, |a, b| a + b)
}

pub(crate) fn sub(args: &[Value]) -> EvalResult {
    binary("sub", args, |a, b| a - b)
}

pub(crate) fn mul(args: &[Value]) -> EvalResult {
    binary("mul", args, |a, b| a * b)
}

/// IEEE division: `div(1, 0)` is infinity, `div(0, 0)` is NaN.
pub(crate) fn div(args: &[Value]) -> EvalResult {
    binary("div", args, |a, b| a / b)
}

fn number(callee: &str, index: usize, value: &Value) -> Result<f64, EvalError> {
    value
        .as_number()
        .ok_or_else(|| wrong_arg_type(callee, index, "number", value))
}

fn binary(callee: &str, args: &[Value], op: fn(f64, f64) -> f64) -> EvalResult {
    let a = number(callee, 0, &args[0])?;
    let b = number(callee, 1, &args[1])?;
    Ok(Value::Number(op(a, b)))
}

/// `sum([a, b, ...])` or `sum(a, b, ...)`.
pub(crate) fn sum(args: &[Value]) -> EvalResult {
    let items = match args {
        [single] => single.as_array().unwrap_or(args),
        _ => args,
    };
    let mut total = 0.0;
    for (i, item) in items.iter().enumerate() {
        total += number("sum", i, item)?;
    }
    Ok(Value::Number(total))
}

/// Arithmetic mean of one array. The mean of nothing is NaN.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean(args: &[Value]) -> EvalResult {
    let items = args[0]
        .as_array()
        .ok_or_else(|| wrong_arg_type("mean", 0, "array", &args[0]))?;
    let mut total = 0.0;
    for (i, item) in items.iter().enumerate() {
        total += number("mean", i, item)?;
    }
    Ok(Value::Number(total / items.len() as f64))
}

/// The name a `bind` target denotes: a bare identifier or a string.
pub(crate) fn binding_name(callee: &str, index: usize, target: &Value) -> Result<Name, EvalError> {
    if let Some(id) = target.as_reference() {
        return Ok(id.clone());
    }
    target
        .as_str()
        .map(Name::from)
        .ok_or_else(|| invalid_binding_name(callee, index))
}

/// Build the closure for `lambda(p1, ..., pn, body)` over `scope`.
///
/// `lambda()` and `lambda(body)` are constant closures. Parameters must
/// be bare identifiers.
pub(crate) fn lambda(args: &[Value], scope: &LocalScope<Scope>) -> EvalResult {
    let closure = match args {
        [] => FunctionValue::closure(scope.clone(), None, Value::Null),
        [body] => FunctionValue::closure(scope.clone(), None, body.clone()),
        [params @ .., body] => {
            let params = params
                .iter()
                .enumerate()
                .map(|(i, param)| {
                    param
                        .as_reference()
                        .cloned()
                        .ok_or_else(|| invalid_binding_name("lambda", i))
                })
                .collect::<Result<Vec<_>, _>>()?;
            FunctionValue::closure(scope.clone(), Some(params), body.clone())
        }
    };
    Ok(Value::Function(closure))
}
