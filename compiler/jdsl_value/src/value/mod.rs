//! Runtime values.
//!
//! # Construction
//!
//! Heap payloads live behind [`Heap`], whose constructor is private to this
//! crate. Everything else builds values through the factory methods:
//!
//! ```text
//! let s = Value::string("hello");
//! let xs = Value::array(vec![Value::Number(1.0), Value::Null]);
//! let call = Value::op("add", vec![vec![Value::Number(1.0), Value::Number(2.0)]]);
//! ```
//!
//! Values are immutable once built. Evaluation produces new arrays and
//! objects rather than editing decoded ones.

mod function;
mod heap;
mod object;

use std::fmt;

pub use function::{Arity, Builtin, Closure, FunctionValue};
pub use heap::Heap;
pub use object::{Key, ObjectValue};

use crate::Name;

/// One parenthesized argument list of an operator, unevaluated.
pub type Invocation = Vec<Value>;

/// A named operator with zero or more chained invocations.
///
/// `f` is a bare reference, `f(a)` has one invocation, and `f(a)(b)` has
/// two: the result of `f(a)` is called with `b`.
#[derive(Clone, Debug, PartialEq)]
pub struct Op {
    pub id: Name,
    pub invocations: Vec<Invocation>,
}

impl Op {
    /// Whether this is a bare identifier with no invocations.
    pub fn is_reference(&self) -> bool {
        self.invocations.is_empty()
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)?;
        for invocation in &self.invocations {
            f.write_str("(")?;
            write_list(f, invocation)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// A jdsl value.
#[derive(Clone, Debug)]
pub enum Value {
    // Primitives
    Null,
    Bool(bool),
    Number(f64),

    // Heap types
    Str(Heap<String>),
    Array(Heap<Vec<Value>>),
    Object(Heap<ObjectValue>),

    /// Operator application as decoded; evaluation resolves it.
    Op(Heap<Op>),

    /// Callable produced by evaluation; never decoded from source.
    Function(FunctionValue),
}

// Factory methods (the only way to construct heap values)

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    #[inline]
    pub fn object(object: ObjectValue) -> Self {
        Value::Object(Heap::new(object))
    }

    /// Operator `id` with the given invocation chain.
    #[inline]
    pub fn op(id: impl Into<Name>, invocations: Vec<Invocation>) -> Self {
        Value::Op(Heap::new(Op {
            id: id.into(),
            invocations,
        }))
    }

    /// Bare identifier reference.
    #[inline]
    pub fn reference(id: impl Into<Name>) -> Self {
        Self::op(id, Vec::new())
    }

    #[inline]
    pub fn builtin(builtin: Builtin) -> Self {
        Value::Function(FunctionValue::Builtin(builtin))
    }
}

// Value methods

impl Value {
    /// Name of the value's type for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Op(_) => "op",
            Value::Function(_) => "function",
        }
    }

    /// Truthiness: `null`, `false`, `0`, NaN, `""`, `[]`, and `{}` are
    /// falsy; everything else, including every callable, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(object) => !object.is_empty(),
            Value::Op(_) | Value::Function(_) => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value can be an evaluated object key.
    pub fn is_hashable(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_op(&self) -> Option<&Op> {
        match self {
            Value::Op(op) => Some(op),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// The identifier of a bare reference (`x`, not `x()`).
    pub fn as_reference(&self) -> Option<&Name> {
        match self {
            Value::Op(op) if op.is_reference() => Some(&op.id),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Op(a), Value::Op(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<ObjectValue> for Value {
    fn from(object: ObjectValue) -> Self {
        Value::object(object)
    }
}

/// Source notation. Data values print as they would be written; callables
/// print as `<builtin add>` or `<lambda(x, y)>`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write_number(f, *n),
            Value::Str(s) => write_quoted(f, s),
            Value::Array(items) => {
                f.write_str("[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
            Value::Object(object) => {
                f.write_str("{")?;
                for (i, (k, v)) in object.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Op(op) => fmt::Display::fmt(&**op, f),
            Value::Function(func) => write!(f, "{func}"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Integral values print without a fraction; very large or small
/// magnitudes use exponent notation.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 || (1e-6..1e21).contains(&n.abs()) {
        write!(f, "{n}")
    } else {
        write!(f, "{n:e}")
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if u32::from(c) < 0x20 => write!(f, "\\u{:04x}", u32::from(c))?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}
