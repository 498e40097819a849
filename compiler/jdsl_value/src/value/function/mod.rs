//! Callable values: builtins and closures.

use std::fmt;

use super::{Heap, Value};
use crate::{LocalScope, Name, Scope};

/// How many arguments a callable accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, n) = match self {
            Arity::Exact(n) => ("", *n),
            Arity::AtLeast(n) => ("at least ", *n),
        };
        let plural = if n == 1 { "" } else { "s" };
        write!(f, "{prefix}{n} argument{plural}")
    }
}

/// The builtin operations seeded into every root scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Bind,
    Lambda,
    Add,
    Sub,
    Mul,
    Div,
    Sum,
    Mean,
}

impl Builtin {
    /// Every builtin, in registration order.
    pub const ALL: [Builtin; 8] = [
        Builtin::Bind,
        Builtin::Lambda,
        Builtin::Add,
        Builtin::Sub,
        Builtin::Mul,
        Builtin::Div,
        Builtin::Sum,
        Builtin::Mean,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Builtin::Bind => "bind",
            Builtin::Lambda => "lambda",
            Builtin::Add => "add",
            Builtin::Sub => "sub",
            Builtin::Mul => "mul",
            Builtin::Div => "div",
            Builtin::Sum => "sum",
            Builtin::Mean => "mean",
        }
    }

    pub const fn arity(self) -> Arity {
        match self {
            Builtin::Bind | Builtin::Add | Builtin::Sub | Builtin::Mul | Builtin::Div => {
                Arity::Exact(2)
            }
            Builtin::Mean => Arity::Exact(1),
            Builtin::Lambda | Builtin::Sum => Arity::AtLeast(0),
        }
    }

    /// Whether arguments are evaluated before the builtin sees them.
    ///
    /// `bind` and `lambda` receive their arguments as written: a name to
    /// bind, parameter names, a body to defer.
    pub const fn evaluates_args(self) -> bool {
        !matches!(self, Builtin::Bind | Builtin::Lambda)
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }
}

/// A user-defined function created by `lambda`.
pub struct Closure {
    /// Scope the closure was created in. Shared, not copied: later binds
    /// into it are visible to the body.
    pub captured: LocalScope<Scope>,
    /// Parameter names, or `None` for a constant closure that returns
    /// `body` unevaluated whatever it is called with.
    pub params: Option<Vec<Name>>,
    pub body: Value,
}

impl Closure {
    /// Number of arguments a full call takes. Constant closures take any.
    pub fn arity(&self) -> Arity {
        match &self.params {
            Some(params) => Arity::Exact(params.len()),
            None => Arity::AtLeast(0),
        }
    }
}

impl fmt::Debug for Closure {
    // The captured scope may contain this closure; never print it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// A callable value.
#[derive(Clone, Debug)]
pub enum FunctionValue {
    Builtin(Builtin),
    Closure(Heap<Closure>),
}

impl FunctionValue {
    pub fn closure(captured: LocalScope<Scope>, params: Option<Vec<Name>>, body: Value) -> Self {
        FunctionValue::Closure(Heap::new(Closure {
            captured,
            params,
            body,
        }))
    }

    pub fn arity(&self) -> Arity {
        match self {
            FunctionValue::Builtin(b) => b.arity(),
            FunctionValue::Closure(c) => c.arity(),
        }
    }
}

impl PartialEq for FunctionValue {
    /// Builtins compare by identity of the operation, closures by allocation.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FunctionValue::Builtin(a), FunctionValue::Builtin(b)) => a == b,
            (FunctionValue::Closure(a), FunctionValue::Closure(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionValue::Builtin(b) => write!(f, "<builtin {}>", b.name()),
            FunctionValue::Closure(c) => match &c.params {
                None => f.write_str("<lambda>"),
                Some(params) => {
                    f.write_str("<lambda(")?;
                    for (i, p) in params.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        f.write_str(p)?;
                    }
                    f.write_str(")>")
                }
            },
        }
    }
}
