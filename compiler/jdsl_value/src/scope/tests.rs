#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn num(n: f64) -> Value {
    Value::Number(n)
}

#[test]
fn define_and_lookup() {
    let mut scope = Scope::new();
    assert_eq!(scope.define(Name::new("x"), num(1.0)), None);
    assert_eq!(scope.lookup("x"), Some(num(1.0)));
    assert_eq!(scope.lookup("y"), None);
}

#[test]
fn redefine_returns_previous() {
    let mut scope = Scope::new();
    scope.define(Name::new("x"), num(1.0));
    assert_eq!(scope.define(Name::new("x"), num(2.0)), Some(num(1.0)));
    assert_eq!(scope.lookup("x"), Some(num(2.0)));
}

#[test]
fn lookup_walks_parents() {
    let root = LocalScope::new(Scope::new());
    root.borrow_mut().define(Name::new("outer"), num(1.0));
    let middle = root.child();
    let inner = middle.child();
    assert_eq!(inner.borrow().lookup("outer"), Some(num(1.0)));
    assert_eq!(inner.borrow().depth(), 3);
}

#[test]
fn innermost_binding_shadows() {
    let root = LocalScope::new(Scope::new());
    root.borrow_mut().define(Name::new("x"), num(1.0));
    let child = root.child();
    child.borrow_mut().define(Name::new("x"), num(2.0));
    assert_eq!(child.borrow().lookup("x"), Some(num(2.0)));
    assert_eq!(root.borrow().lookup("x"), Some(num(1.0)));
}

#[test]
fn define_never_writes_parent() {
    let root = LocalScope::new(Scope::new());
    let child = root.child();
    child.borrow_mut().define(Name::new("local"), num(3.0));
    assert!(child.borrow().defines("local"));
    assert!(!root.borrow().defines("local"));
    assert_eq!(root.borrow().lookup("local"), None);
}

#[test]
fn later_parent_binds_are_visible() {
    let root = LocalScope::new(Scope::new());
    let child = root.child();
    assert_eq!(child.borrow().lookup("late"), None);
    root.borrow_mut().define(Name::new("late"), num(9.0));
    assert_eq!(child.borrow().lookup("late"), Some(num(9.0)));
}

#[test]
fn builtins_are_seeded() {
    let scope = Scope::with_builtins();
    let names: Vec<String> = scope.names().iter().map(ToString::to_string).collect();
    assert_eq!(
        names,
        vec!["add", "bind", "div", "lambda", "mean", "mul", "sub", "sum"]
    );
    assert_eq!(scope.lookup("add"), Some(Value::builtin(Builtin::Add)));
}

#[test]
fn handles_share_state() {
    let a = LocalScope::new(Scope::new());
    let b = a.clone();
    assert!(LocalScope::ptr_eq(&a, &b));
    b.borrow_mut().define(Name::new("shared"), Value::Null);
    assert!(a.borrow().defines("shared"));
    assert!(!LocalScope::ptr_eq(&a, &a.child()));
}

#[test]
fn debug_does_not_recurse_into_captures() {
    let root = LocalScope::new(Scope::new());
    let closure = crate::FunctionValue::closure(root.clone(), None, Value::Null);
    root.borrow_mut()
        .define(Name::new("f"), Value::Function(closure));
    let printed = format!("{:?}", root.borrow());
    assert!(printed.contains("\"f\""));
}
