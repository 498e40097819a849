//! Lexical scopes.
//!
//! A scope holds the bindings of one frame and a link to its parent.
//! Lookups walk outward and the first binding found wins. Definitions only
//! ever touch the scope they are made in; a parent is never written
//! through a child.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::{Builtin, Name, Value};

/// Shared handle to a scope with interior mutability.
///
/// Wraps `Rc<RefCell<T>>` so every scope allocation goes through
/// [`LocalScope::new`]. Closures hold one of these for the scope they were
/// created in, so a scope lives as long as any closure that captured it.
///
/// Not thread-safe: scopes belong to one evaluator on one thread.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles refer to the same scope.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl LocalScope<Scope> {
    /// A fresh empty scope whose parent is `self`.
    pub fn child(&self) -> LocalScope<Scope> {
        LocalScope::new(Scope::with_parent(self.clone()))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One frame of bindings.
#[derive(Clone, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    /// An empty scope with no parent.
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// A root scope with every builtin bound under its name.
    pub fn with_builtins() -> Self {
        let mut scope = Scope::new();
        for builtin in Builtin::ALL {
            scope.define(Name::new(builtin.name()), Value::builtin(builtin));
        }
        scope
    }

    /// Bind `name` in this scope, returning the value it shadowed here.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) -> Option<Value> {
        self.bindings.insert(name, value)
    }

    /// Resolve `name` innermost-first.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        let mut current = self.parent.clone();
        while let Some(handle) = current {
            let scope = handle.borrow();
            if let Some(value) = scope.bindings.get(name) {
                return Some(value.clone());
            }
            current = scope.parent.clone();
        }
        None
    }

    /// Whether `name` is bound in this frame, ignoring parents.
    pub fn defines(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }

    /// Names bound in this frame, sorted.
    pub fn names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.bindings.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of frames from this one to the root, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.parent.clone();
        while let Some(handle) = current {
            depth += 1;
            current = handle.borrow().parent.clone();
        }
        depth
    }
}

impl fmt::Debug for Scope {
    // Parents are summarized; a closure bound here may capture this scope.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("names", &self.names())
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests;
