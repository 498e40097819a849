//! Objects: insertion-ordered members keyed by primitive values.
//!
//! Decoded objects may contain operator keys such as `{ getkey(): 1 }`,
//! which only become primitives after evaluation. Members are therefore
//! stored as `(Value, Value)` pairs in source order, and only members whose
//! key is already a primitive are indexed. Inserting an indexed key a second
//! time overwrites the value in place: last write wins, first position kept.

use std::fmt;

use rustc_hash::FxHashMap;

use super::{Heap, Value};

/// Hashable projection of a primitive value.
///
/// Numbers compare by value: `-0.0` and `0.0` are the same key, and every
/// NaN is the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Null,
    Bool(bool),
    Number(u64),
    Str(Heap<String>),
}

impl Key {
    /// The key for `value`, or `None` if `value` is not hashable.
    pub fn from_value(value: &Value) -> Option<Key> {
        match value {
            Value::Null => Some(Key::Null),
            Value::Bool(b) => Some(Key::Bool(*b)),
            Value::Number(n) => Some(Key::number(*n)),
            Value::Str(s) => Some(Key::Str(s.clone())),
            Value::Array(_) | Value::Object(_) | Value::Op(_) | Value::Function(_) => None,
        }
    }

    fn number(n: f64) -> Key {
        let canonical = if n == 0.0 {
            0.0
        } else if n.is_nan() {
            f64::NAN
        } else {
            n
        };
        Key::Number(canonical.to_bits())
    }

    /// The value this key was projected from (up to number normalization).
    pub fn to_value(&self) -> Value {
        match self {
            Key::Null => Value::Null,
            Key::Bool(b) => Value::Bool(*b),
            Key::Number(bits) => Value::Number(f64::from_bits(*bits)),
            Key::Str(s) => Value::Str(s.clone()),
        }
    }
}

/// An object value.
#[derive(Clone, Default)]
pub struct ObjectValue {
    members: Vec<(Value, Value)>,
    index: FxHashMap<Key, usize>,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ObjectValue {
            members: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert a member, returning the value it replaced.
    ///
    /// Non-primitive keys are never merged: each one is kept as its own
    /// member until evaluation turns it into a primitive.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        let Some(hashed) = Key::from_value(&key) else {
            self.members.push((key, value));
            return None;
        };
        if let Some(&slot) = self.index.get(&hashed) {
            return Some(std::mem::replace(&mut self.members[slot].1, value));
        }
        self.index.insert(hashed, self.members.len());
        self.members.push((key, value));
        None
    }

    /// Look up a member by key. Non-primitive keys are compared structurally.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match Key::from_value(key) {
            Some(hashed) => self.index.get(&hashed).map(|&slot| &self.members[slot].1),
            None => self
                .members
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
        }
    }

    /// Look up a member by string key.
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.get(&Value::string(key))
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> {
        self.members.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.members.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.members.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(Value, Value)> for ObjectValue {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut object = ObjectValue::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            object.insert(k, v);
        }
        object
    }
}

impl PartialEq for ObjectValue {
    /// Map equality: same members regardless of order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
