//! `serde::Serialize` for values (enabled with the `serde` feature).
//!
//! Objects serialize as maps. String keys are written as-is; other
//! primitive keys use their source notation (`null`, `true`, `1.5`) so
//! formats that only allow string keys still accept them. Operators
//! serialize as their source text. Callables cannot be serialized.
//!
//! Numbers go through `serialize_f64`, so NaN and the infinities follow the
//! target format: `serde_json` writes them as `null`.

use serde::ser::{Error, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (k, v) in object.iter() {
                    match k.as_str() {
                        Some(s) => map.serialize_entry(s, v)?,
                        None => map.serialize_entry(&k.to_string(), v)?,
                    }
                }
                map.end()
            }
            Value::Op(op) => serializer.collect_str(&**op),
            Value::Function(f) => Err(S::Error::custom(format!("cannot serialize {f}"))),
        }
    }
}
