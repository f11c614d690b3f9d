//! JSON-safe value tree.
//!
//! Chart documents are assembled from this closed set of variants and turned
//! into `serde_json::Value` by a single recursive conversion. Missing numbers
//! and non-finite floats become `null`.

use serde_json::{Map, Number};

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// A scalar, an ordered sequence or an ordered mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Seq(Vec<Value>),
    Map(Vec<(String, Value)>),
}

impl Value {
    pub const NULL: Value = Value::Scalar(Scalar::Null);

    /// Build a mapping from `(key, value)` pairs, keeping their order.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a sequence from anything convertible.
    pub fn seq<T, I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Look up a key in a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Convert a value tree into plain JSON.
pub fn to_json_safe(value: &Value) -> serde_json::Value {
    match value {
        Value::Scalar(scalar) => scalar_to_json(scalar),
        Value::Seq(items) => serde_json::Value::Array(items.iter().map(to_json_safe).collect()),
        Value::Map(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, item) in entries {
                map.insert(key.clone(), to_json_safe(item));
            }
            serde_json::Value::Object(map)
        }
    }
}

fn scalar_to_json(scalar: &Scalar) -> serde_json::Value {
    match scalar {
        Scalar::Null => serde_json::Value::Null,
        Scalar::Bool(b) => serde_json::Value::Bool(*b),
        Scalar::Int(i) => serde_json::Value::Number((*i).into()),
        Scalar::Float(f) => Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Scalar::Str(s) => serde_json::Value::String(s.clone()),
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(Scalar::Float(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Scalar(Scalar::Int(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Scalar(Scalar::Int(i64::from(v)))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Scalar(Scalar::Int(i)),
            Err(_) => Value::Scalar(Scalar::Float(v as f64)),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Scalar(Scalar::Bool(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Scalar(Scalar::Str(v.to_string()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Scalar(Scalar::Str(v))
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Scalar(Scalar::Str(v.clone()))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::NULL)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::seq(items)
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::seq(items.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nan_becomes_null() {
        let value = Value::seq([Some(1.5), Some(f64::NAN), None, Some(f64::INFINITY)]);
        assert_eq!(to_json_safe(&value), json!([1.5, null, null, null]));
    }

    #[test]
    fn test_nested_mapping_keeps_order() {
        let value = Value::map([
            ("z", Value::from(1i64)),
            ("a", Value::map([("inner", Value::seq(["x", "y"]))])),
            ("m", Value::from(Some(true))),
        ]);
        let json = to_json_safe(&value);

        assert_eq!(json, json!({"z": 1, "a": {"inner": ["x", "y"]}, "m": true}));
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_sequences_of_sequences() {
        let matrix = Value::seq(vec![vec![1.0, f64::NAN], vec![0.5, 1.0]]);
        assert_eq!(to_json_safe(&matrix), json!([[1.0, null], [0.5, 1.0]]));
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(to_json_safe(&Value::from("text")), json!("text"));
        assert_eq!(to_json_safe(&Value::from(3usize)), json!(3));
        assert_eq!(to_json_safe(&Value::from(-7i64)), json!(-7));
        assert_eq!(to_json_safe(&Value::NULL), json!(null));
    }

    #[test]
    fn test_get() {
        let value = Value::map([("a", 1i64)]);
        assert_eq!(value.get("a"), Some(&Value::from(1i64)));
        assert_eq!(value.get("b"), None);
        assert_eq!(Value::from(1i64).get("a"), None);
    }
}
