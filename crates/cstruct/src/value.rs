//! Decoded values.
//!
//! A [`Value`] mirrors the shape of the model that produced it: records become
//! ordered name/value maps, arrays become sequences, scalars become numbers or
//! strings.

use indexmap::IndexMap;

/// A decoded record, array or scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Str(String),
    Array(Vec<Value>),
    Record(IndexMap<String, Value>),
}

impl Value {
    /// Builds a record value from `(name, value)` pairs, keeping their order.
    pub fn record<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "signed integer",
            Value::UInt(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(i) => Some(i),
            Value::UInt(u) => i64::try_from(u).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Int(i) => u64::try_from(i).ok(),
            Value::UInt(u) => Some(u),
            _ => None,
        }
    }

    /// Returns any numeric value as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(i) => Some(i as f64),
            Value::UInt(u) => Some(u as f64),
            Value::Float(f) => Some(f),
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

    pub fn as_record(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Looks up a field of a record value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_record().and_then(|fields| fields.get(name))
    }
}

macro_rules! from_scalar {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )*
    };
}

from_scalar!(Int as i64: i8, i16, i32, i64);
from_scalar!(UInt as u64: u8, u16, u32, u64);
from_scalar!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(v: IndexMap<String, Value>) -> Self {
        Value::Record(v)
    }
}

/// Converts to JSON for reporting. Non-finite floats have no JSON form and become `null`.
impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Int(i) => serde_json::Value::from(i),
            Value::UInt(u) => serde_json::Value::from(u),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Str(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Record(fields) => serde_json::Value::Object(
                fields.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_keeps_declaration_order() {
        let v = Value::record([("z", 1u8), ("a", 2u8), ("m", 3u8)]);
        let names: Vec<_> = v.as_record().unwrap().keys().cloned().collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn numeric_accessors() {
        assert_eq!(Value::from(-1i8).as_i64(), Some(-1));
        assert_eq!(Value::from(-1i8).as_u64(), None);
        assert_eq!(Value::from(u64::MAX).as_i64(), None);
        assert_eq!(Value::from(7u16).as_f64(), Some(7.0));
        assert_eq!(Value::from("x").as_f64(), None);
    }

    #[test]
    fn to_json() {
        let v = Value::record([
            ("pk", Value::from("PK")),
            ("type", Value::from(0x0403u16)),
            ("nan", Value::from(f64::NAN)),
            ("xs", Value::from(vec![Value::from(-1i32), Value::from(true)])),
        ]);
        let j: serde_json::Value = v.into();
        assert_eq!(
            j,
            json!({"pk": "PK", "type": 1027, "nan": null, "xs": [-1, true]})
        );
        assert_eq!(
            serde_json::to_string(&j).unwrap(),
            r#"{"pk":"PK","type":1027,"nan":null,"xs":[-1,true]}"#
        );
    }
}
