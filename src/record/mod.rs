//! Data records evaluated by rules
//!
//! A record maps attribute names to string or numeric values. Records are
//! supplied per evaluation call and never owned by the engine.

mod value;

pub use value::*;

use crate::error::{Result, RuleEngineError};
use ahash::AHashMap;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Read access to attribute values during evaluation
pub trait AttributeSource {
    /// Look up an attribute; `None` when the record has no such key
    fn attribute(&self, name: &str) -> Option<&Value>;
}

/// Attribute name to value mapping
#[derive(Debug, Clone, Default)]
pub struct Record {
    values: AHashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a record from a JSON object such as `{"age": 35, "status": "active"}`
    ///
    /// Only string and number values are accepted.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: serde_json::Value =
            serde_json::from_str(json).map_err(|e| RuleEngineError::RecordDecode(e.to_string()))?;

        let object = match parsed {
            serde_json::Value::Object(object) => object,
            other => {
                return Err(RuleEngineError::RecordDecode(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )))
            }
        };

        let mut values = AHashMap::with_capacity(object.len());
        for (key, value) in object {
            let value = match value {
                serde_json::Value::String(s) => Value::Text(s),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => Value::Integer(i),
                    None => Value::Decimal(n.as_f64().ok_or_else(|| {
                        RuleEngineError::RecordDecode(format!("number out of range for '{}'", key))
                    })?),
                },
                other => {
                    return Err(RuleEngineError::RecordDecode(format!(
                        "attribute '{}' must be a string or number, found {}",
                        key,
                        json_kind(&other)
                    )))
                }
            };
            values.insert(key, value);
        }

        Ok(Self { values })
    }

    pub fn insert(&mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(attribute.into(), value.into())
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.values.get(attribute)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl AttributeSource for Record {
    fn attribute(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

impl<S: BuildHasher> AttributeSource for HashMap<String, Value, S> {
    fn attribute(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Record {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
