//! Configuration-item records
//!
//! A record is a loosely typed field map as served by the CMDB query layer.
//! Values may be scalars, nested records or lists; the accessors here never
//! panic on an unexpected shape, they report it or fall back to empty.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Identity field carried by every record
pub const GUID: &str = "guid";
/// Human readable display name
pub const KEY_NAME: &str = "key_name";
/// Timestamp of the accepted revision
pub const CONFIRM_TIME: &str = "confirm_time";
/// Timestamp of the latest edit
pub const UPDATE_TIME: &str = "update_time";

/// A single field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Name of the value's shape, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Borrow the value as text, only for text values
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Render a scalar value as text. Lists join their scalar items with `,`.
    pub fn display_text(&self) -> String {
        match self {
            Value::Null | Value::Record(_) => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .filter(|v| !matches!(v, Value::List(_) | Value::Record(_) | Value::Null))
                .map(Value::display_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Identities referenced by this value.
    ///
    /// Text is a single identity, a nested record contributes its `guid`,
    /// a list contributes the identities of each item.
    pub fn identities(&self) -> Vec<&str> {
        match self {
            Value::Text(s) if !s.is_empty() => vec![s.as_str()],
            Value::Record(r) => match r.text(GUID) {
                "" => vec![],
                guid => vec![guid],
            },
            Value::List(items) => items.iter().flat_map(Value::identities).collect(),
            _ => vec![],
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Record(Record {
                fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

/// The field of a record held something other than a list of records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildDataError {
    pub field: String,
    pub found: &'static str,
}

/// One configuration-item instance
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the record for chaining
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Text of a field, empty when absent or not text
    pub fn text(&self, field: &str) -> &str {
        self.get(field).and_then(Value::as_text).unwrap_or("")
    }

    pub fn guid(&self) -> &str {
        self.text(GUID)
    }

    pub fn key_name(&self) -> &str {
        self.text(KEY_NAME)
    }

    pub fn confirm_time(&self) -> &str {
        self.text(CONFIRM_TIME)
    }

    pub fn update_time(&self) -> &str {
        self.text(UPDATE_TIME)
    }

    /// Identities held by an endpoint field (single identity or a list)
    pub fn identities(&self, field: &str) -> Vec<&str> {
        self.get(field).map(Value::identities).unwrap_or_default()
    }

    /// Child records stored under `field`.
    ///
    /// A missing or null field is an empty list. Null entries inside the
    /// list are skipped. Any other shape is an error.
    pub fn child_records(&self, field: &str) -> Result<Vec<&Record>, ChildDataError> {
        let invalid = |found| ChildDataError {
            field: field.to_string(),
            found,
        };
        match self.get(field) {
            None | Some(Value::Null) => Ok(vec![]),
            Some(Value::List(items)) => items
                .iter()
                .filter(|v| !matches!(v, Value::Null))
                .map(|v| v.as_record().ok_or_else(|| invalid(v.kind_name())))
                .collect(),
            Some(other) => Err(invalid(other.kind_name())),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<Vec<Record>> for Value {
    fn from(records: Vec<Record>) -> Self {
        Value::List(records.into_iter().map(Value::Record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).expect("valid record")
    }

    #[test]
    fn test_text_accessors_degrade_to_empty() {
        let r = record(json!({"guid": "g1", "confirm_time": 42}));
        assert_eq!(r.guid(), "g1");
        assert_eq!(r.confirm_time(), "");
        assert_eq!(r.key_name(), "");
    }

    #[test]
    fn test_child_records_missing_field_is_empty() {
        let r = record(json!({"guid": "g1", "hosts": null}));
        assert!(r.child_records("apps").unwrap().is_empty());
        assert!(r.child_records("hosts").unwrap().is_empty());
    }

    #[test]
    fn test_child_records_list() {
        let r = record(json!({"hosts": [{"guid": "h1"}, null, {"guid": "h2"}]}));
        let children = r.child_records("hosts").unwrap();
        let guids: Vec<_> = children.iter().map(|c| c.guid()).collect();
        assert_eq!(guids, vec!["h1", "h2"]);
    }

    #[test]
    fn test_child_records_wrong_shape() {
        let r = record(json!({"hosts": "h1", "mixed": [{"guid": "a"}, 3]}));
        let err = r.child_records("hosts").unwrap_err();
        assert_eq!(err.found, "text");
        let err = r.child_records("mixed").unwrap_err();
        assert_eq!(err.field, "mixed");
        assert_eq!(err.found, "number");
    }

    #[test]
    fn test_identities_forms() {
        let r = record(json!({
            "one": "a",
            "many": ["b", "c"],
            "nested": {"guid": "d"},
            "mixed": ["e", {"guid": "f"}, 7],
            "empty": ""
        }));
        assert_eq!(r.identities("one"), vec!["a"]);
        assert_eq!(r.identities("many"), vec!["b", "c"]);
        assert_eq!(r.identities("nested"), vec!["d"]);
        assert_eq!(r.identities("mixed"), vec!["e", "f"]);
        assert!(r.identities("empty").is_empty());
        assert!(r.identities("absent").is_empty());
    }

    #[test]
    fn test_display_text() {
        let r = record(json!({"n": 3, "b": true, "l": ["x", 1, {"k": "v"}]}));
        assert_eq!(r.get("n").unwrap().display_text(), "3");
        assert_eq!(r.get("b").unwrap().display_text(), "true");
        assert_eq!(r.get("l").unwrap().display_text(), "x,1");
    }

    #[test]
    fn test_builder() {
        let r = Record::new()
            .with("guid", "root")
            .with("apps", vec![Record::new().with("guid", "a1")]);
        assert_eq!(r.guid(), "root");
        assert_eq!(r.child_records("apps").unwrap()[0].guid(), "a1");
    }
}
