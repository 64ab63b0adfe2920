//! Core data structures shared by the extractor, the combination generator
//! and the report builders.
//!
//! Schema documents are plain [`serde_json::Value`] trees. The workspace
//! enables serde_json's `preserve_order` feature, so object keys iterate in
//! document order, which both the extractor and the generator rely on.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One node of an authoring schema, borrowed read-only from the caller
pub type SchemaNode = serde_json::Value;

/// A representative value a field could hold
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean choice (checkboxes)
    Bool(bool),
    /// Integer sample (number fields)
    Number(i64),
    /// Text sample, option value or path
    Text(String),
}

impl FieldValue {
    /// Convert into the equivalent JSON value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Number(n) => serde_json::Value::from(*n),
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// A discovered field together with its representative values
///
/// Descriptors returned by the extractor always have a non-empty `name`
/// and at least one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field identifier with the leading `./` removed
    pub name: String,
    /// Declared resource type, possibly empty
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Representative values in reporting order
    pub values: Vec<FieldValue>,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        type_tag: impl Into<String>,
        values: Vec<FieldValue>,
    ) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            values,
        }
    }
}

/// One fully bound assignment of a value to every field
///
/// Entries keep insertion order. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Configuration {
    entries: Vec<(String, FieldValue)>,
}

impl Configuration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new configuration with `name` bound to `value`
    ///
    /// The receiver is left untouched. Binding a name that is already
    /// present replaces its value in place.
    pub fn extended(&self, name: &str, value: &FieldValue) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.clone(),
            None => entries.push((name.to_string(), value.clone())),
        }
        Self { entries }
    }

    /// Look up the value bound to a field
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in binding order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Human-readable `name = value` summary
    pub fn describe(&self) -> String {
        crate::combinations::describe(self)
    }

    /// Convert into a JSON object, keeping binding order
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Configuration::new(), |config, (key, value)| {
                config.extended(&key.into(), &value.into())
            })
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Output of the combination generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationResult {
    /// Emitted configurations, at most `limit` of them
    pub configurations: Vec<Configuration>,
    /// True, un-truncated size of the Cartesian product
    pub total_count: u64,
    /// Whether `total_count` exceeded the limit
    pub truncated: bool,
}

impl CombinationResult {
    /// Result for an input with nothing to enumerate
    pub fn empty() -> Self {
        Self {
            configurations: Vec::new(),
            total_count: 0,
            truncated: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}
