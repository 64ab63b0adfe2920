//! Type-driven synthesis of representative field values
//!
//! A [`ValueCatalog`] decides which samples exist for which field types.
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. type contains `select`: the non-empty `value` of every option under `items`
//! 2. type contains `pathfield`: the catalog's path sample
//! 3. type contains `checkbox`: `true` then `false`
//! 4. type is one of the catalog's text types: the text sample
//! 5. type is one of the catalog's number types: the number sample
//!
//! Anything else yields no values.

use crate::types::{FieldValue, SchemaNode};
use serde::{Deserialize, Serialize};

/// Sample value for path pickers
pub const SAMPLE_PATH: &str = "/content/dam/example.png";

/// Resource types treated as free text
pub const TEXT_FIELD_TYPES: &[&str] = &[
    "granite/ui/components/coral/foundation/form/textfield",
    "cq/gui/components/authoring/dialog/richtext",
];

/// Resource types treated as numbers
pub const NUMBER_FIELD_TYPES: &[&str] = &["granite/ui/components/coral/foundation/form/numberfield"];

/// Table of samples used when synthesizing field values
///
/// A `None` sample disables the corresponding rule: a matching field then
/// yields no values instead of falling through to later rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueCatalog {
    /// Value emitted for path pickers
    pub path_sample: Option<String>,
    /// Value emitted for text and rich-text fields
    pub text_sample: Option<String>,
    /// Value emitted for number fields
    pub number_sample: Option<i64>,
    /// Exact resource types that receive the text sample
    pub text_types: Vec<String>,
    /// Exact resource types that receive the number sample
    pub number_types: Vec<String>,
}

impl Default for ValueCatalog {
    fn default() -> Self {
        Self::configurations()
    }
}

impl ValueCatalog {
    /// Samples used by the per-tab field report
    pub fn report() -> Self {
        Self {
            path_sample: Some(SAMPLE_PATH.to_string()),
            text_sample: Some("laura ipsum".to_string()),
            number_sample: Some(1_234_567),
            text_types: owned(TEXT_FIELD_TYPES),
            number_types: owned(NUMBER_FIELD_TYPES),
        }
    }

    /// Samples used when listing configurations
    pub fn configurations() -> Self {
        Self {
            path_sample: Some(SAMPLE_PATH.to_string()),
            text_sample: Some("Sample Text".to_string()),
            number_sample: Some(123),
            text_types: owned(TEXT_FIELD_TYPES),
            number_types: owned(NUMBER_FIELD_TYPES),
        }
    }

    /// Only enumerable choices (selects and checkboxes), used for variant plans
    pub fn variants() -> Self {
        Self {
            path_sample: None,
            text_sample: None,
            number_sample: None,
            text_types: owned(TEXT_FIELD_TYPES),
            number_types: owned(NUMBER_FIELD_TYPES),
        }
    }

    /// Produce the representative values for a field of type `type_tag`
    pub fn synthesize(&self, type_tag: &str, node: &SchemaNode) -> Vec<FieldValue> {
        if type_tag.contains("select") {
            select_options(node)
        } else if type_tag.contains("pathfield") {
            self.path_sample.iter().cloned().map(FieldValue::Text).collect()
        } else if type_tag.contains("checkbox") {
            vec![FieldValue::Bool(true), FieldValue::Bool(false)]
        } else if self.text_types.iter().any(|t| t == type_tag) {
            self.text_sample.iter().cloned().map(FieldValue::Text).collect()
        } else if self.number_types.iter().any(|t| t == type_tag) {
            self.number_sample.into_iter().map(FieldValue::Number).collect()
        } else {
            Vec::new()
        }
    }
}

/// Synthesize values using the default catalog
pub fn synthesize(type_tag: &str, node: &SchemaNode) -> Vec<FieldValue> {
    ValueCatalog::default().synthesize(type_tag, node)
}

/// Collect option values from a select's `items` mapping
fn select_options(node: &SchemaNode) -> Vec<FieldValue> {
    let Some(items) = node.get("items").and_then(|items| items.as_object()) else {
        return Vec::new();
    };

    items
        .values()
        .filter(|option| option.is_object())
        .filter_map(|option| option_value(option.get("value")?))
        .collect()
}

// Scalars are read in their string form; empty "Select..." placeholders are skipped.
fn option_value(value: &serde_json::Value) -> Option<FieldValue> {
    let text = match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(FieldValue::Text(text))
}

fn owned(types: &[&str]) -> Vec<String> {
    types.iter().map(|t| t.to_string()).collect()
}
