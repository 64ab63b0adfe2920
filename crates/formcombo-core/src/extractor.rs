//! Field discovery inside dialog schema trees
//!
//! Dialogs usually group their fields into tabs under
//! `content.items.tabs.items`. When that chain is present each tab is
//! scanned in document order; otherwise the whole document is scanned as a
//! single subtree. Scanning is depth-first, parent before children, and
//! descends into every child object and every object inside a child array,
//! whether or not the current node was itself recognized as a field.

use crate::error::Error;
use crate::report::{FieldGroup, FieldReport, ReportedField, FLAT_GROUP};
use crate::synthesizer::ValueCatalog;
use crate::types::{FieldDescriptor, SchemaNode};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Key chain leading to the tab container of a tabbed dialog
pub const TABS_PATH: [&str; 4] = ["content", "items", "tabs", "items"];

/// Property holding a field's label
pub const LABEL_KEY: &str = "fieldLabel";

/// Property holding a field's raw name
pub const NAME_KEY: &str = "name";

/// Property holding a field's declared type
pub const RESOURCE_TYPE_KEY: &str = "sling:resourceType";

/// Marker for "this resource's own properties" in raw field names
const RELATIVE_PREFIX: &str = "./";

/// How a schema node is recognized as a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionPolicy {
    /// Any node with a non-empty `fieldLabel`
    Labeled,
    /// Nodes with both `name` and `sling:resourceType` that yield values
    #[default]
    Valued,
}

impl fmt::Display for RecognitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionPolicy::Labeled => f.write_str("labeled"),
            RecognitionPolicy::Valued => f.write_str("valued"),
        }
    }
}

impl FromStr for RecognitionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "labeled" | "labelled" => Ok(RecognitionPolicy::Labeled),
            "valued" => Ok(RecognitionPolicy::Valued),
            other => Err(Error::configuration(format!(
                "unknown recognition policy '{}', expected 'labeled' or 'valued'",
                other
            ))),
        }
    }
}

/// Where the extractor found the fields of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Fields grouped under `content.items.tabs.items`
    Tabbed,
    /// No tab container; the whole document was scanned
    Flat,
}

/// Schema extractor parameterized by recognition policy and value catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extractor {
    policy: RecognitionPolicy,
    catalog: ValueCatalog,
}

impl Extractor {
    pub fn new(policy: RecognitionPolicy, catalog: ValueCatalog) -> Self {
        Self { policy, catalog }
    }

    /// Label-based recognition with report samples
    pub fn for_reports() -> Self {
        Self::new(RecognitionPolicy::Labeled, ValueCatalog::report())
    }

    /// Name and type based recognition with configuration samples
    pub fn for_configurations() -> Self {
        Self::new(RecognitionPolicy::Valued, ValueCatalog::configurations())
    }

    /// Name and type based recognition limited to selects and checkboxes
    pub fn for_variants() -> Self {
        Self::new(RecognitionPolicy::Valued, ValueCatalog::variants())
    }

    pub fn policy(&self) -> RecognitionPolicy {
        self.policy
    }

    pub fn catalog(&self) -> &ValueCatalog {
        &self.catalog
    }

    /// Discover every field of `root` that has a name and at least one value
    pub fn extract(&self, root: &SchemaNode) -> Vec<FieldDescriptor> {
        let fields: Vec<FieldDescriptor> = self
            .scan_groups(root)
            .1
            .into_iter()
            .flat_map(|group| group.fields)
            .filter(|field| !field.name.is_empty() && !field.values.is_empty())
            .map(|field| FieldDescriptor::new(field.name, field.type_tag, field.values))
            .collect();

        debug!(
            policy = %self.policy,
            fields = fields.len(),
            "Extracted field descriptors"
        );
        fields
    }

    /// Group every recognized field by the tab it was found in
    ///
    /// Unlike [`Extractor::extract`], labeled fields are kept even when no
    /// values could be synthesized for them.
    pub fn report(&self, root: &SchemaNode) -> FieldReport {
        let (layout, groups) = self.scan_groups(root);
        FieldReport::new(layout, groups)
    }

    fn scan_groups(&self, root: &SchemaNode) -> (Layout, Vec<FieldGroup>) {
        match tabs(root) {
            Some(tabs) => {
                let groups = tabs
                    .iter()
                    .filter(|(_, tab)| tab.is_object())
                    .filter_map(|(key, tab)| {
                        let mut fields = Vec::new();
                        self.scan(tab, &mut fields);
                        debug!(tab = %key, fields = fields.len(), "Scanned tab");
                        (!fields.is_empty()).then(|| FieldGroup::new(key.clone(), fields))
                    })
                    .collect();
                (Layout::Tabbed, groups)
            }
            None => {
                debug!("No tab container found, scanning the whole schema");
                let mut fields = Vec::new();
                self.scan(root, &mut fields);
                let groups = if fields.is_empty() {
                    Vec::new()
                } else {
                    vec![FieldGroup::new(FLAT_GROUP, fields)]
                };
                (Layout::Flat, groups)
            }
        }
    }

    fn scan(&self, node: &SchemaNode, out: &mut Vec<ReportedField>) {
        let Some(object) = node.as_object() else {
            return;
        };

        if let Some(field) = self.recognize(node, object) {
            trace!(
                name = %field.name,
                type_tag = %field.type_tag,
                values = field.values.len(),
                "Recognized field"
            );
            out.push(field);
        }

        for child in object.values() {
            match child {
                SchemaNode::Object(_) => self.scan(child, out),
                SchemaNode::Array(items) => items
                    .iter()
                    .filter(|item| item.is_object())
                    .for_each(|item| self.scan(item, out)),
                _ => {}
            }
        }
    }

    fn recognize(&self, node: &SchemaNode, object: &Map<String, SchemaNode>) -> Option<ReportedField> {
        match self.policy {
            RecognitionPolicy::Labeled => {
                let label = string_property(object, LABEL_KEY)?;
                if label.is_empty() {
                    return None;
                }
                let name = normalize_name(&string_property(object, NAME_KEY).unwrap_or_default());
                let type_tag = string_property(object, RESOURCE_TYPE_KEY).unwrap_or_default();
                let values = self.catalog.synthesize(&type_tag, node);
                Some(ReportedField::new(name, type_tag, values))
            }
            RecognitionPolicy::Valued => {
                if !object.contains_key(NAME_KEY) || !object.contains_key(RESOURCE_TYPE_KEY) {
                    return None;
                }
                let name = normalize_name(&string_property(object, NAME_KEY).unwrap_or_default());
                if name.is_empty() {
                    return None;
                }
                let type_tag = string_property(object, RESOURCE_TYPE_KEY).unwrap_or_default();
                let values = self.catalog.synthesize(&type_tag, node);
                if values.is_empty() {
                    return None;
                }
                Some(ReportedField::new(name, type_tag, values))
            }
        }
    }
}

/// Extract with the default (valued) extractor
pub fn extract(root: &SchemaNode) -> Vec<FieldDescriptor> {
    Extractor::default().extract(root)
}

/// Resolve the tab container of a tabbed dialog, if present
pub fn tabs(root: &SchemaNode) -> Option<&Map<String, SchemaNode>> {
    TABS_PATH
        .iter()
        .try_fold(root, |node, key| node.get(key))?
        .as_object()
}

/// Strip one leading `./` from a raw field name
pub fn normalize_name(raw: &str) -> String {
    raw.strip_prefix(RELATIVE_PREFIX).unwrap_or(raw).to_string()
}

// Numbers and booleans are read in their string form, like select option values.
fn string_property<'a>(object: &'a Map<String, SchemaNode>, key: &str) -> Option<Cow<'a, str>> {
    match object.get(key)? {
        SchemaNode::String(s) => Some(Cow::Borrowed(s.as_str())),
        SchemaNode::Number(n) => Some(Cow::Owned(n.to_string())),
        SchemaNode::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValue;
    use serde_json::json;

    const SELECT: &str = "granite/ui/components/coral/foundation/form/select";
    const CHECKBOX: &str = "granite/ui/components/coral/foundation/form/checkbox";
    const TEXTFIELD: &str = "granite/ui/components/coral/foundation/form/textfield";

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("./title"), "title");
        assert_eq!(normalize_name("title"), "title");
        assert_eq!(normalize_name("././title"), "./title");
        assert_eq!(normalize_name("./"), "");
    }

    #[test]
    fn test_tabs_lookup() {
        let tabbed = json!({"content": {"items": {"tabs": {"items": {"main": {}}}}}});
        assert!(tabs(&tabbed).is_some());

        let missing_link = json!({"content": {"items": {"column": {}}}});
        assert!(tabs(&missing_link).is_none());

        let not_a_mapping = json!({"content": {"items": {"tabs": {"items": [1, 2]}}}});
        assert!(tabs(&not_a_mapping).is_none());

        assert!(tabs(&json!("scalar")).is_none());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("labeled".parse::<RecognitionPolicy>().unwrap(), RecognitionPolicy::Labeled);
        assert_eq!("VALUED".parse::<RecognitionPolicy>().unwrap(), RecognitionPolicy::Valued);
        assert!("fuzzy".parse::<RecognitionPolicy>().is_err());
        assert_eq!(RecognitionPolicy::Labeled.to_string(), "labeled");
    }

    #[test]
    fn test_valued_requires_name_and_type() {
        let root = json!({
            "a": {"name": "./a", "sling:resourceType": CHECKBOX},
            "b": {"sling:resourceType": CHECKBOX},
            "c": {"name": "./c"},
            "d": {"name": "./d", "sling:resourceType": "custom/unknown"}
        });
        let fields = Extractor::for_configurations().extract(&root);
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_labeled_recognizes_by_label_only() {
        let root = json!({
            "a": {"fieldLabel": "A", "name": "./a", "sling:resourceType": TEXTFIELD},
            "b": {"fieldLabel": "", "name": "./b", "sling:resourceType": TEXTFIELD},
            "c": {"name": "./c", "sling:resourceType": TEXTFIELD}
        });
        let fields = Extractor::for_reports().extract(&root);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "a");
        assert_eq!(fields[0].values, vec![FieldValue::from("laura ipsum")]);
    }

    #[test]
    fn test_scalar_label_and_name_are_read_as_text() {
        let root = json!({
            "a": {"fieldLabel": 7, "name": 42, "sling:resourceType": TEXTFIELD},
            "b": {"fieldLabel": null, "name": "./b", "sling:resourceType": TEXTFIELD}
        });
        let reported = Extractor::for_reports().extract(&root);
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].name, "42");

        let valued = Extractor::for_configurations().extract(&root);
        let names: Vec<_> = valued.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["42", "b"]);
    }

    #[test]
    fn test_recursion_continues_below_recognized_fields() {
        let root = json!({
            "outer": {
                "name": "./layout",
                "sling:resourceType": SELECT,
                "items": {
                    "one": {"value": "one"},
                    "nested": {
                        "name": "./inner",
                        "sling:resourceType": CHECKBOX
                    }
                }
            }
        });
        let fields = Extractor::for_configurations().extract(&root);
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["layout", "inner"]);
    }

    #[test]
    fn test_recursion_into_arrays() {
        let root = json!({
            "list": [
                {"name": "./first", "sling:resourceType": CHECKBOX},
                "scalar",
                [{"name": "./skipped", "sling:resourceType": CHECKBOX}],
                {"wrapper": {"name": "./second", "sling:resourceType": CHECKBOX}}
            ]
        });
        let fields = extract(&root);
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_non_object_root_yields_nothing() {
        assert!(extract(&json!([1, 2, 3])).is_empty());
        assert!(extract(&json!(null)).is_empty());
    }
}
