//! Serializable reports built on top of the extractor and the generator
//!
//! The JSON shapes here are what downstream tooling consumes:
//!
//! - [`FieldReport`]: `{ "<tab>": [ {name, type, values?}, ... ], ... }`
//! - [`CombinationReport`]: `{ component?, totalPossibleConfigurations,
//!   warning?, configurations }`, or `{ component?, message }` when the
//!   schema had no configurable fields
//! - [`BatchReport`]: `{ components: [ {componentName, componentPath,
//!   componentConfig}, ... ] }`

use crate::combinations::generate;
use crate::extractor::Layout;
use crate::types::{CombinationResult, FieldDescriptor, FieldValue};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::num::NonZeroUsize;

/// Group name used when a dialog has no tab container
pub const FLAT_GROUP: &str = "fields";

/// Message reported when a combination listing finds nothing to combine
pub const NO_FIELDS_MESSAGE: &str = "No configurable fields with values were found in the dialog.";

/// Message reported when a field report finds nothing at all
pub const NO_RECOGNIZABLE_FIELDS_MESSAGE: &str =
    "Dialog found, but it has no tabs or recognizable fields.";

/// A recognized field as it appears in a field report
///
/// `values` is omitted from the JSON when nothing could be synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<FieldValue>,
}

impl ReportedField {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>, values: Vec<FieldValue>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            values,
        }
    }
}

/// Fields found inside one tab, or inside the whole flat document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroup {
    pub name: String,
    pub fields: Vec<ReportedField>,
}

impl FieldGroup {
    pub fn new(name: impl Into<String>, fields: Vec<ReportedField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// Per-tab field report for a single dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    layout: Layout,
    groups: Vec<FieldGroup>,
}

impl FieldReport {
    pub fn new(layout: Layout, groups: Vec<FieldGroup>) -> Self {
        Self { layout, groups }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Non-empty groups in document order
    pub fn groups(&self) -> &[FieldGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of reported fields across all groups
    pub fn field_count(&self) -> usize {
        self.groups.iter().map(|group| group.fields.len()).sum()
    }
}

impl Serialize for FieldReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.groups.is_empty() {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("message", NO_RECOGNIZABLE_FIELDS_MESSAGE)?;
            return map.end();
        }

        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.name, &group.fields)?;
        }
        map.end()
    }
}

/// Configuration listing for a single dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationReport {
    component: Option<String>,
    field_count: usize,
    limit: NonZeroUsize,
    result: CombinationResult,
}

impl CombinationReport {
    /// Enumerate the configurations of `fields`, keeping at most `limit`
    pub fn build(component: Option<String>, fields: &[FieldDescriptor], limit: NonZeroUsize) -> Self {
        Self {
            component,
            field_count: fields.len(),
            limit,
            result: generate(fields, limit),
        }
    }

    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    pub fn limit(&self) -> NonZeroUsize {
        self.limit
    }

    pub fn result(&self) -> &CombinationResult {
        &self.result
    }

    /// Informational message when there was nothing to combine
    pub fn message(&self) -> Option<&'static str> {
        (self.field_count == 0).then_some(NO_FIELDS_MESSAGE)
    }

    /// Warning text when the listing was truncated
    pub fn warning(&self) -> Option<String> {
        self.result.truncated.then(|| {
            format!(
                "The number of combinations exceeds the safety limit of {}. Only a subset is being returned.",
                self.limit
            )
        })
    }
}

impl Serialize for CombinationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(component) = &self.component {
            map.serialize_entry("component", component)?;
        }
        if let Some(message) = self.message() {
            map.serialize_entry("message", message)?;
            return map.end();
        }
        map.serialize_entry("totalPossibleConfigurations", &self.result.total_count)?;
        if let Some(warning) = self.warning() {
            map.serialize_entry("warning", &warning)?;
        }
        map.serialize_entry("configurations", &self.result.configurations)?;
        map.end()
    }
}

/// Field report of one component inside a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentReport {
    pub component_name: String,
    pub component_path: String,
    pub component_config: FieldReport,
}

/// Field reports for every component found under a search root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub components: Vec<ComponentReport>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component, skipping reports that found nothing
    ///
    /// Returns whether the component was kept.
    pub fn push(
        &mut self,
        component_name: impl Into<String>,
        component_path: impl Into<String>,
        report: FieldReport,
    ) -> bool {
        if report.is_empty() {
            return false;
        }
        self.components.push(ComponentReport {
            component_name: component_name.into(),
            component_path: component_path.into(),
            component_config: report,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
