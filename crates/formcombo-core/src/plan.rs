//! Variant plans: one labeled variant per configuration
//!
//! A plan is what a publisher needs to author a test page with one copy of
//! a component per configuration. Planning refuses to proceed when the true
//! combination count exceeds the variant ceiling, rather than silently
//! authoring a truncated subset.

use crate::combinations::{generate, total_combinations};
use crate::error::{Error, Result};
use crate::types::{Configuration, FieldDescriptor};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::num::NonZeroUsize;
use tracing::info;

/// Prefix of the container name given to each variant
pub const VARIANT_CONTAINER_PREFIX: &str = "variant_container_";

/// A single variant to author
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSpec {
    /// Zero-based position in enumeration order
    pub index: usize,
    /// Name of the container node holding this variant
    pub container_name: String,
    /// Display title, `Variant N` (one-based)
    pub title: String,
    /// `name = value` summary of the configuration
    pub subtitle: String,
    /// Property values to apply to the component
    pub properties: Configuration,
}

impl VariantSpec {
    fn new(index: usize, properties: Configuration) -> Self {
        Self {
            index,
            container_name: format!("{}{}", VARIANT_CONTAINER_PREFIX, index),
            title: format!("Variant {}", index + 1),
            subtitle: properties.describe(),
            properties,
        }
    }
}

/// Every variant of a component, ready for publishing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub total_combinations: u64,
    pub variants: Vec<VariantSpec>,
}

impl VariantPlan {
    /// Plan one variant per configuration of `fields`
    ///
    /// Fails with [`Error::NoFields`] when there is nothing to combine and
    /// with [`Error::TooManyCombinations`] when the product exceeds `limit`.
    pub fn build(
        component: Option<String>,
        fields: &[FieldDescriptor],
        limit: NonZeroUsize,
    ) -> Result<Self> {
        let total = total_combinations(fields);
        if total == 0 {
            return Err(Error::NoFields { component });
        }
        if total > limit.get() as u64 {
            return Err(Error::TooManyCombinations {
                total,
                limit: limit.get(),
            });
        }

        let variants: Vec<VariantSpec> = generate(fields, limit)
            .configurations
            .into_iter()
            .enumerate()
            .map(|(index, config)| VariantSpec::new(index, config))
            .collect();

        info!(
            component = component.as_deref().unwrap_or("<unnamed>"),
            variants = variants.len(),
            "Planned component variants"
        );

        Ok(Self {
            component,
            generated_at: Utc::now(),
            total_combinations: total,
            variants,
        })
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValue;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("style", "select", vec!["primary".into(), "secondary".into()]),
            FieldDescriptor::new("disabled", "checkbox", vec![true.into(), false.into()]),
        ]
    }

    #[test]
    fn test_plan_labels_variants() {
        let plan = VariantPlan::build(
            Some("/apps/site/button".to_string()),
            &fields(),
            NonZeroUsize::new(500).unwrap(),
        )
        .unwrap();

        assert_eq!(plan.len(), 4);
        assert_eq!(plan.total_combinations, 4);
        let first = &plan.variants[0];
        assert_eq!(first.container_name, "variant_container_0");
        assert_eq!(first.title, "Variant 1");
        assert_eq!(first.subtitle, "style = primary, disabled = true");
        assert_eq!(first.properties.get("disabled"), Some(&FieldValue::Bool(true)));

        let last = &plan.variants[3];
        assert_eq!(last.container_name, "variant_container_3");
        assert_eq!(last.title, "Variant 4");
        assert_eq!(last.subtitle, "style = secondary, disabled = false");
    }

    #[test]
    fn test_plan_refuses_oversized_products() {
        let err = VariantPlan::build(None, &fields(), NonZeroUsize::new(3).unwrap()).unwrap_err();
        assert!(matches!(err, Error::TooManyCombinations { total: 4, limit: 3 }));
    }

    #[test]
    fn test_plan_without_fields() {
        let err = VariantPlan::build(Some("x".to_string()), &[], NonZeroUsize::new(3).unwrap())
            .unwrap_err();
        assert!(err.is_informational());
    }

    #[test]
    fn test_plan_serialization() {
        let plan = VariantPlan::build(None, &fields(), NonZeroUsize::new(10).unwrap()).unwrap();
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["totalCombinations"], 4);
        assert!(value.get("component").is_none());
        assert!(value["generatedAt"].is_string());
        assert_eq!(value["variants"][1]["containerName"], "variant_container_1");
        assert_eq!(
            value["variants"][1]["properties"],
            serde_json::json!({"style": "primary", "disabled": false})
        );
    }
}
