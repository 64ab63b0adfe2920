//! Property-based tests for extraction and combination generation
//!
//! These tests check the counting and ordering laws of the generator and
//! that extraction is total over arbitrary JSON trees.

use formcombo_core::{extract, generate, total_combinations, Extractor, FieldDescriptor, FieldValue};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::num::NonZeroUsize;

const CHECKBOX: &str = "granite/ui/components/coral/foundation/form/checkbox";
const SELECT: &str = "granite/ui/components/coral/foundation/form/select";
const TEXTFIELD: &str = "granite/ui/components/coral/foundation/form/textfield";

/// Strategy for value lists with distinct entries
fn values_strategy() -> impl Strategy<Value = Vec<FieldValue>> {
    prop_oneof![
        proptest::collection::hash_set("[a-z]{1,6}", 0..4)
            .prop_map(|set| set.into_iter().map(FieldValue::from).collect()),
        Just(vec![FieldValue::Bool(true), FieldValue::Bool(false)]),
        any::<i64>().prop_map(|n| vec![FieldValue::Number(n)]),
    ]
}

/// Strategy for descriptor lists with unique names `f0`, `f1`, ...
fn fields_strategy() -> impl Strategy<Value = Vec<FieldDescriptor>> {
    proptest::collection::vec(values_strategy(), 0..5).prop_map(|value_sets| {
        value_sets
            .into_iter()
            .enumerate()
            .map(|(i, values)| FieldDescriptor::new(format!("f{}", i), "select", values))
            .collect()
    })
}

/// Strategy for arbitrary JSON with controlled depth
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ./]{0,20}".prop_map(Value::String),
    ];

    leaf.prop_recursive(4, 40, 5, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            proptest::collection::vec(
                (
                    prop_oneof![
                        Just("name".to_string()),
                        Just("sling:resourceType".to_string()),
                        Just("fieldLabel".to_string()),
                        Just("items".to_string()),
                        Just("value".to_string()),
                        "[a-z]{1,8}",
                    ],
                    inner
                ),
                0..5
            )
            .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Strategy for dialog nodes built from real field shapes
fn field_node_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z]{0,6}".prop_map(|name| json!({"name": format!("./{}", name), "sling:resourceType": CHECKBOX})),
        "[a-z]{0,6}".prop_map(|name| json!({"name": format!("./{}", name), "sling:resourceType": TEXTFIELD})),
        ("[a-z]{1,6}", proptest::collection::vec("[a-z]{0,4}", 0..4)).prop_map(|(name, options)| {
            let items: serde_json::Map<String, Value> = options
                .into_iter()
                .enumerate()
                .map(|(i, value)| (format!("o{}", i), json!({"value": value})))
                .collect();
            json!({"name": format!("./{}", name), "sling:resourceType": SELECT, "items": items})
        }),
    ]
}

proptest! {
    /// Property: the reported total is the product of the value counts, whatever the limit
    #[test]
    fn prop_total_is_product(fields in fields_strategy(), limit in 1usize..50) {
        let expected = if fields.is_empty() {
            0
        } else {
            fields.iter().map(|f| f.values.len() as u64).product()
        };

        let result = generate(&fields, NonZeroUsize::new(limit).unwrap());
        prop_assert_eq!(result.total_count, expected);
        prop_assert_eq!(total_combinations(&fields), expected);
    }

    /// Property: the generator emits exactly min(total, limit) configurations
    #[test]
    fn prop_emitted_count_is_bounded(fields in fields_strategy(), limit in 1usize..50) {
        let result = generate(&fields, NonZeroUsize::new(limit).unwrap());
        let expected = result.total_count.min(limit as u64) as usize;

        prop_assert_eq!(result.configurations.len(), expected);
        prop_assert_eq!(result.truncated, result.total_count > limit as u64);
    }

    /// Property: every configuration binds every field in field order
    #[test]
    fn prop_configurations_bind_all_fields(fields in fields_strategy(), limit in 1usize..50) {
        let result = generate(&fields, NonZeroUsize::new(limit).unwrap());
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();

        for config in &result.configurations {
            let keys: Vec<&str> = config.iter().map(|(k, _)| k).collect();
            prop_assert_eq!(&keys, &names);
            for field in &fields {
                let bound = config.get(&field.name).unwrap();
                prop_assert!(field.values.contains(bound));
            }
        }
    }

    /// Property: untruncated listings contain no duplicates
    #[test]
    fn prop_configurations_are_distinct(fields in fields_strategy()) {
        let result = generate(&fields, NonZeroUsize::new(1000).unwrap());
        let unique: HashSet<_> = result.configurations.iter().collect();
        prop_assert_eq!(unique.len(), result.configurations.len());
    }

    /// Property: a smaller limit yields a prefix of a larger one
    #[test]
    fn prop_truncation_keeps_a_prefix(fields in fields_strategy(), small in 1usize..10, extra in 0usize..20) {
        let short = generate(&fields, NonZeroUsize::new(small).unwrap());
        let long = generate(&fields, NonZeroUsize::new(small + extra).unwrap());
        prop_assert_eq!(&short.configurations[..], &long.configurations[..short.configurations.len()]);
    }

    /// Property: extraction never panics and only yields usable descriptors
    #[test]
    fn prop_extraction_is_total(json in json_value_strategy()) {
        for extractor in [Extractor::for_reports(), Extractor::for_configurations(), Extractor::for_variants()] {
            let fields = extractor.extract(&json);
            for field in &fields {
                prop_assert!(!field.name.is_empty());
                prop_assert!(!field.values.is_empty());
            }
            prop_assert_eq!(&fields, &extractor.extract(&json));
            let _ = extractor.report(&json);
        }
    }

    /// Property: every generated field node under a tab is found in order
    #[test]
    fn prop_tabbed_fields_found_in_order(nodes in proptest::collection::vec(field_node_strategy(), 0..6)) {
        let items: serde_json::Map<String, Value> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (format!("n{}", i), node.clone()))
            .collect();
        let dialog = json!({"content": {"items": {"tabs": {"items": {"main": {"items": items}}}}}});

        let expected: Vec<String> = nodes
            .iter()
            .filter_map(|node| {
                let name = node["name"].as_str()?.trim_start_matches("./").to_string();
                let has_values = match node["sling:resourceType"].as_str()? {
                    SELECT => node["items"]
                        .as_object()
                        .is_some_and(|items| items.values().any(|o| o["value"] != "")),
                    _ => true,
                };
                (!name.is_empty() && has_values).then_some(name)
            })
            .collect();

        let found: Vec<String> = extract(&dialog).into_iter().map(|f| f.name).collect();
        prop_assert_eq!(found, expected);
    }
}
