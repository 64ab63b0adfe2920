// Tests for output formatting
//
// Human renderings are checked for their key lines; machine formats are
// checked against the serialized report shapes.

use super::*;
use formcombo_core::Extractor;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

const SELECT: &str = "granite/ui/components/coral/foundation/form/select";
const CHECKBOX: &str = "granite/ui/components/coral/foundation/form/checkbox";

/// Writer collecting everything into a shared buffer
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
    (writer, buffer)
}

fn fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("style", SELECT, vec!["primary".into(), "ghost".into()]),
        FieldDescriptor::new("disabled", CHECKBOX, vec![true.into(), false.into()]),
    ]
}

fn tabbed_dialog() -> serde_json::Value {
    json!({"content": {"items": {"tabs": {"items": {
        "main": {"items": {
            "style": {
                "fieldLabel": "Style",
                "name": "./style",
                "sling:resourceType": SELECT,
                "items": {"a": {"value": "primary"}}
            },
            "heading": {"fieldLabel": "Heading", "sling:resourceType": "heading"}
        }}
    }}}}})
}

#[test]
fn test_fields_human_table() {
    let formatted = OutputFormat::Human.format_fields(&fields()).unwrap();
    assert!(formatted.starts_with("═══ Fields (2) ═══"));
    assert!(formatted.contains("Name"));
    assert!(formatted.contains("primary, ghost"));
    assert!(formatted.contains("true, false"));
}

#[test]
fn test_fields_json() {
    let formatted = OutputFormat::Json.format_fields(&fields()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&formatted).unwrap();
    assert_eq!(value[0]["name"], "style");
    assert_eq!(value[0]["type"], SELECT);
    assert_eq!(value[1]["values"], json!([true, false]));
}

#[test]
fn test_empty_fields_human() {
    assert_eq!(OutputFormat::Human.format_fields(&[]).unwrap(), NO_FIELDS_MESSAGE);
}

#[test]
fn test_field_report_human() {
    let report = Extractor::for_reports().report(&tabbed_dialog());
    let formatted = OutputFormat::Human.format_field_report(&report).unwrap();

    assert!(formatted.starts_with("Layout: Tabbed, 2 field(s)"));
    assert!(formatted.contains("═══ main ═══"));
    assert!(formatted.contains(&format!("  • style [{}]: primary", SELECT)));
    assert!(formatted.contains("  • (unnamed) [heading]: (no values)"));
}

#[test]
fn test_field_report_yaml() {
    let report = Extractor::for_reports().report(&tabbed_dialog());
    let formatted = OutputFormat::Yaml.format_field_report(&report).unwrap();
    assert!(formatted.starts_with("main:"));
}

#[test]
fn test_batch_report_human() {
    let mut batch = BatchReport::new();
    batch.push(
        "button",
        "site/button",
        Extractor::for_reports().report(&tabbed_dialog()),
    );

    let formatted = OutputFormat::Human.format_batch_report(&batch).unwrap();
    assert!(formatted.contains("═══ Components (1) ═══"));
    assert!(formatted.contains("▸ button (site/button)"));
    assert!(formatted.contains("    main: 2 field(s)"));

    let empty = OutputFormat::Human.format_batch_report(&BatchReport::new()).unwrap();
    assert!(empty.starts_with("No components"));
}

#[test]
fn test_combination_report_human_with_warning() {
    let report = CombinationReport::build(
        Some("button".to_string()),
        &fields(),
        NonZeroUsize::new(3).unwrap(),
    );
    let formatted = OutputFormat::Human.format_combination_report(&report).unwrap();

    assert!(formatted.starts_with("Component: button\nTotal possible configurations: 4"));
    assert!(formatted.contains("⚠ The number of combinations exceeds the safety limit of 3."));
    assert!(formatted.contains("═══ Configurations (3) ═══"));
    assert!(formatted.contains("  1. style = primary, disabled = true"));
    assert!(formatted.contains("  3. style = ghost, disabled = true"));
    assert!(!formatted.contains("  4."));
}

#[test]
fn test_combination_report_human_without_fields() {
    let report = CombinationReport::build(None, &[], NonZeroUsize::new(3).unwrap());
    let formatted = OutputFormat::Human.format_combination_report(&report).unwrap();
    assert_eq!(formatted, NO_FIELDS_MESSAGE);
}

#[test]
fn test_combination_report_json_pretty() {
    let report = CombinationReport::build(None, &fields(), NonZeroUsize::new(10).unwrap());
    let formatted = OutputFormat::JsonPretty.format_combination_report(&report).unwrap();
    assert!(formatted.contains('\n'));

    let value: serde_json::Value = serde_json::from_str(&formatted).unwrap();
    assert_eq!(value["totalPossibleConfigurations"], 4);
    assert_eq!(value["configurations"][3], json!({"style": "ghost", "disabled": false}));
}

#[test]
fn test_variant_plan_human() {
    let plan = VariantPlan::build(
        Some("button".to_string()),
        &fields(),
        NonZeroUsize::new(10).unwrap(),
    )
    .unwrap();
    let formatted = OutputFormat::Human.format_variant_plan(&plan).unwrap();

    assert!(formatted.starts_with("Component: button\nGenerated: "));
    assert!(formatted.contains("Variants: 4"));
    assert!(formatted.contains("variant_container_3"));
    assert!(formatted.contains("Variant 4"));
    assert!(formatted.contains("style = ghost, disabled = false"));
}

#[test]
fn test_render_table_alignment() {
    let table = render_table(
        &["A", "Long header"],
        &[
            vec!["wide cell".to_string(), "x".to_string()],
            vec!["y".to_string(), "z".to_string()],
        ],
    );
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "A         │ Long header");
    assert_eq!(lines[1], "──────────┼────────────");
    assert_eq!(lines[2], "wide cell │ x");
    assert_eq!(lines[3], "y         │ z");
}

#[test]
fn test_writer_messages_in_human_mode() {
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output.info("scanning").unwrap();
    output.warning("careful").unwrap();
    output.success("done").unwrap();
    output.section("Summary").unwrap();

    assert_eq!(
        buffer.contents(),
        "INFO: scanning\nWARNING: careful\ndone\n\n=== Summary ===\n"
    );
}

#[test]
fn test_writer_quiet_suppresses_info() {
    let (mut output, buffer) = writer(OutputFormat::Human, true);
    output.info("scanning").unwrap();
    output.success("done").unwrap();
    output.warning("careful").unwrap();

    assert_eq!(buffer.contents(), "WARNING: careful\n");
}

#[test]
fn test_writer_machine_formats_only_emit_data() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.info("scanning").unwrap();
    output.warning("careful").unwrap();
    output.fields(&fields()[..1]).unwrap();

    let contents = buffer.contents();
    let value: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
    assert_eq!(value[0]["name"], "style");
    assert!(output.spinner("working").is_none());
    assert!(output.progress_bar(3, "working").is_none());
}
