//! Output formatting and writing utilities
//!
//! This module formats field lists, reports and variant plans in the
//! machine formats (JSON, YAML) and as human-readable text, and owns the
//! progress indicators shown while scanning.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use formcombo_core::report::{NO_FIELDS_MESSAGE, NO_RECOGNIZABLE_FIELDS_MESSAGE};
use formcombo_core::{
    BatchReport, CombinationReport, FieldDescriptor, FieldReport, FieldValue, VariantPlan,
};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for report types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a list of field descriptors
    fn format_fields(&self, fields: &[FieldDescriptor]) -> Result<String>;

    /// Format a per-tab field report
    fn format_field_report(&self, report: &FieldReport) -> Result<String>;

    /// Format field reports for many components
    fn format_batch_report(&self, report: &BatchReport) -> Result<String>;

    /// Format a configuration listing
    fn format_combination_report(&self, report: &CombinationReport) -> Result<String>;

    /// Format a variant plan
    fn format_variant_plan(&self, plan: &VariantPlan) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Human output falls back to pretty JSON
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_fields(&self, fields: &[FieldDescriptor]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_fields_human(fields)),
            _ => self.format(&fields),
        }
    }

    fn format_field_report(&self, report: &FieldReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_field_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_batch_report(&self, report: &BatchReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_batch_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_combination_report(&self, report: &CombinationReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_combination_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_variant_plan(&self, plan: &VariantPlan) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_variant_plan_human(plan)),
            _ => self.format(plan),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    ///
    /// Progress indicators are drawn on stderr, and only when it is a terminal.
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: progress && !quiet && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg(test)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.writeln(&formatted)
    }

    /// Write a list of field descriptors
    pub fn fields(&mut self, fields: &[FieldDescriptor]) -> Result<()> {
        let formatted = self.format.format_fields(fields)?;
        self.writeln(&formatted)
    }

    /// Write a per-tab field report
    pub fn field_report(&mut self, report: &FieldReport) -> Result<()> {
        let formatted = self.format.format_field_report(report)?;
        self.writeln(&formatted)
    }

    /// Write field reports for many components
    pub fn batch_report(&mut self, report: &BatchReport) -> Result<()> {
        let formatted = self.format.format_batch_report(report)?;
        self.writeln(&formatted)
    }

    /// Write a configuration listing
    pub fn combination_report(&mut self, report: &CombinationReport) -> Result<()> {
        let formatted = self.format.format_combination_report(report)?;
        self.writeln(&formatted)
    }

    /// Write a variant plan
    pub fn variant_plan(&mut self, plan: &VariantPlan) -> Result<()> {
        let formatted = self.format.format_variant_plan(plan)?;
        self.writeln(&formatted)
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

/// Helper function to create a spinner style
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Render rows as an aligned text table
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: Vec<&str>| {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| match widths.get(i) {
                Some(width) => format!("{:width$}", cell, width = *width),
                None => cell.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" │ ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render_row(headers.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─"),
    );
    for row in rows {
        lines.push(render_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

/// Render values as a comma-separated list
fn value_list(values: &[FieldValue]) -> String {
    if values.is_empty() {
        return "(no values)".to_string();
    }
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(unnamed)"
    } else {
        name
    }
}

/// Format field descriptors for human reading
fn format_fields_human(fields: &[FieldDescriptor]) -> String {
    if fields.is_empty() {
        return NO_FIELDS_MESSAGE.to_string();
    }

    let rows: Vec<Vec<String>> = fields
        .iter()
        .map(|field| {
            vec![
                field.name.clone(),
                field.type_tag.clone(),
                value_list(&field.values),
            ]
        })
        .collect();

    format!(
        "═══ Fields ({}) ═══\n\n{}",
        fields.len(),
        render_table(&["Name", "Type", "Values"], &rows)
    )
}

/// Format a field report for human reading
fn format_field_report_human(report: &FieldReport) -> String {
    if report.is_empty() {
        return NO_RECOGNIZABLE_FIELDS_MESSAGE.to_string();
    }

    let mut output = format!(
        "Layout: {:?}, {} field(s)\n",
        report.layout(),
        report.field_count()
    );

    for group in report.groups() {
        output.push_str(&format!("\n═══ {} ═══\n", group.name));
        for field in &group.fields {
            output.push_str(&format!(
                "  • {} [{}]: {}\n",
                display_name(&field.name),
                field.type_tag,
                value_list(&field.values)
            ));
        }
    }

    output.trim_end().to_string()
}

/// Format a batch report for human reading
fn format_batch_report_human(report: &BatchReport) -> String {
    if report.is_empty() {
        return "No components with recognizable fields were found.".to_string();
    }

    let mut output = format!("═══ Components ({}) ═══\n", report.len());
    for component in &report.components {
        output.push_str(&format!(
            "\n▸ {} ({})\n",
            component.component_name, component.component_path
        ));
        for group in component.component_config.groups() {
            output.push_str(&format!("    {}: {} field(s)\n", group.name, group.fields.len()));
        }
    }

    output.trim_end().to_string()
}

/// Format a configuration listing for human reading
fn format_combination_report_human(report: &CombinationReport) -> String {
    let mut output = String::new();

    if let Some(component) = report.component() {
        output.push_str(&format!("Component: {}\n", component));
    }

    if let Some(message) = report.message() {
        output.push_str(message);
        return output;
    }

    let result = report.result();
    output.push_str(&format!(
        "Total possible configurations: {}\n",
        result.total_count
    ));
    output.push_str(&format!("Fields: {}\n", report.field_count()));

    if let Some(warning) = report.warning() {
        output.push_str(&format!("⚠ {}\n", warning));
    }

    output.push_str(&format!(
        "\n═══ Configurations ({}) ═══\n",
        result.configurations.len()
    ));
    let width = result.configurations.len().to_string().len();
    for (i, config) in result.configurations.iter().enumerate() {
        output.push_str(&format!(
            "  {:>width$}. {}\n",
            i + 1,
            config.describe(),
            width = width
        ));
    }

    output.trim_end().to_string()
}

/// Format a variant plan for human reading
fn format_variant_plan_human(plan: &VariantPlan) -> String {
    let mut output = String::new();

    if let Some(component) = &plan.component {
        output.push_str(&format!("Component: {}\n", component));
    }
    output.push_str(&format!("Generated: {}\n", plan.generated_at.to_rfc3339()));
    output.push_str(&format!("Variants: {}\n\n", plan.len()));

    let rows: Vec<Vec<String>> = plan
        .variants
        .iter()
        .map(|variant| {
            vec![
                variant.container_name.clone(),
                variant.title.clone(),
                variant.subtitle.clone(),
            ]
        })
        .collect();
    output.push_str(&render_table(&["Container", "Title", "Properties"], &rows));

    output
}

#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
