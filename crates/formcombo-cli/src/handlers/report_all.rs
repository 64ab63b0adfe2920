//! Report-all command handler
//!
//! Every file below the search root whose stem matches the dialog name is
//! treated as the dialog of the component directory containing it.

use crate::cli::ReportAllArgs;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use anyhow::Context;
use formcombo_core::loader::Format;
use formcombo_core::{BatchReport, Extractor, FieldReport, SchemaParser};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

/// A component dialog found while scanning
#[derive(Debug, Clone, PartialEq, Eq)]
struct ComponentDialog {
    /// Name of the component directory
    name: String,
    /// Component directory relative to the search root, `/`-separated
    path: String,
    /// Dialog file
    file: PathBuf,
}

/// Handle the report-all command
#[instrument(skip(output), fields(dir = %args.dir.display()))]
pub fn handle_report_all(args: ReportAllArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("report_all_command", &args.dir.display().to_string());

    if args.dialog.is_empty() || args.dialog.contains(['/', '\\']) {
        return Err(Error::invalid_args(format!(
            "--dialog must be a bare file stem (got '{}')",
            args.dialog
        )));
    }
    if !args.dir.is_dir() {
        return Err(Error::FileNotFound { path: args.dir });
    }

    let dialogs = discover_dialogs(&args.dir, &args.dialog);
    info!(dialogs = dialogs.len(), "Discovered component dialogs");
    if dialogs.is_empty() {
        output.warning(&format!(
            "No '{}' dialog files found under {}",
            args.dialog,
            args.dir.display()
        ))?;
    }

    let progress = output.progress_bar(dialogs.len() as u64, "Scanning components");
    let (batch, skipped) = build_batch(&dialogs, progress.as_ref());
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if skipped > 0 {
        output.warning(&format!(
            "Skipped {} component(s) whose dialog could not be loaded",
            skipped
        ))?;
    }
    info!(
        reported = batch.len(),
        skipped,
        "Built batch report"
    );

    output.batch_report(&batch)
}

/// Find dialog files below `root`, in file-name order
fn discover_dialogs(root: &Path, dialog_stem: &str) -> Vec<ComponentDialog> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let path = entry.path();
            path.file_stem().and_then(|stem| stem.to_str()) == Some(dialog_stem)
                && Format::is_supported(path)
        })
        .map(|entry| component_dialog(root, entry.into_path()))
        .collect()
}

fn component_dialog(root: &Path, file: PathBuf) -> ComponentDialog {
    let directory = file.parent().unwrap_or(root);

    let name = directory
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| directory.display().to_string());

    let relative = directory
        .strip_prefix(root)
        .unwrap_or(directory)
        .components()
        .map(|part| part.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    let path = if relative.is_empty() {
        ".".to_string()
    } else {
        relative
    };

    ComponentDialog { name, path, file }
}

/// Report every dialog, returning the batch and the number of unreadable dialogs
fn build_batch(dialogs: &[ComponentDialog], progress: Option<&ProgressBar>) -> (BatchReport, usize) {
    let parser = SchemaParser::new();
    let extractor = Extractor::for_reports();
    let mut batch = BatchReport::new();
    let mut skipped = 0;

    for dialog in dialogs {
        match report_component(&parser, &extractor, dialog) {
            Ok(report) => {
                if !batch.push(dialog.name.as_str(), dialog.path.as_str(), report) {
                    debug!(component = %dialog.name, "No recognizable fields, skipping");
                }
            }
            Err(e) => {
                skipped += 1;
                warn!(file = %dialog.file.display(), error = %format!("{:#}", e), "Skipping component");
            }
        }
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    (batch, skipped)
}

fn report_component(
    parser: &SchemaParser,
    extractor: &Extractor,
    dialog: &ComponentDialog,
) -> anyhow::Result<FieldReport> {
    let schema = parser
        .load(&dialog.file)
        .with_context(|| format!("failed to load the dialog of '{}'", dialog.name))?;
    Ok(extractor.report(&schema))
}
