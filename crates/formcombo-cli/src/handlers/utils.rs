//! Shared utilities for command handlers

use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use formcombo_core::{SchemaNode, SchemaParser};
use std::path::Path;
use tracing::debug;

/// Load a dialog schema, showing a spinner while it is parsed
pub fn load_schema(path: &Path, output: &OutputWriter) -> Result<SchemaNode> {
    let _timer = Timer::with_details("schema_loading", &path.display().to_string());

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let progress = output.spinner(&format!("Loading {}...", path.display()));
    let result = SchemaParser::new().load(path);
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let schema = result?;
    debug!(path = %path.display(), "Schema loaded");
    Ok(schema)
}

/// Component label used when none is given on the command line
pub fn component_label(explicit: Option<String>, schema: &Path) -> String {
    explicit.unwrap_or_else(|| schema.display().to_string())
}
