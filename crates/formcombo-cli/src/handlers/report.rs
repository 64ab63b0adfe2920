//! Report command handler

use crate::cli::ReportArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use formcombo_core::Extractor;
use tracing::{info, instrument};

use super::utils::load_schema;

/// Handle the report command
#[instrument(skip(output), fields(schema = %args.schema.display()))]
pub fn handle_report(args: ReportArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("report_command");
    let schema = load_schema(&args.schema, output)?;

    let report = Extractor::for_reports().report(&schema);
    info!(
        layout = ?report.layout(),
        groups = report.groups().len(),
        fields = report.field_count(),
        "Built field report"
    );

    output.field_report(&report)
}
