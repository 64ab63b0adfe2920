//! Combinations command handler

use crate::cli::CombinationsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use formcombo_core::CombinationReport;
use tracing::{info, instrument};

use super::utils::{component_label, load_schema};

/// Handle the combinations command
#[instrument(skip(config, output), fields(schema = %args.schema.display()))]
pub fn handle_combinations(
    args: CombinationsArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::new("combinations_command");
    let schema = load_schema(&args.schema, output)?;

    let extractor = config.extractor(args.policy.map(Into::into));
    let fields = extractor.extract(&schema);
    let limit = match args.limit {
        Some(limit) => limit,
        None => config.report_limit()?,
    };

    let component = component_label(args.component, &args.schema);
    let report = CombinationReport::build(Some(component), &fields, limit);
    let result = report.result();
    info!(
        fields = fields.len(),
        total = result.total_count,
        listed = result.configurations.len(),
        truncated = result.truncated,
        "Enumerated configurations"
    );

    output.combination_report(&report)
}
