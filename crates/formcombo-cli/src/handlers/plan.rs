//! Plan command handler

use crate::cli::{OutputFormat, PlanArgs};
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use formcombo_core::{Extractor, VariantPlan};
use serde_json::json;
use tracing::{info, instrument};

use super::utils::{component_label, load_schema};

/// Handle the plan command
#[instrument(skip(config, output), fields(schema = %args.schema.display()))]
pub fn handle_plan(args: PlanArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("plan_command");
    let schema = load_schema(&args.schema, output)?;

    let fields = Extractor::for_variants().extract(&schema);
    let limit = match args.limit {
        Some(limit) => limit,
        None => config.variant_limit()?,
    };

    let component = component_label(args.component, &args.schema);
    let plan = match VariantPlan::build(Some(component), &fields, limit) {
        Ok(plan) => plan,
        Err(e) if e.is_informational() => {
            info!(error = %e, "Nothing to plan");
            return match output.format() {
                OutputFormat::Human => output.info(&e.to_string()),
                _ => output.data(&json!({ "message": e.to_string() })),
            };
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(path) = &args.save_to {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&plan)?)?;
        info!(path = %path.display(), variants = plan.len(), "Saved variant plan");
        output.success(&format!("✓ Saved {} variant(s) to {}", plan.len(), path.display()))?;
    }

    output.variant_plan(&plan)
}
