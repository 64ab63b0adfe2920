//! Fields command handler

use crate::cli::FieldsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use tracing::{info, instrument};

use super::utils::load_schema;

/// Handle the fields command
#[instrument(skip(config, output), fields(schema = %args.schema.display()))]
pub fn handle_fields(args: FieldsArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("fields_command");
    let schema = load_schema(&args.schema, output)?;

    let extractor = config.extractor(args.policy.map(Into::into));
    let fields = extractor.extract(&schema);
    info!(policy = %extractor.policy(), fields = fields.len(), "Extracted fields");

    output.fields(&fields)
}
