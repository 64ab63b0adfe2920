//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::{Config, ENV_POLICY, ENV_REPORT_LIMIT, ENV_VARIANT_LIMIT};
use crate::error::{Error, Result};
use crate::logging::{ENV_LOG_FILE, ENV_LOG_FORMAT};
use crate::output::OutputWriter;
use tracing::{info, instrument};

/// Handle the config command
#[instrument(skip_all)]
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Validate => handle_config_validate(config, output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => Config::user_config_path()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?,
    };

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::default().save(&path)?;
    info!(path = %path.display(), "Wrote default configuration");
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to change limits, extraction policy or logging.")?;
    Ok(())
}

/// Handle config show subcommand
fn handle_config_show(
    args: ConfigShowArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let content = render_config(config, args.format)?;
    output.writeln(content.trim_end())
}

fn render_config(config: &Config, format: ConfigFormat) -> Result<String> {
    let content = match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| Error::config(format!("Failed to serialize as TOML: {}", e)))?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(content)
}

/// Handle config validate subcommand
fn handle_config_validate(config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.section("Configuration Validation")?;

    config.validate()?;
    output.success("✓ Configuration is valid")?;

    let found: Vec<_> = Config::default_config_paths()
        .into_iter()
        .filter(|path| path.exists())
        .collect();
    if found.is_empty() {
        output.info("No configuration file found, using defaults")?;
    } else {
        for path in &found {
            output.info(&format!("Config file: {}", path.display()))?;
        }
    }

    for key in [
        ENV_REPORT_LIMIT,
        ENV_VARIANT_LIMIT,
        ENV_POLICY,
        ENV_LOG_FORMAT,
        ENV_LOG_FILE,
    ] {
        if let Ok(value) = std::env::var(key) {
            output.info(&format!("Environment override: {}={}", key, value))?;
        }
    }

    Ok(())
}
