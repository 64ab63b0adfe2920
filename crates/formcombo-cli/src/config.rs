//! Configuration management for the CLI
//!
//! Settings are resolved from, in increasing precedence:
//! - Default values
//! - A configuration file (YAML, JSON or TOML)
//! - `FORMCOMBO_*` environment variables
//! - Command-line arguments

use crate::error::{Error, Result};
use formcombo_core::{Extractor, RecognitionPolicy, ValueCatalog};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding `limits.report`
pub const ENV_REPORT_LIMIT: &str = "FORMCOMBO_REPORT_LIMIT";

/// Environment variable overriding `limits.variants`
pub const ENV_VARIANT_LIMIT: &str = "FORMCOMBO_VARIANT_LIMIT";

/// Environment variable overriding `extraction.policy`
pub const ENV_POLICY: &str = "FORMCOMBO_POLICY";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Safety limits
    pub limits: LimitsConfig,

    /// Field extraction settings
    pub extraction: ExtractionConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Safety limits applied when enumerating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum configurations listed by `combinations`
    pub report: usize,

    /// Maximum variants accepted by `plan`
    pub variants: usize,
}

/// Field extraction settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Recognition policy used by `fields` and `combinations`
    pub policy: RecognitionPolicy,

    /// Sample values replacing the built-in configuration catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<ValueCatalog>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when neither `-v` nor `RUST_LOG` is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            report: formcombo_core::DEFAULT_REPORT_LIMIT.get(),
            variants: formcombo_core::DEFAULT_VARIANT_LIMIT.get(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

/// On-disk configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content).map_err(|e| {
                Error::config(format!("Failed to parse {}: {}", path.display(), e))
            })?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations, then
    /// apply environment overrides and validate
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the per-user configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("formcombo").join("config.toml"))
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory
        for name in ["formcombo", ".formcombo"] {
            for ext in ["toml", "yaml", "yml", "json"] {
                paths.push(PathBuf::from(format!("{}.{}", name, ext)));
            }
        }

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let formcombo_dir = config_dir.join("formcombo");
            for ext in ["toml", "yaml", "json"] {
                paths.push(formcombo_dir.join(format!("config.{}", ext)));
            }
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            for ext in ["toml", "yaml", "json"] {
                paths.push(home_dir.join(format!(".formcombo.{}", ext)));
            }
        }

        paths
    }

    /// Apply `FORMCOMBO_*` environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_REPORT_LIMIT) {
            self.limits.report = parse_limit(ENV_REPORT_LIMIT, &value)?;
        }
        if let Some(value) = lookup(ENV_VARIANT_LIMIT) {
            self.limits.variants = parse_limit(ENV_VARIANT_LIMIT, &value)?;
        }
        if let Some(value) = lookup(ENV_POLICY) {
            self.extraction.policy = value
                .parse()
                .map_err(|e: formcombo_core::Error| Error::config(format!("{}: {}", ENV_POLICY, e)))?;
        }
        Ok(())
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.limits.report == 0 {
            return Err(Error::config("limits.report must be at least 1"));
        }
        if self.limits.variants == 0 {
            return Err(Error::config("limits.variants must be at least 1"));
        }
        if let Some(format) = &self.logging.format {
            if !matches!(format.to_lowercase().as_str(), "compact" | "full" | "json") {
                return Err(Error::config(format!(
                    "logging.format must be one of compact, full, json (got '{}')",
                    format
                )));
            }
        }
        Ok(())
    }

    /// Ceiling for listed configurations
    pub fn report_limit(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.limits.report)
            .ok_or_else(|| Error::config("limits.report must be at least 1"))
    }

    /// Ceiling for planned variants
    pub fn variant_limit(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.limits.variants)
            .ok_or_else(|| Error::config("limits.variants must be at least 1"))
    }

    /// Extractor for listing fields and configurations
    pub fn extractor(&self, policy: Option<RecognitionPolicy>) -> Extractor {
        Extractor::new(
            policy.unwrap_or(self.extraction.policy),
            self.extraction
                .catalog
                .clone()
                .unwrap_or_else(ValueCatalog::configurations),
        )
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize as TOML: {}", e)))?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn parse_limit(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(Error::config(format!(
            "{} must be a positive integer (got '{}')",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.limits.report, 10_000);
        assert_eq!(config.limits.variants, 500);
        assert_eq!(config.extraction.policy, RecognitionPolicy::Valued);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_yaml_with_partial_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("formcombo.yaml");
        fs::write(
            &path,
            "limits:\n  report: 25\nextraction:\n  policy: labeled\n  catalog:\n    text_sample: Hello\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.limits.report, 25);
        assert_eq!(config.limits.variants, 500);
        assert_eq!(config.extraction.policy, RecognitionPolicy::Labeled);

        let catalog = config.extraction.catalog.unwrap();
        assert_eq!(catalog.text_sample.as_deref(), Some("Hello"));
        assert_eq!(catalog.number_sample, Some(123));
    }

    #[test]
    fn test_toml_round_trip_through_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.limits.report = 42;
        config.extraction.policy = RecognitionPolicy::Labeled;
        config.save(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/no/such/formcombo.toml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.limits.report = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.limits.variants = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.format = Some("xml".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_REPORT_LIMIT, "7"),
            (ENV_VARIANT_LIMIT, "3"),
            (ENV_POLICY, "labeled"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.report_limit().unwrap().get(), 7);
        assert_eq!(config.variant_limit().unwrap().get(), 3);
        assert_eq!(config.extraction.policy, RecognitionPolicy::Labeled);
    }

    #[test]
    fn test_invalid_overrides() {
        let mut config = Config::default();
        assert!(config
            .apply_overrides(|key| (key == ENV_REPORT_LIMIT).then(|| "0".to_string()))
            .is_err());
        assert!(config
            .apply_overrides(|key| (key == ENV_POLICY).then(|| "fuzzy".to_string()))
            .is_err());
    }

    #[test]
    fn test_extractor_uses_catalog_override() {
        let catalog = ValueCatalog {
            text_sample: Some("Override".to_string()),
            ..ValueCatalog::configurations()
        };
        let mut config = Config::default();
        config.extraction.catalog = Some(catalog.clone());

        let extractor = config.extractor(None);
        assert_eq!(extractor.catalog(), &catalog);
        assert_eq!(extractor.policy(), RecognitionPolicy::Valued);

        let labeled = config.extractor(Some(RecognitionPolicy::Labeled));
        assert_eq!(labeled.policy(), RecognitionPolicy::Labeled);
    }
}
