//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use formcombo_core::RecognitionPolicy;
use is_terminal::IsTerminal;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// formcombo - inspect authoring dialogs and enumerate their configurations
///
/// Reads dialog schemas (JSON or YAML), discovers their configurable fields
/// and lists every combination of representative values, bounded by a
/// safety limit.
#[derive(Parser, Debug)]
#[command(
    name = "formcombo",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FORMCOMBO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the configurable fields of a dialog schema
    Fields(FieldsArgs),

    /// Report every labeled field of a dialog, grouped by tab
    Report(ReportArgs),

    /// Report the fields of every component dialog below a directory
    ReportAll(ReportAllArgs),

    /// Enumerate the configurations of a dialog schema
    Combinations(CombinationsArgs),

    /// Plan one labeled variant per configuration of a dialog
    Plan(PlanArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the fields command
#[derive(Parser, Debug)]
pub struct FieldsArgs {
    /// Path to the dialog schema (JSON or YAML)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// How schema nodes are recognized as fields
    #[arg(short, long, value_enum)]
    pub policy: Option<Policy>,
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Path to the dialog schema (JSON or YAML)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Arguments for the report-all command
#[derive(Parser, Debug)]
pub struct ReportAllArgs {
    /// Directory searched recursively for component dialogs
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// File stem identifying dialog files (any supported extension)
    #[arg(long, default_value = "_cq_dialog")]
    pub dialog: String,
}

/// Arguments for the combinations command
#[derive(Parser, Debug)]
pub struct CombinationsArgs {
    /// Path to the dialog schema (JSON or YAML)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Maximum number of configurations to list (overrides configuration)
    #[arg(short, long)]
    pub limit: Option<NonZeroUsize>,

    /// How schema nodes are recognized as fields
    #[arg(short, long, value_enum)]
    pub policy: Option<Policy>,

    /// Component name to include in the report (defaults to the schema path)
    #[arg(long)]
    pub component: Option<String>,
}

/// Arguments for the plan command
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Path to the dialog schema (JSON or YAML)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Maximum number of variants (overrides configuration)
    #[arg(short, long)]
    pub limit: Option<NonZeroUsize>,

    /// Component name recorded in the plan (defaults to the schema path)
    #[arg(long)]
    pub component: Option<String>,

    /// Save the plan as JSON to a file
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init(ConfigInitArgs),

    /// Show current configuration values
    Show(ConfigShowArgs),

    /// Validate current configuration
    Validate,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Target file (defaults to the user configuration file)
    #[arg(long, value_name = "FILE")]
    pub path: Option<PathBuf>,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Field recognition policy
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Any node carrying a non-empty field label
    Labeled,
    /// Nodes with a name and a resource type that yield values
    Valued,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<Policy> for RecognitionPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Labeled => RecognitionPolicy::Labeled,
            Policy::Valued => RecognitionPolicy::Valued,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
