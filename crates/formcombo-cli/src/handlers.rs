//! Command handlers for CLI subcommands
//!
//! Each subcommand lives in its own module; this module re-exports the
//! entry points used by `main`.

mod combinations;
mod completions;
mod config;
mod fields;
mod plan;
mod report;
mod report_all;
mod utils;

pub use combinations::handle_combinations;
pub use completions::handle_completions;
pub use config::handle_config;
pub use fields::handle_fields;
pub use plan::handle_plan;
pub use report::handle_report;
pub use report_all::handle_report_all;
