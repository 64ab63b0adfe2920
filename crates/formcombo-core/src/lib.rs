//! Formcombo Core - dialog schema introspection and configuration enumeration
//!
//! This crate discovers the fields of a hierarchical authoring dialog and
//! enumerates every distinct configuration of that dialog, bounded by a
//! caller-supplied safety limit.
//!
//! # Main Components
//!
//! - **Value Synthesizer**: representative values per field type ([`ValueCatalog`])
//! - **Schema Extractor**: recursive field discovery with tabbed and flat layouts ([`Extractor`])
//! - **Combination Generator**: bounded, order-preserving Cartesian product ([`generate`])
//! - **Reports**: serializable field, combination, batch and variant-plan reports
//! - **Loader**: JSON and YAML schema documents from disk
//!
//! # Example
//!
//! ```
//! use formcombo_core::{generate, Extractor, DEFAULT_REPORT_LIMIT};
//! use serde_json::json;
//!
//! let dialog = json!({
//!     "content": {"items": {"tabs": {"items": {
//!         "main": {"items": {
//!             "size": {
//!                 "name": "./size",
//!                 "sling:resourceType": "granite/ui/components/coral/foundation/form/select",
//!                 "items": {"s": {"value": "small"}, "l": {"value": "large"}}
//!             },
//!             "bold": {
//!                 "name": "./bold",
//!                 "sling:resourceType": "granite/ui/components/coral/foundation/form/checkbox"
//!             }
//!         }}
//!     }}}}
//! });
//!
//! let fields = Extractor::for_configurations().extract(&dialog);
//! let result = generate(&fields, DEFAULT_REPORT_LIMIT);
//! assert_eq!(result.total_count, 4);
//! assert_eq!(result.configurations[0].describe(), "size = small, bold = true");
//! ```

pub mod combinations;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod plan;
pub mod report;
pub mod synthesizer;
pub mod types;

// Re-export main types for convenience
pub use combinations::{
    describe, generate, total_combinations, DEFAULT_REPORT_LIMIT, DEFAULT_VARIANT_LIMIT,
};
pub use error::{Error, Result};
pub use extractor::{extract, Extractor, Layout, RecognitionPolicy};
pub use loader::{LoaderError, SchemaParser};
pub use plan::{VariantPlan, VariantSpec};
pub use report::{BatchReport, CombinationReport, ComponentReport, FieldGroup, FieldReport, ReportedField};
pub use synthesizer::{synthesize, ValueCatalog};
pub use types::{CombinationResult, Configuration, FieldDescriptor, FieldValue, SchemaNode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
