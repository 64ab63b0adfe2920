//! Schema document loading
//!
//! Dialog schemas arrive as already-fetched documents. This module turns a
//! file or an in-memory string into the [`SchemaNode`](crate::SchemaNode)
//! tree the extractor walks:
//! - JSON and YAML parsing, detected from the file extension
//! - Content sniffing when the extension is unknown
//! - Root shape validation (the document must be an object)
//!
//! # Example Usage
//!
//! ```no_run
//! use formcombo_core::loader::SchemaParser;
//! use std::path::Path;
//!
//! let parser = SchemaParser::new();
//! let dialog = parser.load(Path::new("_cq_dialog.json"))?;
//! println!("Top-level keys: {}", dialog.as_object().map_or(0, |o| o.len()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod parser;

pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
