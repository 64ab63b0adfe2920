//! Schema parsing for JSON and YAML documents

use crate::loader::error::{LoaderError, LoaderResult};
use crate::types::SchemaNode;
use std::path::Path;
use tracing::debug;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }

    /// Whether `path` carries one of the supported extensions
    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}

/// Parser turning schema documents into JSON trees
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    /// Create a new schema parser
    pub fn new() -> Self {
        Self
    }

    /// Read, parse and validate a schema file
    ///
    /// Files with an unknown extension are sniffed, JSON first.
    pub fn load(&self, path: &Path) -> LoaderResult<SchemaNode> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;
        debug!(path = %path.display(), bytes = content.len(), "Read schema file");

        let (value, format) = self.parse_with_fallback(&content, path)?;
        debug!(path = %path.display(), format = ?format, "Parsed schema document");

        self.validate_root(&value, path)?;
        Ok(value)
    }

    /// Parse a schema file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<SchemaNode> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        self.parse_content(&content, format, path)
    }

    /// Parse schema content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<SchemaNode> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<SchemaNode> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        // Mapping order survives the conversion
        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<SchemaNode> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse content, trying the extension's format first, then JSON, then YAML
    pub fn parse_with_fallback(&self, content: &str, path: &Path) -> LoaderResult<(SchemaNode, Format)> {
        if let Ok(format) = Format::from_path(path) {
            return self.parse_content(content, format, path).map(|value| (value, format));
        }

        if let Ok(value) = self.parse_json(content, path) {
            return Ok((value, Format::Json));
        }

        if let Ok(value) = self.parse_yaml(content, path) {
            return Ok((value, Format::Yaml));
        }

        Err(LoaderError::unsupported_format(path.to_path_buf()))
    }

    /// Check that the document root is an object
    pub fn validate_root(&self, value: &SchemaNode, path: &Path) -> LoaderResult<()> {
        if value.is_object() {
            Ok(())
        } else {
            Err(LoaderError::invalid_document(
                path.to_path_buf(),
                "schema must be a JSON object at the root level",
            ))
        }
    }
}
