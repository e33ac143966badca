//! Input front-ends
//!
//! Turns source text into a [`SchemaFile`]:
//! - schema files (YAML or JSON) map directly onto the schema types
//! - Rust sources are parsed with `syn`; annotated items become declarations

mod rust;

use crate::error::{Error, Result};
use crate::schema::{SchemaFile, Span};
use std::path::Path;

pub use rust::parse_rust;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Yaml,
    Json,
    Rust,
}

impl InputFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(InputFormat::Yaml),
            Some("json") => Ok(InputFormat::Json),
            Some("rs") => Ok(InputFormat::Rust),
            _ => Err(Error::Other(format!(
                "Cannot determine input format of {} (expected .yaml, .yml, .json or .rs)",
                path.display()
            ))),
        }
    }
}

/// Parse source text in the given format
pub fn parse_input(content: &str, format: InputFormat) -> Result<SchemaFile> {
    match format {
        InputFormat::Yaml => SchemaFile::from_yaml(content),
        InputFormat::Json => SchemaFile::from_json(content),
        InputFormat::Rust => parse_rust(content),
    }
}

/// Line/column of a token span
pub(crate) fn span_of(span: proc_macro2::Span) -> Span {
    let start = span.start();
    Span {
        line: start.line,
        column: start.column,
    }
}
