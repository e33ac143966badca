//! Error types for declsynth
//!
//! These cover host-level failures (unreadable input, bad config, template
//! problems). Synthesis failures for a single declaration are reported as
//! [`Diagnostic`](crate::diagnostics::Diagnostic) values instead.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// declsynth errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema parse error: {0}")]
    SchemaParse(String),

    #[error("Code parse error: {0}")]
    CodeParse(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<minijinja::Error> for Error {
    fn from(e: minijinja::Error) -> Self {
        Error::Template(e.to_string())
    }
}
