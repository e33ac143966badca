//! Code rendering: companion declarations to source text
//!
//! Two targets:
//! - Swift, through the MiniJinja templates in `templates/swift`
//! - Rust, built with genco and formatted with prettyplease
//!
//! Renderers only see successfully synthesized companions. Diagnostics are
//! reported by the caller and never rendered.

mod rust;
mod swift;

use crate::error::{Error, Result};
use crate::schema::source_hash;
use crate::synth::{Companion, Outcome};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Output language
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Swift,
    Rust,
}

impl Target {
    /// File extension of generated files
    pub fn extension(self) -> &'static str {
        match self {
            Target::Swift => "swift",
            Target::Rust => "rs",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Target::Swift => "swift",
            Target::Rust => "rust",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "swift" => Ok(Target::Swift),
            "rust" | "rs" => Ok(Target::Rust),
            other => Err(Error::Other(format!(
                "Unknown target '{}' (expected swift or rust)",
                other
            ))),
        }
    }
}

/// Access level of generated declarations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// No modifier
    #[default]
    Internal,
    Public,
}

impl AccessLevel {
    /// Modifier with trailing space, or empty for the implicit level
    pub fn prefix(self) -> &'static str {
        match self {
            AccessLevel::Internal => "",
            AccessLevel::Public => "public ",
        }
    }
}

/// Derives placed on Rust key enums unless configured otherwise
pub const DEFAULT_RUST_DERIVES: &[&str] = &[
    "Debug",
    "Clone",
    "Copy",
    "PartialEq",
    "Eq",
    "Hash",
    "serde::Serialize",
    "serde::Deserialize",
];

/// Where the rendered declarations came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    /// Display name, usually the input file name
    pub name: String,
    /// Content hash (`sha256:...`)
    pub hash: String,
}

impl SourceInfo {
    pub fn new(name: impl Into<String>, content: &str) -> Self {
        Self {
            name: name.into(),
            hash: source_hash(content),
        }
    }
}

/// Render configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub access: AccessLevel,
    /// Include provenance header
    pub provenance: bool,
    /// Add a generation timestamp to the provenance header
    pub timestamp: bool,
    /// Indentation (Swift; Rust output is laid out by prettyplease)
    pub indent: String,
    pub rust_derives: Vec<String>,
    /// Directory overriding the embedded Swift templates
    pub template_dir: Option<PathBuf>,
    pub source: Option<SourceInfo>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            access: AccessLevel::Internal,
            provenance: true,
            timestamp: false,
            indent: "    ".into(),
            rust_derives: DEFAULT_RUST_DERIVES.iter().map(|d| d.to_string()).collect(),
            template_dir: None,
            source: None,
        }
    }
}

impl RenderConfig {
    pub fn with_source(mut self, name: impl Into<String>, content: &str) -> Self {
        self.source = Some(SourceInfo::new(name, content));
        self
    }
}

/// Render companions to target source text
pub fn render(companions: &[Companion], target: Target, config: &RenderConfig) -> Result<String> {
    let body = match target {
        Target::Swift => swift::render(companions, config)?,
        Target::Rust => rust::render(companions, config)?,
    };

    let mut out = provenance_header(config);
    out.push_str(&body);
    Ok(out)
}

/// Render the companions of every successful outcome, in outcome order
pub fn render_outcomes(outcomes: &[Outcome], target: Target, config: &RenderConfig) -> Result<String> {
    let companions: Vec<Companion> = outcomes
        .iter()
        .flat_map(|outcome| outcome.companions().iter().cloned())
        .collect();
    render(&companions, target, config)
}

/// `//` comment block; both targets share the comment syntax
fn provenance_header(config: &RenderConfig) -> String {
    if !config.provenance {
        return String::new();
    }

    let mut header = String::new();
    match &config.source {
        Some(source) => {
            header.push_str(&format!("// Generated by declsynth from {}\n", source.name));
            header.push_str(&format!("// Source hash: {}\n", source.hash));
        }
        None => header.push_str("// Generated by declsynth\n"),
    }
    if config.timestamp {
        header.push_str(&format!("// Generated at: {}\n", Utc::now().to_rfc3339()));
    }
    header.push_str("// DO NOT EDIT - regenerate from the source declarations\n\n");
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_parse_and_display() {
        assert_eq!("swift".parse::<Target>().unwrap(), Target::Swift);
        assert_eq!("Rust".parse::<Target>().unwrap(), Target::Rust);
        assert_eq!("rs".parse::<Target>().unwrap(), Target::Rust);
        assert!("kotlin".parse::<Target>().is_err());
        assert_eq!(Target::Rust.to_string(), "rust");
        assert_eq!(Target::Swift.extension(), "swift");
        assert_eq!(Target::Rust.extension(), "rs");
    }

    #[test]
    fn test_access_prefix() {
        assert_eq!(AccessLevel::default().prefix(), "");
        assert_eq!(AccessLevel::Public.prefix(), "public ");
    }

    #[test]
    fn test_provenance_header() {
        let config = RenderConfig::default().with_source("models.yaml", "records: []");
        let header = provenance_header(&config);
        assert!(header.starts_with("// Generated by declsynth from models.yaml\n"));
        assert!(header.contains("// Source hash: sha256:"));
        assert!(header.contains("DO NOT EDIT"));
        assert!(!header.contains("Generated at"));

        let config = RenderConfig {
            timestamp: true,
            ..config
        };
        assert!(provenance_header(&config).contains("// Generated at: "));

        let config = RenderConfig {
            provenance: false,
            ..RenderConfig::default()
        };
        assert_eq!(provenance_header(&config), "");
    }

    #[test]
    fn test_render_is_deterministic_without_timestamp() {
        let config = RenderConfig::default().with_source("a.yaml", "x");
        let first = render(&[], Target::Swift, &config).unwrap();
        let second = render(&[], Target::Swift, &config).unwrap();
        assert_eq!(first, second);
    }
}
