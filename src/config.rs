//! Project configuration
//!
//! Handles loading of `declsynth.yaml`, either from an explicit path or by
//! walking up from the working directory. Every key is optional.

use crate::error::{Error, Result};
use crate::render::{AccessLevel, RenderConfig, Target, DEFAULT_RUST_DERIVES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file name
pub const CONFIG_FILE: &str = "declsynth.yaml";

/// Project configuration (`declsynth.yaml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Targets generated when none is given on the command line
    pub targets: Vec<Target>,

    pub access: AccessLevel,

    /// Emit the provenance header
    pub provenance: bool,

    /// Add a timestamp to the provenance header
    pub timestamp: bool,

    /// Indentation used in Swift output
    pub indent: String,

    /// Directory overriding the embedded templates; relative to the config file
    pub template_dir: Option<PathBuf>,

    pub rust: RustConfig,

    pub naming: NamingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: vec![Target::Swift],
            access: AccessLevel::Internal,
            provenance: true,
            timestamp: false,
            indent: "    ".to_string(),
            template_dir: None,
            rust: RustConfig::default(),
            naming: NamingConfig::default(),
        }
    }
}

/// Rust output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RustConfig {
    /// Derives placed on generated key enums
    pub derives: Vec<String>,
}

impl Default for RustConfig {
    fn default() -> Self {
        Self {
            derives: DEFAULT_RUST_DERIVES.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Naming convention for generated files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Output file pattern: {name}, {target}, {ext}
    pub output: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            output: "{name}+Generated.{ext}".to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_norway::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))
    }

    /// Serialize to YAML (used by `init`)
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a config file; `template_dir` is resolved against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_yaml(&content)?;

        if let (Some(dir), Some(parent)) = (&config.template_dir, path.parent()) {
            if dir.is_relative() {
                config.template_dir = Some(parent.join(dir));
            }
        }

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Find `declsynth.yaml` in `start` or any ancestor
    pub fn discover(start: &Path) -> Result<Option<Self>> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Self::load(&candidate).map(Some);
            }
        }
        Ok(None)
    }

    /// Rendering options derived from this config
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            access: self.access,
            provenance: self.provenance,
            timestamp: self.timestamp,
            indent: self.indent.clone(),
            rust_derives: self.rust.derives.clone(),
            template_dir: self.template_dir.clone(),
            source: None,
        }
    }

    /// Apply the naming pattern to produce an output file name
    pub fn output_file_name(&self, name: &str, target: Target) -> String {
        self.naming
            .output
            .replace("{name}", name)
            .replace("{target}", target.name())
            .replace("{ext}", target.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_yaml(
            r#"
targets: [swift, rust]
access: public
rust:
  derives: [Debug, serde::Serialize]
"#,
        )
        .unwrap();

        assert_eq!(config.targets, vec![Target::Swift, Target::Rust]);
        assert_eq!(config.access, AccessLevel::Public);
        assert!(config.provenance);
        assert_eq!(config.rust.derives, vec!["Debug", "serde::Serialize"]);
        assert_eq!(config.naming, NamingConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::from_yaml("targets: [cobol]").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_naming_pattern() {
        let config = Config::default();
        assert_eq!(
            config.output_file_name("Models", Target::Swift),
            "Models+Generated.swift"
        );

        let config = Config {
            naming: NamingConfig {
                output: "{name}_{target}.{ext}".into(),
            },
            ..Config::default()
        };
        assert_eq!(config.output_file_name("models", Target::Rust), "models_rust.rs");
    }

    #[test]
    fn test_render_config_carries_settings() {
        let config = Config {
            access: AccessLevel::Public,
            timestamp: true,
            indent: "\t".into(),
            ..Config::default()
        };
        let render = config.render_config();
        assert_eq!(render.access, AccessLevel::Public);
        assert!(render.timestamp);
        assert_eq!(render.indent, "\t");
        assert!(render.source.is_none());
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = Config::default().to_yaml().unwrap();
        assert_eq!(Config::from_yaml(&yaml).unwrap(), Config::default());
    }
}
