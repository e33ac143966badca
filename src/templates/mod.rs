//! Template-based Swift generation
//!
//! Uses MiniJinja templates for the Swift companions. Templates are embedded
//! by default, with optional override via:
//! - `--template-dir` CLI flag
//! - `declsynth.yaml`: `template_dir`
//!
//! An override directory mirrors the embedded layout (`swift/coding_keys.jinja`,
//! `swift/builder.jinja`); missing files fall back to the embedded version.

pub mod context;
pub mod filters;

use minijinja::Environment;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Error, Result};

pub const SWIFT_CODING_KEYS: &str = "swift/coding_keys.jinja";
pub const SWIFT_BUILDER: &str = "swift/builder.jinja";

// Embedded templates (compiled into binary)
mod embedded {
    pub const SWIFT_CODING_KEYS: &str = include_str!("../../templates/swift/coding_keys.jinja");
    pub const SWIFT_BUILDER: &str = include_str!("../../templates/swift/builder.jinja");
}

/// Template engine singleton
static ENGINE: OnceLock<Environment<'static>> = OnceLock::new();

/// Initialize the template engine with embedded templates
fn init_engine() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(false);

    filters::register_filters(&mut env);

    env.add_template(SWIFT_CODING_KEYS, embedded::SWIFT_CODING_KEYS)
        .expect("Failed to load swift coding keys template");
    env.add_template(SWIFT_BUILDER, embedded::SWIFT_BUILDER)
        .expect("Failed to load swift builder template");

    env
}

/// Get the global template engine
pub fn engine() -> &'static Environment<'static> {
    ENGINE.get_or_init(init_engine)
}

/// Create a new template engine with custom template directory
///
/// Templates in `custom_dir` override embedded templates.
pub fn engine_with_override(custom_dir: &Path) -> Result<Environment<'static>> {
    let mut env = init_engine();

    for name in [SWIFT_CODING_KEYS, SWIFT_BUILDER] {
        let path = custom_dir.join(name);
        if !path.exists() {
            continue;
        }
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::Template(format!("Failed to read {}: {}", path.display(), e))
        })?;
        env.add_template_owned(name, content)
            .map_err(|e| Error::Template(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(template = name, path = %path.display(), "template override loaded");
    }

    Ok(env)
}

/// Render a named template with the given context
pub fn render_template<S: Serialize>(
    env: &Environment<'_>,
    name: &str,
    ctx: &S,
) -> Result<String> {
    let template = env.get_template(name)?;
    Ok(template.render(ctx)?)
}

#[cfg(test)]
mod tests {
    use super::context::{KeyEntryView, KeyMappingContext};
    use super::*;
    use pretty_assertions::assert_eq;

    fn hoge_keys() -> KeyMappingContext {
        KeyMappingContext {
            record: "Hoge".into(),
            access: String::new(),
            indent: "    ".into(),
            entries: vec![
                KeyEntryView {
                    field: "hogeHoge".into(),
                    wire: Some("hoge_hoge".into()),
                },
                KeyEntryView {
                    field: "fuga".into(),
                    wire: None,
                },
            ],
        }
    }

    #[test]
    fn test_engine_initialization() {
        let env = engine();
        assert!(env.get_template(SWIFT_CODING_KEYS).is_ok());
        assert!(env.get_template(SWIFT_BUILDER).is_ok());
    }

    #[test]
    fn test_render_coding_keys() {
        let code = render_template(engine(), SWIFT_CODING_KEYS, &hoge_keys()).unwrap();
        assert_eq!(
            code,
            "extension Hoge {\n    enum CodingKeys: String, CodingKey {\n        case hogeHoge = \"hoge_hoge\"\n        case fuga\n    }\n}"
        );
    }

    #[test]
    fn test_override_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("swift")).unwrap();
        std::fs::write(
            dir.path().join(SWIFT_CODING_KEYS),
            "// keys for {{ record }}: {{ entries | length }}",
        )
        .unwrap();

        let env = engine_with_override(dir.path()).unwrap();
        let code = render_template(&env, SWIFT_CODING_KEYS, &hoge_keys()).unwrap();
        assert_eq!(code, "// keys for Hoge: 2");

        // Not overridden, still embedded
        assert!(env.get_template(SWIFT_BUILDER).is_ok());
    }

    #[test]
    fn test_override_with_broken_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("swift")).unwrap();
        std::fs::write(dir.path().join(SWIFT_BUILDER), "{% for %}").unwrap();

        let err = engine_with_override(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }
}
