// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # declsynth - declaration synthesis for annotated records
//!
//! Reads record declarations carrying synthesis attributes and produces
//! companion declarations next to them:
//!
//! - **`coding_keys`**: a key mapping from field names to wire names, driven
//!   by a generation policy (`all`, `select`, `exclude`, `custom`)
//! - **`builder`**: a `<Record>Builder` with one defaulted member per field
//!   and a `build()` that constructs the record
//!
//! Problems with a declaration are reported as [`Diagnostic`]s anchored at
//! the offending node. A declaration with any diagnostic produces nothing.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use declsynth::{render_outcomes, RenderConfig, SchemaFile, Synthesizer, Target};
//!
//! let schema = SchemaFile::from_yaml(r#"
//! records:
//!   - name: Hoge
//!     attributes:
//!       - coding_keys: all
//!     members:
//!       - name: hogeHoge
//!         type: String
//!       - name: fuga
//!         type: String
//! "#)?;
//!
//! let outcomes = Synthesizer::new().synthesize_schema(&schema);
//! for diagnostic in outcomes.iter().flat_map(|o| o.diagnostics()) {
//!     eprintln!("{}", diagnostic);
//! }
//!
//! let swift = render_outcomes(&outcomes, Target::Swift, &RenderConfig::default())?;
//! // extension Hoge {
//! //     enum CodingKeys: String, CodingKey {
//! //         case hogeHoge = "hoge_hoge"
//! //         case fuga
//! //     }
//! // }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! schema (YAML/JSON) ──┐
//!                      ├──► RecordDecl ──► Synthesizer ──┬──► Companion ──► render(Swift | Rust)
//! Rust source (syn) ───┘                                 └──► Diagnostic
//! ```
//!
//! Synthesis itself is pure: no I/O and no state shared between
//! declarations.

// Core model
pub mod error;
pub mod schema;
pub mod types;

// Synthesis pipeline
pub mod builder;
pub mod casing;
pub mod defaults;
pub mod diagnostics;
pub mod extract;
pub mod keys;
pub mod policy;
pub mod synth;

// Front-ends and output
pub mod config;
pub mod format;
pub mod parse;
pub mod render;
pub mod templates;

// Re-exports
pub use builder::{synthesize_builder, BuilderDecl, BuilderMember};
pub use casing::to_wire_case;
pub use config::Config;
pub use defaults::{default_for, DefaultExpr};
pub use diagnostics::{Anchor, Diagnostic, DiagnosticKind, Severity};
pub use error::{Error, Result};
pub use extract::{extract_fields, Field};
pub use keys::{synthesize_keys, KeyEntry, KeyMappingDecl};
pub use parse::{parse_input, parse_rust, InputFormat};
pub use policy::{GenerationPolicy, Strategy};
pub use render::{render, render_outcomes, AccessLevel, RenderConfig, Target};
pub use schema::{ArgValue, Attribute, DeclKind, MacroKind, Member, RecordDecl, SchemaFile};
pub use synth::{Companion, Outcome, Synthesizer};
pub use types::TypeDescriptor;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
