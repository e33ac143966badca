//! Synthesis: one declaration in, companion declarations or diagnostics out
//!
//! ```text
//! RecordDecl
//!     │
//!     ├── attribute checks (record kind, duplicates)
//!     ├── extract_fields ─────────────┐
//!     │                               │
//!     ├── coding_keys: policy ─► validate ─► resolve ─► KeyMappingDecl
//!     └── builder:     defaults ─────────────────────► BuilderDecl
//! ```
//!
//! Any diagnostic aborts the whole declaration: it yields either all of its
//! companions or none. Declarations never affect each other.

use crate::builder::{synthesize_builder, BuilderDecl};
use crate::diagnostics::{validate_policy, Anchor, Diagnostic, DiagnosticKind};
use crate::extract::{extract_fields, Field};
use crate::keys::{synthesize_keys, KeyMappingDecl};
use crate::policy::{resolve, GenerationPolicy};
use crate::schema::{Attribute, MacroKind, RecordDecl, SchemaFile};
use std::collections::HashSet;
use tracing::{debug, debug_span};

/// A synthesized declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Companion {
    KeyMapping(KeyMappingDecl),
    Builder(BuilderDecl),
}

impl Companion {
    pub fn record(&self) -> &str {
        match self {
            Companion::KeyMapping(keys) => &keys.record,
            Companion::Builder(builder) => &builder.record,
        }
    }

    pub fn macro_kind(&self) -> MacroKind {
        match self {
            Companion::KeyMapping(_) => MacroKind::CodingKeys,
            Companion::Builder(_) => MacroKind::Builder,
        }
    }
}

/// Result of synthesizing one declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub record: String,
    pub result: Result<Vec<Companion>, Vec<Diagnostic>>,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn companions(&self) -> &[Companion] {
        match &self.result {
            Ok(companions) => companions,
            Err(_) => &[],
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match &self.result {
            Ok(_) => &[],
            Err(diagnostics) => diagnostics,
        }
    }
}

/// Drives synthesis for declarations
///
/// Holds no state between declarations.
#[derive(Debug, Default, Clone, Copy)]
pub struct Synthesizer;

impl Synthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Synthesize every companion requested on a declaration
    pub fn synthesize(&self, decl: &RecordDecl) -> Result<Vec<Companion>, Vec<Diagnostic>> {
        let span = debug_span!("synthesize", record = %decl.name);
        let _enter = span.enter();

        let mut diagnostics = check_attributes(decl);

        let fields = match extract_fields(decl) {
            Ok(fields) => fields,
            Err(extract_errors) => {
                diagnostics.extend(extract_errors);
                return Err(diagnostics);
            }
        };

        if !diagnostics.is_empty() {
            return Err(diagnostics);
        }

        let mut companions = Vec::with_capacity(decl.attributes.len());
        for attr in &decl.attributes {
            let anchor = attribute_anchor(decl, attr);
            let companion = match attr.kind {
                MacroKind::CodingKeys => key_mapping_companion(decl, attr, &fields, &anchor),
                MacroKind::Builder => builder_companion(decl, attr, &fields),
            };
            match companion {
                Ok(companion) => {
                    debug!(companion = %attr.kind, "synthesized");
                    companions.push(companion);
                }
                Err(diagnostic) => diagnostics.push(Diagnostic::error(diagnostic.0, anchor)),
            }
        }

        if diagnostics.is_empty() {
            Ok(companions)
        } else {
            Err(diagnostics)
        }
    }

    /// Synthesize every declaration of a schema, independently
    ///
    /// Declarations without synthesis attributes are skipped.
    pub fn synthesize_schema(&self, schema: &SchemaFile) -> Vec<Outcome> {
        schema
            .records
            .iter()
            .filter(|decl| !decl.attributes.is_empty())
            .map(|decl| Outcome {
                record: decl.name.clone(),
                result: self.synthesize(decl),
            })
            .collect()
    }
}

/// Failure of a single companion, anchored by the caller
struct CompanionError(DiagnosticKind);

fn attribute_anchor(decl: &RecordDecl, attr: &Attribute) -> Anchor {
    Anchor::Attribute {
        record: decl.name.clone(),
        macro_kind: attr.kind,
        span: attr.span.or(decl.span),
    }
}

/// Structural checks that do not need the field list
fn check_attributes(decl: &RecordDecl) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut seen = HashSet::new();

    for attr in &decl.attributes {
        let anchor = attribute_anchor(decl, attr);

        if !decl.kind.is_record() {
            diagnostics.push(Diagnostic::error(
                DiagnosticKind::requires_record_type(attr.kind, decl.kind),
                anchor,
            ));
            continue;
        }

        if !seen.insert(attr.kind) {
            diagnostics.push(Diagnostic::error(
                DiagnosticKind::DuplicateAttribute {
                    macro_kind: attr.kind,
                },
                anchor,
            ));
            continue;
        }

        if attr.kind == MacroKind::Builder && decl.generic {
            diagnostics.push(Diagnostic::error(
                DiagnosticKind::RequiresRecordType {
                    macro_kind: attr.kind,
                    found: format!("generic {}", decl.kind),
                },
                anchor,
            ));
        }
    }

    diagnostics
}

fn key_mapping_companion(
    decl: &RecordDecl,
    attr: &Attribute,
    fields: &[Field],
    anchor: &Anchor,
) -> Result<Companion, CompanionError> {
    let policy =
        GenerationPolicy::from_argument(attr.argument.as_ref()).map_err(CompanionError)?;

    if let Some(diagnostic) = validate_policy(&decl.name, &policy, fields, anchor) {
        return Err(CompanionError(diagnostic.kind));
    }

    let strategies = resolve(&policy, fields);
    Ok(Companion::KeyMapping(synthesize_keys(
        &decl.name,
        fields,
        &strategies,
    )))
}

fn builder_companion(
    decl: &RecordDecl,
    attr: &Attribute,
    fields: &[Field],
) -> Result<Companion, CompanionError> {
    if let Some(argument) = attr.argument.as_ref().filter(|arg| !arg.is_empty()) {
        return Err(CompanionError(DiagnosticKind::InvalidArgument {
            macro_kind: MacroKind::Builder,
            argument: argument.to_string(),
        }));
    }

    Ok(Companion::Builder(synthesize_builder(&decl.name, fields)))
}
