//! Diagnostics: structured errors returned instead of companion declarations
//!
//! Every diagnostic aborts synthesis for the declaration it belongs to and
//! nothing else. There is no warning tier.

use crate::extract::Field;
use crate::policy::GenerationPolicy;
use crate::schema::{DeclKind, MacroKind, Span};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Severity level (errors only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticKind {
    #[error("{macro_kind} can only be applied to a struct or class, not {found}")]
    RequiresRecordType { macro_kind: MacroKind, found: String },

    #[error("{macro_kind} requires an argument")]
    NoArgument { macro_kind: MacroKind },

    #[error("invalid argument for {macro_kind}: {argument}")]
    InvalidArgument {
        macro_kind: MacroKind,
        argument: String,
    },

    #[error("property `{}` does not exist in `{record}`", .properties.join(", "))]
    NonexistentProperty {
        record: String,
        properties: Vec<String>,
    },

    #[error("member #{index} of `{record}` has no identifier")]
    MissingIdentifier { record: String, index: usize },

    #[error("member `{member}` of `{record}` has no resolvable type{}", .reason.as_ref().map(|r| format!(": {}", r)).unwrap_or_default())]
    MissingType {
        record: String,
        member: String,
        reason: Option<String>,
    },

    #[error("{macro_kind} is attached more than once")]
    DuplicateAttribute { macro_kind: MacroKind },
}

impl DiagnosticKind {
    /// Stable diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::RequiresRecordType { .. } => "E0001",
            DiagnosticKind::NoArgument { .. } => "E0002",
            DiagnosticKind::InvalidArgument { .. } => "E0003",
            DiagnosticKind::NonexistentProperty { .. } => "E0004",
            DiagnosticKind::MissingIdentifier { .. } => "E0005",
            DiagnosticKind::MissingType { .. } => "E0006",
            DiagnosticKind::DuplicateAttribute { .. } => "E0007",
        }
    }

    pub fn requires_record_type(macro_kind: MacroKind, found: DeclKind) -> Self {
        DiagnosticKind::RequiresRecordType {
            macro_kind,
            found: found.to_string(),
        }
    }
}

/// The node a diagnostic is reported against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Anchor {
    Declaration {
        record: String,
        span: Option<Span>,
    },
    Attribute {
        record: String,
        macro_kind: MacroKind,
        span: Option<Span>,
    },
    Member {
        record: String,
        index: usize,
        span: Option<Span>,
    },
}

impl Anchor {
    pub fn span(&self) -> Option<Span> {
        match self {
            Anchor::Declaration { span, .. }
            | Anchor::Attribute { span, .. }
            | Anchor::Member { span, .. } => *span,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Declaration { record, .. } => write!(f, "{}", record),
            Anchor::Attribute {
                record, macro_kind, ..
            } => write!(f, "{} on {}", macro_kind, record),
            Anchor::Member { record, index, .. } => write!(f, "{} member #{}", record, index),
        }?;
        if let Some(span) = self.span() {
            write!(f, " ({})", span)?;
        }
        Ok(())
    }
}

/// A reportable synthesis failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub kind: DiagnosticKind,
    pub anchor: Anchor,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, anchor: Anchor) -> Self {
        Self {
            severity: Severity::Error,
            code: kind.code(),
            message: kind.to_string(),
            kind,
            anchor,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {}\n  --> {}",
            self.severity, self.code, self.message, self.anchor
        )
    }
}

/// Check that every name a policy references exists among the fields
///
/// Unknown names are reported once, in the order the policy lists them.
pub fn validate_policy(
    record: &str,
    policy: &GenerationPolicy,
    fields: &[Field],
    anchor: &Anchor,
) -> Option<Diagnostic> {
    let known: HashSet<&str> = fields.iter().map(|f| f.name.as_str()).collect();

    let missing: Vec<String> = policy
        .referenced_names()
        .filter(|name| !known.contains(name))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        return None;
    }

    Some(Diagnostic::error(
        DiagnosticKind::NonexistentProperty {
            record: record.to_string(),
            properties: missing,
        },
        anchor.clone(),
    ))
}
