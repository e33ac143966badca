//! Schema types: the language-agnostic input model
//!
//! A schema file lists record declarations. Each declaration carries its
//! members (in declaration order) and the synthesis attributes attached to it.
//!
//! ## Example Schema
//!
//! ```yaml
//! records:
//!   - name: Hoge
//!     attributes:
//!       - coding_keys: all
//!       - builder
//!     members:
//!       - name: hogeHoge
//!         type: String
//!       - name: fuga
//!         type: String
//! ```
//!
//! Attribute arguments are kept as untyped [`ArgValue`]s; turning them into a
//! policy (and rejecting bad shapes) is the job of [`crate::policy`].

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete schema file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaFile {
    #[serde(default)]
    pub records: Vec<RecordDecl>,
}

/// One declaration in the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDecl {
    pub name: String,

    #[serde(default)]
    pub kind: DeclKind,

    #[serde(default)]
    pub attributes: Vec<Attribute>,

    #[serde(default)]
    pub members: Vec<Member>,

    /// Declares type parameters (only the Rust front-end sets this)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub generic: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// Declaration kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    #[default]
    Struct,
    Class,
    Enum,
    Protocol,
    Actor,
    Extension,
    Union,
    Trait,
}

impl DeclKind {
    /// Record types have a fixed set of named stored fields
    pub fn is_record(self) -> bool {
        matches!(self, DeclKind::Struct | DeclKind::Class)
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeclKind::Struct => "struct",
            DeclKind::Class => "class",
            DeclKind::Enum => "enum",
            DeclKind::Protocol => "protocol",
            DeclKind::Actor => "actor",
            DeclKind::Extension => "extension",
            DeclKind::Union => "union",
            DeclKind::Trait => "trait",
        };
        write!(f, "{}", s)
    }
}

/// A member as written in the declaration
///
/// `name` and `ty` are optional here so that malformed members survive
/// loading and are reported by the field extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,

    /// Computed/derived members are not stored and never become fields
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub computed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ty: Some(ty.into()),
            computed: false,
            span: None,
        }
    }
}

/// The synthesizers an attribute can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MacroKind {
    #[serde(rename = "coding_keys", alias = "CodingKeys")]
    CodingKeys,
    #[serde(rename = "builder", alias = "Builder")]
    Builder,
}

impl fmt::Display for MacroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacroKind::CodingKeys => write!(f, "@CodingKeys"),
            MacroKind::Builder => write!(f, "@Builder"),
        }
    }
}

/// An attribute invocation attached to a declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAttribute", into = "RawAttribute")]
pub struct Attribute {
    pub kind: MacroKind,
    pub argument: Option<ArgValue>,
    pub span: Option<Span>,
}

impl Attribute {
    pub fn new(kind: MacroKind, argument: Option<ArgValue>) -> Self {
        Self {
            kind,
            argument,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// Serialized attribute forms: `builder` or `{coding_keys: <argument>}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawAttribute {
    Bare(MacroKind),
    Invocation(IndexMap<MacroKind, Option<ArgValue>>),
}

impl TryFrom<RawAttribute> for Attribute {
    type Error = String;

    fn try_from(raw: RawAttribute) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawAttribute::Bare(kind) => Ok(Attribute::new(kind, None)),
            RawAttribute::Invocation(map) => {
                if map.len() != 1 {
                    return Err(format!(
                        "an attribute names exactly one macro, found {}",
                        map.len()
                    ));
                }
                let (kind, argument) = map.into_iter().next().ok_or("empty attribute")?;
                Ok(Attribute::new(kind, argument))
            }
        }
    }
}

impl From<Attribute> for RawAttribute {
    fn from(attr: Attribute) -> Self {
        match attr.argument {
            None => RawAttribute::Bare(attr.kind),
            Some(argument) => {
                RawAttribute::Invocation(IndexMap::from([(attr.kind, Some(argument))]))
            }
        }
    }
}

/// An untyped attribute argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ArgValue>),
    Map(IndexMap<String, ArgValue>),
    Null,
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// True for arguments that carry nothing (`""`, `[]`, `{}`)
    pub fn is_empty(&self) -> bool {
        match self {
            ArgValue::String(s) => s.trim().is_empty(),
            ArgValue::List(items) => items.is_empty(),
            ArgValue::Map(map) => map.is_empty(),
            ArgValue::Null => true,
            _ => false,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::String(s.to_string())
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::Float(fl) => write!(f, "{}", fl),
            ArgValue::String(s) => write!(f, "\"{}\"", s),
            ArgValue::List(items) => {
                let strs: Vec<_> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", strs.join(", "))
            }
            ArgValue::Map(map) => {
                let pairs: Vec<_> = map.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "[{}]", pairs.join(", "))
            }
            ArgValue::Null => write!(f, "null"),
        }
    }
}

/// Source location (1-based line, 0-based column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl SchemaFile {
    /// Parse schema from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::SchemaParse(e.to_string()))
    }

    /// Serialize schema to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::SchemaParse(e.to_string()))
    }

    /// Parse schema from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::SchemaParse(e.to_string()))
    }

    /// Serialize schema to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::SchemaParse(e.to_string()))
    }

    /// Get a record by name
    pub fn get_record(&self, name: &str) -> Option<&RecordDecl> {
        self.records.iter().find(|r| r.name == name)
    }
}

/// Content hash of a source text, for provenance headers
pub fn source_hash(content: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
}
