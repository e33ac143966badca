//! Template context structures
//!
//! Companion declarations flattened into the string-only views the Swift
//! templates consume. Type spellings and defaults are resolved before they
//! get here.

use serde::Serialize;

/// Context for `swift/coding_keys.jinja`
#[derive(Debug, Clone, Serialize)]
pub struct KeyMappingContext {
    /// Record the extension is attached to
    pub record: String,
    /// Access modifier including its trailing space, or empty
    pub access: String,
    pub indent: String,
    pub entries: Vec<KeyEntryView>,
}

/// One `case` line
#[derive(Debug, Clone, Serialize)]
pub struct KeyEntryView {
    pub field: String,
    /// Raw value; `None` for a bare case
    pub wire: Option<String>,
}

/// Context for `swift/builder.jinja`
#[derive(Debug, Clone, Serialize)]
pub struct BuilderContext {
    pub record: String,
    /// Builder type name
    pub name: String,
    pub access: String,
    pub indent: String,
    /// Emit an explicit `public init() {}`
    pub public_init: bool,
    pub members: Vec<MemberView>,
}

/// One `var` line of a builder
#[derive(Debug, Clone, Serialize)]
pub struct MemberView {
    pub name: String,
    /// Swift type spelling
    pub ty: String,
    /// Initializer expression; `None` leaves the member without one
    pub default: Option<String>,
}
