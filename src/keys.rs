//! Key-mapping synthesis
//!
//! One entry per field, in field order. An entry without a wire name is a
//! bare case: its wire name is the field name.

use crate::extract::Field;
use crate::policy::Strategy;

/// Name of the key enumeration inside the record's scope
pub const KEY_ENUM_NAME: &str = "CodingKeys";

/// The key-mapping companion of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMappingDecl {
    pub record: String,
    pub entries: Vec<KeyEntry>,
}

/// One key case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub field: String,
    /// Explicit wire name; `None` for a bare case
    pub wire_name: Option<String>,
}

impl KeyEntry {
    /// The wire name this case serializes as
    pub fn wire(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.field)
    }

    pub fn is_bare(&self) -> bool {
        self.wire_name.is_none()
    }
}

impl KeyMappingDecl {
    /// Name of a standalone key enumeration (`<Record>CodingKeys`)
    pub fn standalone_name(&self) -> String {
        format!("{}{}", self.record, KEY_ENUM_NAME)
    }

    pub fn explicit_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_bare()).count()
    }
}

/// Build the key mapping from resolved strategies
///
/// `strategies` must line up with `fields` (as produced by
/// [`crate::policy::resolve`]).
pub fn synthesize_keys(record: &str, fields: &[Field], strategies: &[Strategy]) -> KeyMappingDecl {
    debug_assert_eq!(fields.len(), strategies.len());

    let entries = fields
        .iter()
        .zip(strategies)
        .map(|(field, strategy)| KeyEntry {
            field: field.name.clone(),
            wire_name: match strategy {
                Strategy::MapTo(wire) if *wire != field.name => Some(wire.clone()),
                _ => None,
            },
        })
        .collect();

    KeyMappingDecl {
        record: record.to_string(),
        entries,
    }
}
