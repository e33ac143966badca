//! Builder synthesis
//!
//! The builder mirrors the record: one mutable member per field with the
//! same type, initialized to its default, and a zero-argument `build()` that
//! passes every member to the record's initializer by name, in field order.

use crate::defaults::{builder_name, default_for, DefaultExpr};
use crate::extract::Field;
use crate::types::TypeDescriptor;

/// The builder companion of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderDecl {
    pub record: String,
    pub name: String,
    pub members: Vec<BuilderMember>,
}

/// One builder member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderMember {
    pub name: String,
    pub ty: TypeDescriptor,
    pub default: DefaultExpr,
}

impl BuilderDecl {
    /// Builders of nested records this builder's defaults rely on
    pub fn nested_builders(&self) -> impl Iterator<Item = &str> {
        self.members.iter().filter_map(|m| match &m.default {
            DefaultExpr::NestedBuild { builder } => Some(builder.as_str()),
            _ => None,
        })
    }
}

/// Build the builder declaration for a record's fields
pub fn synthesize_builder(record: &str, fields: &[Field]) -> BuilderDecl {
    let members = fields
        .iter()
        .map(|field| BuilderMember {
            name: field.name.clone(),
            ty: field.ty.clone(),
            default: default_for(&field.ty),
        })
        .collect();

    BuilderDecl {
        record: record.to_string(),
        name: builder_name(record),
        members,
    }
}
