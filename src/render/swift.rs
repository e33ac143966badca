//! Swift rendering via the embedded MiniJinja templates

use crate::builder::BuilderDecl;
use crate::defaults::DefaultExpr;
use crate::error::Result;
use crate::format::format_swift;
use crate::keys::KeyMappingDecl;
use crate::synth::Companion;
use crate::templates::context::{BuilderContext, KeyEntryView, KeyMappingContext, MemberView};
use crate::templates::{self, render_template, SWIFT_BUILDER, SWIFT_CODING_KEYS};
use crate::types::{primitive_kind, PrimitiveKind, TypeDescriptor};
use minijinja::Environment;

use super::{AccessLevel, RenderConfig};

pub(super) fn render(companions: &[Companion], config: &RenderConfig) -> Result<String> {
    let custom;
    let env: &Environment<'_> = match &config.template_dir {
        Some(dir) => {
            custom = templates::engine_with_override(dir)?;
            &custom
        }
        None => templates::engine(),
    };

    let mut blocks = Vec::with_capacity(companions.len() + 1);
    if companions.iter().any(needs_foundation) {
        blocks.push("import Foundation".to_string());
    }
    for companion in companions {
        let block = match companion {
            Companion::KeyMapping(keys) => {
                render_template(env, SWIFT_CODING_KEYS, &key_mapping_context(keys, config))?
            }
            Companion::Builder(builder) => {
                render_template(env, SWIFT_BUILDER, &builder_context(builder, config))?
            }
        };
        blocks.push(block);
    }

    Ok(format_swift(&blocks.join("\n\n")))
}

fn key_mapping_context(keys: &KeyMappingDecl, config: &RenderConfig) -> KeyMappingContext {
    KeyMappingContext {
        record: keys.record.clone(),
        access: config.access.prefix().to_string(),
        indent: config.indent.clone(),
        entries: keys
            .entries
            .iter()
            .map(|entry| KeyEntryView {
                field: entry.field.clone(),
                wire: entry.wire_name.clone(),
            })
            .collect(),
    }
}

fn builder_context(builder: &BuilderDecl, config: &RenderConfig) -> BuilderContext {
    BuilderContext {
        record: builder.record.clone(),
        name: builder.name.clone(),
        access: config.access.prefix().to_string(),
        indent: config.indent.clone(),
        public_init: config.access == AccessLevel::Public,
        members: builder
            .members
            .iter()
            .map(|member| MemberView {
                name: member.name.clone(),
                ty: swift_type(&member.ty),
                default: swift_default(&member.default),
            })
            .collect(),
    }
}

/// Swift spelling of a type descriptor
fn swift_type(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Optional(inner) => format!("{}?", swift_type(inner)),
        TypeDescriptor::Array(inner) => format!("[{}]", swift_type(inner)),
        TypeDescriptor::Dictionary(key, value) => {
            format!("[{}: {}]", swift_type(key), swift_type(value))
        }
        TypeDescriptor::Primitive(name) => match primitive_kind(name) {
            Some(PrimitiveKind::Collection) | None => swift_path(name),
            Some(kind) => swift_primitive(kind).to_string(),
        },
        TypeDescriptor::NamedRecord(name) => swift_path(name),
    }
}

fn swift_path(name: &str) -> String {
    name.replace("::", ".")
}

fn swift_primitive(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::String => "String",
        PrimitiveKind::Character => "Character",
        PrimitiveKind::Bool => "Bool",
        PrimitiveKind::Int => "Int",
        PrimitiveKind::Int8 => "Int8",
        PrimitiveKind::Int16 => "Int16",
        PrimitiveKind::Int32 => "Int32",
        PrimitiveKind::Int64 => "Int64",
        PrimitiveKind::UInt => "UInt",
        PrimitiveKind::UInt8 => "UInt8",
        PrimitiveKind::UInt16 => "UInt16",
        PrimitiveKind::UInt32 => "UInt32",
        PrimitiveKind::UInt64 => "UInt64",
        PrimitiveKind::Float => "Float",
        PrimitiveKind::Double => "Double",
        PrimitiveKind::CgFloat => "CGFloat",
        PrimitiveKind::Decimal => "Decimal",
        PrimitiveKind::Date => "Date",
        PrimitiveKind::Uuid => "UUID",
        PrimitiveKind::Url => "URL",
        PrimitiveKind::Data => "Data",
        PrimitiveKind::CgPoint => "CGPoint",
        PrimitiveKind::CgSize => "CGSize",
        PrimitiveKind::CgRect => "CGRect",
        PrimitiveKind::CgVector => "CGVector",
        PrimitiveKind::Collection => "Set",
    }
}

/// Initializer expression; `None` for members that start out absent
fn swift_default(default: &DefaultExpr) -> Option<String> {
    let expr = match default {
        DefaultExpr::Absent => return None,
        DefaultExpr::EmptySequence => "[]".to_string(),
        DefaultExpr::EmptyMap => "[:]".to_string(),
        DefaultExpr::NestedBuild { builder } => format!("{}().build()", swift_path(builder)),
        DefaultExpr::Zero(kind) => match kind {
            PrimitiveKind::String => "\"\"",
            PrimitiveKind::Character => "\"\\u{0}\"",
            PrimitiveKind::Bool => "false",
            PrimitiveKind::Decimal => "Decimal()",
            PrimitiveKind::Date => "Date()",
            PrimitiveKind::Uuid => "UUID()",
            PrimitiveKind::Url => "URL(fileURLWithPath: \"/\")",
            PrimitiveKind::Data => "Data()",
            PrimitiveKind::Collection => "[]",
            PrimitiveKind::CgPoint
            | PrimitiveKind::CgSize
            | PrimitiveKind::CgRect
            | PrimitiveKind::CgVector => ".zero",
            // integer and floating-point kinds
            _ => "0",
        }
        .to_string(),
    };
    Some(expr)
}

fn needs_foundation(companion: &Companion) -> bool {
    match companion {
        Companion::KeyMapping(_) => false,
        Companion::Builder(builder) => builder.members.iter().any(|m| foundation_type(&m.ty)),
    }
}

fn foundation_type(ty: &TypeDescriptor) -> bool {
    match ty {
        TypeDescriptor::Optional(inner) | TypeDescriptor::Array(inner) => foundation_type(inner),
        TypeDescriptor::Dictionary(key, value) => foundation_type(key) || foundation_type(value),
        TypeDescriptor::Primitive(name) | TypeDescriptor::NamedRecord(name) => matches!(
            primitive_kind(name),
            Some(
                PrimitiveKind::CgFloat
                    | PrimitiveKind::Decimal
                    | PrimitiveKind::Date
                    | PrimitiveKind::Uuid
                    | PrimitiveKind::Url
                    | PrimitiveKind::Data
                    | PrimitiveKind::CgPoint
                    | PrimitiveKind::CgSize
                    | PrimitiveKind::CgRect
                    | PrimitiveKind::CgVector
            )
        ),
    }
}
