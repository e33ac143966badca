//! Rust code generation using genco
//!
//! The key mapping becomes a standalone `<Record>CodingKeys` enum whose
//! variants are the field names; explicit wire names are carried as serde
//! renames. The builder is a plain struct with a `Default` impl and a
//! consuming `build()`.

use crate::builder::BuilderDecl;
use crate::defaults::DefaultExpr;
use crate::error::{Error, Result};
use crate::format::format_rust;
use crate::keys::KeyMappingDecl;
use crate::synth::Companion;
use crate::types::{primitive_kind, split_generic_args, PrimitiveKind, TypeDescriptor};
use genco::prelude::*;

use super::RenderConfig;

/// Render companions to formatted Rust code
pub(super) fn render(companions: &[Companion], config: &RenderConfig) -> Result<String> {
    let renderer = RustRenderer { config };
    let mut tokens = rust::Tokens::new();
    for companion in companions {
        match companion {
            Companion::KeyMapping(keys) => tokens.append(renderer.key_mapping(keys)),
            Companion::Builder(builder) => tokens.append(renderer.builder(builder)),
        }
        tokens.line();
    }

    let code = tokens
        .to_file_string()
        .map_err(|e| Error::Render(format!("Failed to write Rust tokens: {}", e)))?;
    Ok(format_rust(&code)?)
}

struct RustRenderer<'a> {
    config: &'a RenderConfig,
}

impl<'a> RustRenderer<'a> {
    fn key_mapping(&self, keys: &KeyMappingDecl) -> rust::Tokens {
        let name = keys.standalone_name();
        let derives = &self.config.rust_derives;
        let serde = derives
            .iter()
            .any(|d| d.ends_with("Serialize") || d.ends_with("Deserialize"));

        quote! {
            #[allow(non_camel_case_types)]
            $(if !derives.is_empty() {
                #[derive($(for derive in derives join (, ) => $derive))]
            })
            pub enum $(&name) {
                $(for entry in &keys.entries join ($['\r']) =>
                    $(if serde {
                        $(for wire in &entry.wire_name => #[serde(rename = $(quoted(wire)))]$['\r'])
                    })
                    $(ident(&entry.field)),
                )
            }
            $['\n']
            impl $(&name) {
                pub const ALL: $("&'static [Self]") = &[
                    $(for entry in &keys.entries join (, ) => Self::$(ident(&entry.field)))
                ];
                $['\n']
                pub fn as_str(&self) -> $("&'static str") {
                    match *self {
                        $(for entry in &keys.entries join ($['\r']) =>
                            Self::$(ident(&entry.field)) => $(quoted(entry.wire())),
                        )
                    }
                }
            }
        }
    }

    fn builder(&self, builder: &BuilderDecl) -> rust::Tokens {
        let name = &builder.name;
        let record = &builder.record;

        quote! {
            pub struct $name {
                $(for member in &builder.members join ($['\r']) =>
                    pub $(ident(&member.name)): $(rust_type(&member.ty)),
                )
            }
            $['\n']
            impl Default for $name {
                fn default() -> Self {
                    Self {
                        $(for member in &builder.members join ($['\r']) =>
                            $(ident(&member.name)): $(rust_default(&member.default, &member.ty)),
                        )
                    }
                }
            }
            $['\n']
            impl $name {
                pub fn build(self) -> $record {
                    $record {
                        $(for member in &builder.members join ($['\r']) =>
                            $(ident(&member.name)): self.$(ident(&member.name)),
                        )
                    }
                }
            }
        }
    }
}

/// Rust spelling of a type descriptor
fn rust_type(ty: &TypeDescriptor) -> rust::Tokens {
    match ty {
        TypeDescriptor::Optional(inner) => quote!(Option<$(rust_type(inner))>),
        TypeDescriptor::Array(inner) => quote!(Vec<$(rust_type(inner))>),
        TypeDescriptor::Dictionary(key, value) => {
            let map = rust::import("std::collections", "HashMap");
            quote!($map<$(rust_type(key)), $(rust_type(value))>)
        }
        TypeDescriptor::Primitive(name) => primitive_type(name),
        TypeDescriptor::NamedRecord(name) => quote!($(name.as_str())),
    }
}

/// Rust spelling of a primitive
///
/// Swift spellings map to their Rust counterpart. Unqualified names of types
/// outside the prelude are imported whichever way they are spelled (`UUID` and
/// `Uuid` both give `use uuid::Uuid;`); qualified paths are written as given.
fn primitive_type(name: &str) -> rust::Tokens {
    if name.contains("::") {
        return quote!($name);
    }

    match primitive_kind(name) {
        Some(PrimitiveKind::Data) => quote!(Vec<u8>),
        Some(PrimitiveKind::Date) => quote!($(rust::import("std::time", "SystemTime"))),
        Some(PrimitiveKind::Uuid) => quote!($(rust::import("uuid", "Uuid"))),
        Some(PrimitiveKind::Url) => quote!($(rust::import("url", "Url"))),
        Some(PrimitiveKind::Decimal) => quote!($(rust::import("rust_decimal", "Decimal"))),
        Some(PrimitiveKind::Collection) => collection_type(name),
        _ => quote!($(scalar_name(name))),
    }
}

fn scalar_name(name: &str) -> &str {
    match name {
        "Int" | "Int64" => "i64",
        "Int8" => "i8",
        "Int16" => "i16",
        "Int32" => "i32",
        "UInt" | "UInt64" => "u64",
        "UInt8" => "u8",
        "UInt16" => "u16",
        "UInt32" => "u32",
        "Float" | "Float32" => "f32",
        "Double" | "Float64" | "CGFloat" => "f64",
        "Bool" => "bool",
        "Character" => "char",
        other => other,
    }
}

/// `Set<Int>` → `HashSet<i64>`; the base comes from `std::collections`
fn collection_type(name: &str) -> rust::Tokens {
    let (base, args) = match name.split_once('<') {
        Some((base, rest)) => (
            base,
            rest.strip_suffix('>').map(split_generic_args).unwrap_or_default(),
        ),
        None => (name, Vec::new()),
    };
    let base = match base {
        "Set" => "HashSet",
        other => other,
    };
    let base = rust::import("std::collections", base.to_string());
    if args.is_empty() {
        return quote!($base);
    }

    let args: Vec<rust::Tokens> = args
        .iter()
        .map(|arg| match TypeDescriptor::parse(arg) {
            Ok(ty) => rust_type(&ty),
            Err(_) => quote!($(*arg)),
        })
        .collect();
    quote!($base<$(for arg in args join (, ) => $arg)>)
}

fn rust_default(default: &DefaultExpr, ty: &TypeDescriptor) -> rust::Tokens {
    match default {
        DefaultExpr::Absent => quote!(None),
        DefaultExpr::EmptySequence => quote!(Vec::new()),
        DefaultExpr::EmptyMap => {
            let map = rust::import("std::collections", "HashMap");
            quote!($map::new())
        }
        DefaultExpr::NestedBuild { builder } => quote!($(builder.as_str())::default().build()),
        DefaultExpr::Zero(kind) => match kind {
            PrimitiveKind::String => quote!(String::new()),
            PrimitiveKind::Character => quote!($("'\\0'")),
            PrimitiveKind::Bool => quote!(false),
            PrimitiveKind::Data => quote!(Vec::new()),
            PrimitiveKind::Decimal => quote!($(rust_type(ty))::ZERO),
            PrimitiveKind::Date => quote!($(rust_type(ty))::UNIX_EPOCH),
            PrimitiveKind::Uuid => quote!($(rust_type(ty))::nil()),
            PrimitiveKind::Url => {
                quote!($(rust_type(ty))::parse($(quoted("file:///"))).expect($(quoted("valid URL literal"))))
            }
            PrimitiveKind::Collection => quote!(Default::default()),
            k if k.is_integer() => quote!(0),
            k if k.is_float() => quote!(0.0),
            _ => quote!(Default::default()),
        },
    }
}

/// Rust keywords usable as raw identifiers
static RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Field name as a Rust identifier, raw if it is a keyword
fn ident(name: &str) -> String {
    if RUST_KEYWORDS.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}
