//! Rust front-end - annotated Rust items to schema declarations
//!
//! Recognized attributes:
//!
//! ```rust,ignore
//! #[coding_keys(all)]
//! #[coding_keys(select("first_name", "age"))]
//! #[coding_keys(exclude("internal_id"))]
//! #[coding_keys(custom(first_name = "given"))]
//! #[builder]
//! ```
//!
//! Items without either attribute are ignored. Attribute arguments are only
//! reshaped into [`ArgValue`]s here; judging them is left to the policy code.

use crate::error::{Error, Result};
use crate::schema::{ArgValue, Attribute, DeclKind, MacroKind, Member, RecordDecl, SchemaFile};
use indexmap::IndexMap;
use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, Fields, GenericArgument, Item, Lit, LitStr, Meta, MetaNameValue, PathArguments, Token, Type};
use tracing::trace;

use super::span_of;

pub fn parse_rust(source: &str) -> Result<SchemaFile> {
    let file = syn::parse_file(source).map_err(|e| {
        let at = span_of(e.span());
        Error::CodeParse(format!("{} at {}", e, at))
    })?;

    let mut records = Vec::new();
    collect_items(&file.items, &mut records);

    trace!(records = records.len(), "parsed rust source");
    Ok(SchemaFile { records })
}

fn collect_items(items: &[Item], records: &mut Vec<RecordDecl>) {
    for item in items {
        let decl = match item {
            Item::Struct(s) => declaration(
                &s.ident,
                DeclKind::Struct,
                &s.attrs,
                !s.generics.params.is_empty(),
                members(&s.fields),
                item,
            ),
            Item::Enum(e) => declaration(&e.ident, DeclKind::Enum, &e.attrs, false, vec![], item),
            Item::Union(u) => {
                declaration(&u.ident, DeclKind::Union, &u.attrs, false, vec![], item)
            }
            Item::Trait(t) => {
                declaration(&t.ident, DeclKind::Trait, &t.attrs, false, vec![], item)
            }
            Item::Mod(m) => {
                if let Some((_, nested)) = &m.content {
                    collect_items(nested, records);
                }
                None
            }
            _ => None,
        };

        if let Some(decl) = decl {
            records.push(decl);
        }
    }
}

fn declaration(
    ident: &syn::Ident,
    kind: DeclKind,
    attrs: &[syn::Attribute],
    generic: bool,
    members: Vec<Member>,
    item: &Item,
) -> Option<RecordDecl> {
    let attributes = synthesis_attributes(attrs);
    if attributes.is_empty() {
        return None;
    }

    Some(RecordDecl {
        name: ident.unraw().to_string(),
        kind,
        attributes,
        members,
        generic,
        span: Some(span_of(item.span())),
    })
}

fn members(fields: &Fields) -> Vec<Member> {
    fields
        .iter()
        .map(|field| Member {
            name: field.ident.as_ref().map(|i| i.unraw().to_string()),
            ty: type_expr(&field.ty),
            computed: false,
            span: Some(span_of(field.span())),
        })
        .collect()
}

fn synthesis_attributes(attrs: &[syn::Attribute]) -> Vec<Attribute> {
    attrs
        .iter()
        .filter_map(|attr| {
            let kind = if attr.path().is_ident("coding_keys") {
                MacroKind::CodingKeys
            } else if attr.path().is_ident("builder") {
                MacroKind::Builder
            } else {
                return None;
            };

            let argument = match &attr.meta {
                Meta::Path(_) => None,
                Meta::List(list) => argument(&list.tokens),
                Meta::NameValue(nv) => Some(raw(nv.value.to_token_stream())),
            };

            Some(Attribute::new(kind, argument).with_span(span_of(attr.span())))
        })
        .collect()
}

/// Reshape attribute tokens; anything unrecognized is kept as raw text
fn argument(tokens: &TokenStream) -> Option<ArgValue> {
    if tokens.is_empty() {
        return None;
    }

    let metas = match Punctuated::<Meta, Token![,]>::parse_terminated.parse2(tokens.clone()) {
        Ok(metas) => metas,
        Err(_) => return Some(raw(tokens.clone())),
    };

    let mut values: Vec<ArgValue> = metas.iter().map(meta_value).collect();
    match values.len() {
        0 => None,
        1 => values.pop(),
        _ => Some(ArgValue::List(values)),
    }
}

fn meta_value(meta: &Meta) -> ArgValue {
    let Some(selector) = meta.path().get_ident().map(|i| i.to_string()) else {
        return raw(meta.to_token_stream());
    };

    match meta {
        Meta::Path(_) => ArgValue::String(selector),
        Meta::List(list) => {
            let inner = match selector.as_str() {
                "select" | "exclude" => string_list(&list.tokens),
                "custom" => string_map(&list.tokens),
                _ => None,
            };
            match inner {
                Some(value) => ArgValue::Map(IndexMap::from([(selector, value)])),
                None => raw(meta.to_token_stream()),
            }
        }
        Meta::NameValue(_) => raw(meta.to_token_stream()),
    }
}

fn string_list(tokens: &TokenStream) -> Option<ArgValue> {
    let names = Punctuated::<LitStr, Token![,]>::parse_terminated
        .parse2(tokens.clone())
        .ok()?;
    Some(ArgValue::List(
        names.iter().map(|lit| ArgValue::String(lit.value())).collect(),
    ))
}

fn string_map(tokens: &TokenStream) -> Option<ArgValue> {
    let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated
        .parse2(tokens.clone())
        .ok()?;

    let mut map = IndexMap::new();
    for pair in &pairs {
        let field = pair.path.get_ident()?.unraw().to_string();
        let Expr::Lit(lit) = &pair.value else {
            return None;
        };
        let Lit::Str(wire) = &lit.lit else {
            return None;
        };
        map.insert(field, ArgValue::String(wire.value()));
    }
    Some(ArgValue::Map(map))
}

fn raw(tokens: TokenStream) -> ArgValue {
    ArgValue::String(tokens.to_string())
}

/// Schema type expression for a Rust type, if it has one
///
/// `Option`, `Vec` and `HashMap` become `T?`, `[T]` and `[K: V]`; any other
/// path keeps its Rust spelling (other std collections are then looked up in
/// the primitive table). Pointer and cell wrappers have no schema counterpart.
fn type_expr(ty: &Type) -> Option<String> {
    match ty {
        Type::Paren(p) => type_expr(&p.elem),
        Type::Group(g) => type_expr(&g.elem),
        Type::Path(tp) if tp.qself.is_none() => {
            let last = tp.path.segments.last()?;
            let args = type_args(&last.arguments)?;
            match (last.ident.to_string().as_str(), args.as_slice()) {
                ("Option", [inner]) => Some(format!("{}?", type_expr(inner)?)),
                ("Vec", [inner]) => Some(format!("[{}]", type_expr(inner)?)),
                ("HashMap", [key, value]) => {
                    Some(format!("[{}: {}]", type_expr(key)?, type_expr(value)?))
                }
                ("Box" | "Rc" | "Arc" | "Cell" | "RefCell" | "Mutex" | "RwLock", _) => None,
                _ => rust_spelling(ty),
            }
        }
        _ => None,
    }
}

/// Type arguments of a path segment; `None` for shapes the schema cannot carry
fn type_args(arguments: &PathArguments) -> Option<Vec<&Type>> {
    match arguments {
        PathArguments::None => Some(vec![]),
        PathArguments::AngleBracketed(angle) => angle
            .args
            .iter()
            .map(|arg| match arg {
                GenericArgument::Type(t) => Some(t),
                _ => None,
            })
            .collect(),
        PathArguments::Parenthesized(_) => None,
    }
}

/// Normalized Rust spelling of a path type (`a::B<C, D>`)
fn rust_spelling(ty: &Type) -> Option<String> {
    match ty {
        Type::Paren(p) => rust_spelling(&p.elem),
        Type::Group(g) => rust_spelling(&g.elem),
        Type::Path(tp) if tp.qself.is_none() => {
            let mut segments = Vec::with_capacity(tp.path.segments.len());
            for segment in &tp.path.segments {
                let args = type_args(&segment.arguments)?;
                let mut text = segment.ident.unraw().to_string();
                if !args.is_empty() {
                    let inner: Option<Vec<String>> = args.into_iter().map(rust_spelling).collect();
                    text.push('<');
                    text.push_str(&inner?.join(", "));
                    text.push('>');
                }
                segments.push(text);
            }
            let path = segments.join("::");
            if tp.path.leading_colon.is_some() {
                Some(format!("::{}", path))
            } else {
                Some(path)
            }
        }
        _ => None,
    }
}
