//! Custom MiniJinja filters for code generation
//!
//! - identifier escaping for Swift keywords
//! - string literal escaping

use minijinja::Environment;

/// Register all custom filters with the environment
pub fn register_filters(env: &mut Environment<'_>) {
    env.add_filter("swift_ident", swift_ident);
    env.add_filter("escape_string", escape_string);
}

/// Swift keywords that need backticks when used as identifiers
static SWIFT_KEYWORDS: &[&str] = &[
    "associatedtype",
    "class",
    "deinit",
    "enum",
    "extension",
    "fileprivate",
    "func",
    "import",
    "init",
    "inout",
    "internal",
    "let",
    "open",
    "operator",
    "private",
    "protocol",
    "public",
    "rethrows",
    "static",
    "struct",
    "subscript",
    "typealias",
    "var",
    "break",
    "case",
    "continue",
    "default",
    "defer",
    "do",
    "else",
    "fallthrough",
    "for",
    "guard",
    "if",
    "in",
    "repeat",
    "return",
    "switch",
    "where",
    "while",
    "as",
    "catch",
    "false",
    "is",
    "nil",
    "super",
    "self",
    "Self",
    "throw",
    "throws",
    "true",
    "try",
];

/// Wrap Swift keywords in backticks
fn swift_ident(value: &str) -> String {
    if SWIFT_KEYWORDS.contains(&value) {
        format!("`{}`", value)
    } else {
        value.to_string()
    }
}

/// Escape string for use in a generated string literal
fn escape_string(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
