//! Default-value mapping for builder members
//!
//! Decision order:
//!
//! 1. optional → no default (the member starts out absent)
//! 2. array → empty sequence
//! 3. dictionary → empty map
//! 4. primitive table hit → that kind's zero value (standard collections
//!    other than array and dictionary count as primitives here)
//! 5. anything else → `<Type>Builder` is assumed to exist and its `build()`
//!    result is used
//!
//! Step 5 is a naming convention, not something checked here: every nested
//! record type needs its own builder for the generated code to compile.

use crate::types::{primitive_kind, PrimitiveKind, TypeDescriptor};

/// Suffix appended to a record name to form its builder's name
pub const BUILDER_SUFFIX: &str = "Builder";

/// Name of the builder synthesized for `record`
pub fn builder_name(record: &str) -> String {
    format!("{}{}", record, BUILDER_SUFFIX)
}

/// A default value, independent of the target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultExpr {
    /// Optional member; starts out absent
    Absent,
    EmptySequence,
    EmptyMap,
    Zero(PrimitiveKind),
    /// `<builder>().build()` of a nested record
    NestedBuild { builder: String },
}

impl DefaultExpr {
    pub fn is_absent(&self) -> bool {
        matches!(self, DefaultExpr::Absent)
    }
}

/// Default value for a field of the given type
pub fn default_for(ty: &TypeDescriptor) -> DefaultExpr {
    match ty {
        TypeDescriptor::Optional(_) => DefaultExpr::Absent,
        TypeDescriptor::Array(_) => DefaultExpr::EmptySequence,
        TypeDescriptor::Dictionary(..) => DefaultExpr::EmptyMap,
        TypeDescriptor::Primitive(name) | TypeDescriptor::NamedRecord(name) => {
            match primitive_kind(name) {
                Some(kind) => DefaultExpr::Zero(kind),
                None => DefaultExpr::NestedBuild {
                    builder: builder_name(generic_base(name)),
                },
            }
        }
    }
}

/// `Page<Item>` → `Page`; the builder of a generic record is named after its base
fn generic_base(name: &str) -> &str {
    name.split_once('<').map_or(name, |(base, _)| base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("String", DefaultExpr::Zero(PrimitiveKind::String))]
    #[case("Int", DefaultExpr::Zero(PrimitiveKind::Int))]
    #[case("u16", DefaultExpr::Zero(PrimitiveKind::UInt16))]
    #[case("Double", DefaultExpr::Zero(PrimitiveKind::Double))]
    #[case("Bool", DefaultExpr::Zero(PrimitiveKind::Bool))]
    #[case("UUID", DefaultExpr::Zero(PrimitiveKind::Uuid))]
    #[case("CGRect", DefaultExpr::Zero(PrimitiveKind::CgRect))]
    #[case("String?", DefaultExpr::Absent)]
    #[case("Address?", DefaultExpr::Absent)]
    #[case("[Address]", DefaultExpr::EmptySequence)]
    #[case("[String]?", DefaultExpr::Absent)]
    #[case("[String: Int]", DefaultExpr::EmptyMap)]
    #[case("Optional<String>", DefaultExpr::Absent)]
    #[case("Optional<Address>", DefaultExpr::Absent)]
    #[case("Array<Int>", DefaultExpr::EmptySequence)]
    #[case("Dictionary<String, Int>", DefaultExpr::EmptyMap)]
    #[case("Array<Int>?", DefaultExpr::Absent)]
    #[case("Set<String>", DefaultExpr::Zero(PrimitiveKind::Collection))]
    #[case("std::collections::HashSet<String>", DefaultExpr::Zero(PrimitiveKind::Collection))]
    fn test_default_for(#[case] expr: &str, #[case] expected: DefaultExpr) {
        let ty = TypeDescriptor::parse(expr).unwrap();
        assert_eq!(default_for(&ty), expected);
    }

    #[test]
    fn test_nested_record_falls_back_to_builder() {
        let ty = TypeDescriptor::parse("Address").unwrap();
        assert_eq!(
            default_for(&ty),
            DefaultExpr::NestedBuild {
                builder: "AddressBuilder".into()
            }
        );
    }

    #[test]
    fn test_table_lookup_wins_over_classification() {
        // A descriptor built by hand as a named record still hits the table
        let ty = TypeDescriptor::NamedRecord("Date".into());
        assert_eq!(default_for(&ty), DefaultExpr::Zero(PrimitiveKind::Date));
    }

    #[test]
    fn test_generic_record_builder_uses_base_name() {
        let ty = TypeDescriptor::parse("models::Page<Item>").unwrap();
        assert_eq!(
            default_for(&ty),
            DefaultExpr::NestedBuild {
                builder: "models::PageBuilder".into()
            }
        );
    }
}
