//! Key-mapping policies and their per-field resolution
//!
//! A policy comes from the `coding_keys` attribute argument:
//!
//! | Argument | Policy |
//! |----------|--------|
//! | `all` | every field is case-converted |
//! | `{select: [a, b]}` | only the listed fields are case-converted |
//! | `{exclude: [a, b]}` | every field except the listed ones is case-converted |
//! | `{custom: {a: x}}` | listed fields use the literal wire name, the rest are case-converted |
//!
//! Resolution always ends with the identity collapse: a wire name equal to
//! the field name becomes [`Strategy::Skip`].

use crate::casing::to_wire_case;
use crate::diagnostics::DiagnosticKind;
use crate::extract::Field;
use crate::schema::{ArgValue, MacroKind};
use indexmap::{IndexMap, IndexSet};

/// Which fields receive an explicit wire name, and which one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationPolicy {
    All,
    Select(IndexSet<String>),
    Exclude(IndexSet<String>),
    Custom(IndexMap<String, String>),
}

/// Per-field outcome
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Strategy {
    MapTo(String),
    Skip,
}

impl Strategy {
    pub fn wire_name(&self) -> Option<&str> {
        match self {
            Strategy::MapTo(wire) => Some(wire),
            Strategy::Skip => None,
        }
    }
}

impl GenerationPolicy {
    /// Interpret a `coding_keys` argument
    pub fn from_argument(argument: Option<&ArgValue>) -> Result<Self, DiagnosticKind> {
        let argument = match argument {
            Some(arg) if !arg.is_empty() => arg,
            _ => {
                return Err(DiagnosticKind::NoArgument {
                    macro_kind: MacroKind::CodingKeys,
                })
            }
        };

        let invalid = || DiagnosticKind::InvalidArgument {
            macro_kind: MacroKind::CodingKeys,
            argument: argument.to_string(),
        };

        match argument {
            ArgValue::String(selector) if selector_name(selector) == "all" => {
                Ok(GenerationPolicy::All)
            }
            ArgValue::Map(map) if map.len() == 1 => {
                let (selector, value) = map.iter().next().ok_or_else(invalid)?;
                match selector_name(selector) {
                    "select" => name_set(value)
                        .map(GenerationPolicy::Select)
                        .ok_or_else(invalid),
                    "exclude" => name_set(value)
                        .map(GenerationPolicy::Exclude)
                        .ok_or_else(invalid),
                    "custom" => wire_map(value)
                        .map(GenerationPolicy::Custom)
                        .ok_or_else(invalid),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }

    /// Field names the policy refers to, in the order they were written
    pub fn referenced_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            GenerationPolicy::All => Box::new(std::iter::empty()),
            GenerationPolicy::Select(names) | GenerationPolicy::Exclude(names) => {
                Box::new(names.iter().map(String::as_str))
            }
            GenerationPolicy::Custom(map) => Box::new(map.keys().map(String::as_str)),
        }
    }

    /// Strategy for one field, before the identity collapse
    fn strategy_for(&self, field: &Field) -> Strategy {
        let converted = || Strategy::MapTo(to_wire_case(&field.name));
        match self {
            GenerationPolicy::All => converted(),
            GenerationPolicy::Select(names) => {
                if names.contains(&field.name) {
                    converted()
                } else {
                    Strategy::Skip
                }
            }
            GenerationPolicy::Exclude(names) => {
                if names.contains(&field.name) {
                    Strategy::Skip
                } else {
                    converted()
                }
            }
            GenerationPolicy::Custom(map) => match map.get(&field.name) {
                Some(wire) => Strategy::MapTo(wire.clone()),
                None => converted(),
            },
        }
    }
}

/// `.select` and `select` name the same selector
fn selector_name(raw: &str) -> &str {
    raw.trim().trim_start_matches('.')
}

fn name_set(value: &ArgValue) -> Option<IndexSet<String>> {
    match value {
        ArgValue::List(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}

fn wire_map(value: &ArgValue) -> Option<IndexMap<String, String>> {
    match value {
        ArgValue::Map(map) => map
            .iter()
            .map(|(field, wire)| wire.as_str().map(|w| (field.clone(), w.to_string())))
            .collect(),
        _ => None,
    }
}

/// Collapse a mapping that equals the field name to [`Strategy::Skip`]
pub fn normalize(field: &Field, strategy: Strategy) -> Strategy {
    match strategy {
        Strategy::MapTo(wire) if wire == field.name => Strategy::Skip,
        other => other,
    }
}

/// Resolve a strategy for every field, in field order
pub fn resolve(policy: &GenerationPolicy, fields: &[Field]) -> Vec<Strategy> {
    fields
        .iter()
        .map(|field| normalize(field, policy.strategy_for(field)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeDescriptor;
    use pretty_assertions::assert_eq;

    fn fields(names: &[&str]) -> Vec<Field> {
        names
            .iter()
            .map(|n| Field::new(*n, TypeDescriptor::Primitive("String".into())))
            .collect()
    }

    fn map_to(s: &str) -> Strategy {
        Strategy::MapTo(s.into())
    }

    fn arg(yaml: &str) -> ArgValue {
        serde_norway::from_str(yaml).unwrap()
    }

    #[test]
    fn test_all_converts_every_field() {
        let resolved = resolve(&GenerationPolicy::All, &fields(&["hogeHoge", "fuga"]));
        assert_eq!(resolved, vec![map_to("hoge_hoge"), Strategy::Skip]);
    }

    #[test]
    fn test_select_only_listed() {
        let policy = GenerationPolicy::Select(IndexSet::from(["firstName".to_string()]));
        let resolved = resolve(&policy, &fields(&["firstName", "lastName", "age"]));
        assert_eq!(resolved, vec![map_to("first_name"), Strategy::Skip, Strategy::Skip]);
    }

    #[test]
    fn test_exclude_complement() {
        let policy = GenerationPolicy::Exclude(IndexSet::from(["firstName".to_string()]));
        let resolved = resolve(&policy, &fields(&["firstName", "lastName", "age"]));
        assert_eq!(resolved, vec![Strategy::Skip, map_to("last_name"), Strategy::Skip]);
    }

    #[test]
    fn test_custom_override_wins_and_rest_converts() {
        let policy = GenerationPolicy::Custom(IndexMap::from([(
            "hogeHoge".to_string(),
            "hid".to_string(),
        )]));
        let resolved = resolve(&policy, &fields(&["hogeHoge", "fuga", "createdAt"]));
        assert_eq!(
            resolved,
            vec![map_to("hid"), Strategy::Skip, map_to("created_at")]
        );
    }

    #[test]
    fn test_custom_override_is_not_case_converted() {
        let policy = GenerationPolicy::Custom(IndexMap::from([(
            "id".to_string(),
            "userID".to_string(),
        )]));
        assert_eq!(resolve(&policy, &fields(&["id"])), vec![map_to("userID")]);
    }

    #[test]
    fn test_custom_identity_override_collapses() {
        let policy = GenerationPolicy::Custom(IndexMap::from([(
            "fuga".to_string(),
            "fuga".to_string(),
        )]));
        assert_eq!(resolve(&policy, &fields(&["fuga"])), vec![Strategy::Skip]);
    }

    #[test]
    fn test_from_argument_shapes() {
        assert_eq!(
            GenerationPolicy::from_argument(Some(&arg("all"))),
            Ok(GenerationPolicy::All)
        );
        assert_eq!(
            GenerationPolicy::from_argument(Some(&arg("\".all\""))),
            Ok(GenerationPolicy::All)
        );
        assert_eq!(
            GenerationPolicy::from_argument(Some(&arg("{select: [a, b]}"))),
            Ok(GenerationPolicy::Select(IndexSet::from([
                "a".to_string(),
                "b".to_string()
            ])))
        );
        assert_eq!(
            GenerationPolicy::from_argument(Some(&arg("{.exclude: [a]}"))),
            Ok(GenerationPolicy::Exclude(IndexSet::from(["a".to_string()])))
        );
        assert_eq!(
            GenerationPolicy::from_argument(Some(&arg("{custom: {a: x}}"))),
            Ok(GenerationPolicy::Custom(IndexMap::from([(
                "a".to_string(),
                "x".to_string()
            )])))
        );
    }

    #[test]
    fn test_from_argument_missing() {
        for argument in [None, Some(arg("[]")), Some(arg("\"\"")), Some(arg("{}"))] {
            assert_eq!(
                GenerationPolicy::from_argument(argument.as_ref()),
                Err(DiagnosticKind::NoArgument {
                    macro_kind: MacroKind::CodingKeys
                })
            );
        }
    }

    #[test]
    fn test_from_argument_invalid() {
        for yaml in [
            "some",
            "[a, b]",
            "{select: a}",
            "{select: [1, 2]}",
            "{custom: [a]}",
            "{custom: {a: 1}}",
            "{select: [a], exclude: [b]}",
            "{rename: [a]}",
            "42",
        ] {
            let result = GenerationPolicy::from_argument(Some(&arg(yaml)));
            assert!(
                matches!(result, Err(DiagnosticKind::InvalidArgument { .. })),
                "{} should be invalid, got {:?}",
                yaml,
                result
            );
        }
    }

    #[test]
    fn test_referenced_names_keep_order() {
        let policy = GenerationPolicy::Custom(IndexMap::from([
            ("b".to_string(), "x".to_string()),
            ("a".to_string(), "y".to_string()),
        ]));
        let names: Vec<_> = policy.referenced_names().collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(GenerationPolicy::All.referenced_names().count(), 0);
    }
}
