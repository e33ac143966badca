//! Property-based tests for policy resolution and wire-name casing
//!
//! Uses proptest to generate field lists and policies over them

use declsynth::diagnostics::validate_policy;
use declsynth::policy::{resolve, Strategy as KeyStrategy};
use declsynth::{to_wire_case, Anchor, Field, GenerationPolicy, TypeDescriptor};
use indexmap::{IndexMap, IndexSet};
use proptest::prelude::*;

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,12}"
}

fn field_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(identifier(), 0..8).prop_map(|names| {
        let unique: IndexSet<String> = names.into_iter().collect();
        unique.into_iter().collect()
    })
}

fn fields(names: &[String]) -> Vec<Field> {
    names
        .iter()
        .map(|n| Field::new(n.clone(), TypeDescriptor::Primitive("String".into())))
        .collect()
}

/// A field list plus a subset of its names
fn names_and_subset() -> impl Strategy<Value = (Vec<String>, IndexSet<String>)> {
    field_names().prop_flat_map(|names| {
        let len = names.len();
        (
            Just(names),
            prop::collection::vec(any::<bool>(), len..=len),
        )
            .prop_map(|(names, picks)| {
                let subset = names
                    .iter()
                    .zip(picks)
                    .filter(|(_, pick)| *pick)
                    .map(|(n, _)| n.clone())
                    .collect();
                (names, subset)
            })
    })
}

fn anchor() -> Anchor {
    Anchor::Declaration {
        record: "R".into(),
        span: None,
    }
}

proptest! {
    #[test]
    fn test_casing_never_emits_uppercase(name in "[a-zA-Z_][a-zA-Z0-9_]{0,16}") {
        let wire = to_wire_case(&name);
        prop_assert!(!wire.chars().any(char::is_uppercase));
        let capitals = name.chars().filter(|c| c.is_uppercase()).count();
        prop_assert_eq!(wire.chars().count(), name.chars().count() + capitals);
    }

    #[test]
    fn test_casing_identity_without_capitals(name in "[a-z_][a-z0-9_]{0,16}") {
        prop_assert_eq!(to_wire_case(&name), name);
    }

    #[test]
    fn test_one_strategy_per_field_never_identity(names in field_names()) {
        let fields = fields(&names);
        let resolved = resolve(&GenerationPolicy::All, &fields);
        prop_assert_eq!(resolved.len(), fields.len());
        for (field, strategy) in fields.iter().zip(&resolved) {
            if let KeyStrategy::MapTo(wire) = strategy {
                prop_assert_ne!(wire, &field.name);
            }
        }
    }

    #[test]
    fn test_all_maps_exactly_the_fields_with_capitals(names in field_names()) {
        let fields = fields(&names);
        for (field, strategy) in fields.iter().zip(resolve(&GenerationPolicy::All, &fields)) {
            let has_capital = field.name.chars().any(char::is_uppercase);
            prop_assert_eq!(strategy.wire_name().is_some(), has_capital);
        }
    }

    #[test]
    fn test_select_touches_only_listed((names, subset) in names_and_subset()) {
        let fields = fields(&names);
        let resolved = resolve(&GenerationPolicy::Select(subset.clone()), &fields);
        for (field, strategy) in fields.iter().zip(resolved) {
            if !subset.contains(&field.name) {
                prop_assert_eq!(strategy, KeyStrategy::Skip);
            }
        }
    }

    #[test]
    fn test_exclude_is_complement_of_select((names, subset) in names_and_subset()) {
        let fields = fields(&names);
        let complement: IndexSet<String> = names
            .iter()
            .filter(|n| !subset.contains(*n))
            .cloned()
            .collect();
        prop_assert_eq!(
            resolve(&GenerationPolicy::Exclude(subset), &fields),
            resolve(&GenerationPolicy::Select(complement), &fields)
        );
    }

    #[test]
    fn test_custom_takes_precedence((names, subset) in names_and_subset(), wire in "[a-z]{1,6}") {
        let fields = fields(&names);
        let custom: IndexMap<String, String> = subset
            .iter()
            .map(|n| (n.clone(), format!("{}_{}", wire, n.len())))
            .collect();
        let resolved = resolve(&GenerationPolicy::Custom(custom.clone()), &fields);
        for (field, strategy) in fields.iter().zip(resolved) {
            match custom.get(&field.name) {
                Some(w) if *w != field.name => prop_assert_eq!(strategy.wire_name(), Some(w.as_str())),
                Some(_) => prop_assert_eq!(strategy, KeyStrategy::Skip),
                None => prop_assert_eq!(strategy, resolve(&GenerationPolicy::All, &[field.clone()])[0].clone()),
            }
        }
    }

    #[test]
    fn test_validator_accepts_known_names((names, subset) in names_and_subset()) {
        let fields = fields(&names);
        let policy = GenerationPolicy::Select(subset);
        prop_assert!(validate_policy("R", &policy, &fields, &anchor()).is_none());
    }

    #[test]
    fn test_validator_reports_every_unknown_name(
        (names, subset) in names_and_subset(),
        unknown in prop::collection::vec("[A-Z][a-z]{0,4}_x", 1..4),
    ) {
        let fields = fields(&names);
        let mut listed = subset;
        listed.extend(unknown.iter().cloned());
        let expected: IndexSet<String> = unknown.into_iter().collect();

        let diagnostic = validate_policy("R", &GenerationPolicy::Exclude(listed), &fields, &anchor());
        prop_assert!(diagnostic.is_some());
        let diagnostic = diagnostic.unwrap();
        prop_assert_eq!(diagnostic.code, "E0004");
        match diagnostic.kind {
            declsynth::DiagnosticKind::NonexistentProperty { properties, .. } => {
                prop_assert_eq!(properties, expected.into_iter().collect::<Vec<_>>());
            }
            other => prop_assert!(false, "unexpected kind {:?}", other),
        }
    }
}
