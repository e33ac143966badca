//! Field extraction: a declaration's stored members as an ordered field list

use crate::diagnostics::{Anchor, Diagnostic, DiagnosticKind};
use crate::schema::RecordDecl;
use crate::types::TypeDescriptor;
use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

/// A stored, named member of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*$").expect("valid identifier regex"))
}

/// Extract the ordered field list of a record
///
/// Computed members are skipped. A member without a usable name or type makes
/// the whole declaration unusable; every such member is reported.
pub fn extract_fields(decl: &RecordDecl) -> Result<Vec<Field>, Vec<Diagnostic>> {
    let mut fields = Vec::with_capacity(decl.members.len());
    let mut diagnostics = Vec::new();

    for (index, member) in decl.members.iter().enumerate() {
        if member.computed {
            continue;
        }

        let anchor = Anchor::Member {
            record: decl.name.clone(),
            index,
            span: member.span.or(decl.span),
        };

        let name = match member.name.as_deref().map(str::trim) {
            Some(name) if identifier_pattern().is_match(name) => name,
            _ => {
                diagnostics.push(Diagnostic::error(
                    DiagnosticKind::MissingIdentifier {
                        record: decl.name.clone(),
                        index,
                    },
                    anchor,
                ));
                continue;
            }
        };

        let ty = match member.ty.as_deref() {
            None => Err(None),
            Some(expr) => TypeDescriptor::parse(expr).map_err(|e| Some(e.to_string())),
        };

        match ty {
            Ok(ty) => fields.push(Field::new(name, ty)),
            Err(reason) => diagnostics.push(Diagnostic::error(
                DiagnosticKind::MissingType {
                    record: decl.name.clone(),
                    member: name.to_string(),
                    reason,
                },
                anchor,
            )),
        }
    }

    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    trace!(record = %decl.name, fields = fields.len(), "extracted fields");
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DeclKind, Member};

    fn record(members: Vec<Member>) -> RecordDecl {
        RecordDecl {
            name: "Person".into(),
            kind: DeclKind::Struct,
            attributes: vec![],
            members,
            generic: false,
            span: None,
        }
    }

    #[test]
    fn test_extract_preserves_order() {
        let decl = record(vec![
            Member::new("name", "String"),
            Member::new("age", "Int"),
            Member::new("address", "Address?"),
        ]);
        let fields = extract_fields(&decl).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "age", "address"]);
        assert_eq!(
            fields[2].ty,
            TypeDescriptor::optional(TypeDescriptor::NamedRecord("Address".into()))
        );
    }

    #[test]
    fn test_computed_members_skipped() {
        let mut computed = Member::new("displayName", "String");
        computed.computed = true;
        let decl = record(vec![Member::new("name", "String"), computed]);
        assert_eq!(extract_fields(&decl).unwrap().len(), 1);
    }

    #[test]
    fn test_computed_member_without_type_is_ignored() {
        let decl = record(vec![Member {
            name: Some("derived".into()),
            ty: None,
            computed: true,
            span: None,
        }]);
        assert!(extract_fields(&decl).unwrap().is_empty());
    }

    #[test]
    fn test_missing_identifier() {
        let decl = record(vec![
            Member::new("name", "String"),
            Member {
                name: None,
                ty: Some("Int".into()),
                computed: false,
                span: None,
            },
        ]);
        let diags = extract_fields(&decl).unwrap_err();
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].kind,
            DiagnosticKind::MissingIdentifier {
                record: "Person".into(),
                index: 1
            }
        );
    }

    #[test]
    fn test_malformed_identifier_is_missing() {
        let decl = record(vec![Member::new("2fast", "Int"), Member::new("", "Int")]);
        let diags = extract_fields(&decl).unwrap_err();
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.code == "E0005"));
    }

    #[test]
    fn test_missing_and_unparseable_type() {
        let decl = record(vec![
            Member {
                name: Some("age".into()),
                ty: None,
                computed: false,
                span: None,
            },
            Member::new("tags", "[String"),
        ]);
        let diags = extract_fields(&decl).unwrap_err();
        assert_eq!(diags.len(), 2);
        assert!(matches!(
            &diags[0].kind,
            DiagnosticKind::MissingType { member, reason: None, .. } if member == "age"
        ));
        assert!(matches!(
            &diags[1].kind,
            DiagnosticKind::MissingType { member, reason: Some(_), .. } if member == "tags"
        ));
    }
}
