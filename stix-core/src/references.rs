//! Identifier references and bundle validation
//!
//! Objects point at each other by identifier only. Nothing is resolved
//! when a reference is set; [`validate`] walks the whole bundle on request
//! and reports every problem it finds in one [`ValidationReport`].
//!
//! A reference whose type prefix names a kind no bundle can hold (for
//! example `identity--…` in `created_by_ref`) is external: it is checked
//! for shape only.

use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{Bundle, Identifier, ObjectType, StixObject};

/// A property of an object holding the identifier of another object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    /// JSON property name, e.g. `source_ref`
    pub field: &'static str,
    pub target: &'a Identifier,
}

impl<'a> Reference<'a> {
    pub fn new(field: &'static str, target: &'a Identifier) -> Self {
        Self { field, target }
    }

    /// Whether the target's type is one this crate never stores in a bundle
    pub fn is_external(&self) -> bool {
        !ObjectType::OBJECT_KINDS
            .iter()
            .any(|kind| self.target.is_of_type(*kind))
    }
}

/// A single problem found by [`validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("{object}: duplicate identifier")]
    DuplicateIdentifier { object: Identifier },

    #[error("{object}: {field} holds malformed identifier '{value}'")]
    MalformedIdentifier {
        object: Identifier,
        field: &'static str,
        value: Identifier,
    },

    #[error("{object}: {field} points at {target}, which is not in the bundle")]
    DanglingReference {
        object: Identifier,
        field: &'static str,
        target: Identifier,
    },

    #[error("{object}: {field} points at {target}, expected a {expected} object")]
    UnexpectedReferenceType {
        object: Identifier,
        field: &'static str,
        target: Identifier,
        expected: ObjectType,
    },

    #[error("{object}: missing required property {property}")]
    MissingProperty {
        object: Identifier,
        property: &'static str,
    },
}

/// Every issue found in one validation pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bundle failed validation with {} issue(s): {}", .issues.len(), render(.issues))]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

fn render(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check identifiers, references and required properties across the bundle
pub fn validate(bundle: &Bundle) -> Result<(), ValidationReport> {
    let mut issues = Vec::new();
    let mut seen: HashSet<&Identifier> = HashSet::new();

    for object in bundle.objects() {
        let id = object.id();
        if !seen.insert(id) {
            issues.push(ValidationIssue::DuplicateIdentifier { object: id.clone() });
        }
        if !id.is_well_formed() || !id.is_of_type(object.object_type()) {
            issues.push(ValidationIssue::MalformedIdentifier {
                object: id.clone(),
                field: "id",
                value: id.clone(),
            });
        }
    }

    for object in bundle.objects() {
        check_required(object, &mut issues);

        for reference in object.references() {
            let Reference { field, target } = reference;
            if !target.is_well_formed() {
                issues.push(ValidationIssue::MalformedIdentifier {
                    object: object.id().clone(),
                    field,
                    value: target.clone(),
                });
                continue;
            }
            if !reference.is_external() && !seen.contains(target) {
                issues.push(ValidationIssue::DanglingReference {
                    object: object.id().clone(),
                    field,
                    target: target.clone(),
                });
            }
            if field == "observed_data_refs" && !target.is_of_type(ObjectType::ObservedData) {
                issues.push(ValidationIssue::UnexpectedReferenceType {
                    object: object.id().clone(),
                    field,
                    target: target.clone(),
                    expected: ObjectType::ObservedData,
                });
            }
        }
    }

    debug!(
        "Validated {} objects in {}: {} issue(s)",
        bundle.len(),
        bundle.id(),
        issues.len()
    );

    if issues.is_empty() {
        Ok(())
    } else {
        warn!("Bundle {} failed validation with {} issue(s)", bundle.id(), issues.len());
        Err(ValidationReport { issues })
    }
}

fn check_required(object: &StixObject, issues: &mut Vec<ValidationIssue>) {
    let missing: Vec<&'static str> = match object {
        StixObject::Indicator(indicator) => {
            [("pattern", indicator.pattern().is_none())]
                .into_iter()
                .filter_map(|(property, absent)| absent.then_some(property))
                .collect()
        }
        StixObject::Relationship(rel) => [
            ("relationship_type", rel.relationship_type().is_none()),
            ("source_ref", rel.source_ref().is_none()),
            ("target_ref", rel.target_ref().is_none()),
        ]
        .into_iter()
        .filter_map(|(property, absent)| absent.then_some(property))
        .collect(),
        StixObject::Sighting(sighting) => {
            [("sighting_of_ref", sighting.sighting_of_ref().is_none())]
                .into_iter()
                .filter_map(|(property, absent)| absent.then_some(property))
                .collect()
        }
        _ => Vec::new(),
    };

    issues.extend(missing.into_iter().map(|property| ValidationIssue::MissingProperty {
        object: object.id().clone(),
        property,
    }));
}
