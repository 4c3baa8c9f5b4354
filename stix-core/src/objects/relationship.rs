//! Relationship: a directed, labeled link between two objects
//!
//! Endpoints are stored as identifiers only. They are not looked up when
//! set, so a relationship may be built before its target exists.

use serde::{Deserialize, Serialize};

use super::CommonProperties;
use crate::{Identifier, Reference};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(flatten)]
    pub(crate) common: CommonProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relationship_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_ref: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_ref: Option<Identifier>,
}

impl Relationship {
    pub(crate) fn blank(id: Identifier) -> Self {
        Self {
            common: CommonProperties::new(id),
            description: None,
            relationship_type: None,
            source_ref: None,
            target_ref: None,
        }
    }

    /// Free-form description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Set the description
    pub fn set_description(&mut self, description: &str) {
        self.description = Some(description.to_string());
    }

    /// Kind of link, e.g. `uses`
    pub fn relationship_type(&self) -> Option<&str> {
        self.relationship_type.as_deref()
    }

    /// Label such as `uses`, `indicates` or `member-of`
    pub fn set_relationship_type(&mut self, relationship_type: &str) {
        self.relationship_type = Some(relationship_type.to_string());
    }

    /// Object the link starts from
    pub fn source_ref(&self) -> Option<&Identifier> {
        self.source_ref.as_ref()
    }

    /// Set the source reference
    pub fn set_source_ref(&mut self, source: impl Into<Identifier>) {
        self.source_ref = Some(source.into());
    }

    /// Object the link ends at
    pub fn target_ref(&self) -> Option<&Identifier> {
        self.target_ref.as_ref()
    }

    /// Set the target reference
    pub fn set_target_ref(&mut self, target: impl Into<Identifier>) {
        self.target_ref = Some(target.into());
    }

    /// Set both ends of the link at once
    pub fn set_source_target(&mut self, source: impl Into<Identifier>, target: impl Into<Identifier>) {
        self.set_source_ref(source);
        self.set_target_ref(target);
    }

    /// Identifiers this relationship points at
    pub fn references(&self) -> Vec<Reference<'_>> {
        let mut refs = self.common.references();
        if let Some(source) = &self.source_ref {
            refs.push(Reference::new("source_ref", source));
        }
        if let Some(target) = &self.target_ref {
            refs.push(Reference::new("target_ref", target));
        }
        refs
    }
}
