//! Properties shared by every object
//!
//! The common record (identifier, authorship, timestamps) is embedded in
//! every object kind and flattened into its JSON form. The descriptor
//! record (name, description) is embedded in domain objects only.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{Identifier, Reference};

/// Format a timestamp as RFC 3339 UTC with millisecond precision and a `Z` suffix
pub fn timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Identifier, authorship and timestamps present on every object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonProperties {
    id: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_by_ref: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
}

impl CommonProperties {
    pub(crate) fn new(id: Identifier) -> Self {
        Self {
            id,
            created_by_ref: None,
            created: None,
            modified: None,
        }
    }

    /// Object identifier
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Identity that created the object
    pub fn created_by_ref(&self) -> Option<&Identifier> {
        self.created_by_ref.as_ref()
    }

    /// Creation timestamp text
    pub fn created(&self) -> Option<&str> {
        self.created.as_deref()
    }

    /// Last modification timestamp text
    pub fn modified(&self) -> Option<&str> {
        self.modified.as_deref()
    }

    pub(crate) fn references(&self) -> Vec<Reference<'_>> {
        self.created_by_ref
            .iter()
            .map(|target| Reference::new("created_by_ref", target))
            .collect()
    }
}

/// Accessors and setters for the common record.
///
/// Implemented by every object kind; `id()` never fails and never changes.
pub trait CommonObject {
    fn common(&self) -> &CommonProperties;

    fn common_mut(&mut self) -> &mut CommonProperties;

    /// The identifier assigned at creation
    fn id(&self) -> &Identifier {
        self.common().id()
    }

    /// Point created_by_ref at the creating identity
    fn set_created_by_ref(&mut self, identity: impl Into<Identifier>) {
        self.common_mut().created_by_ref = Some(identity.into());
    }

    /// Store a creation timestamp verbatim
    fn set_created_text(&mut self, ts: &str) {
        self.common_mut().created = Some(ts.to_string());
    }

    /// Set created from a UTC time
    fn set_created(&mut self, ts: DateTime<Utc>) {
        self.common_mut().created = Some(timestamp(ts));
    }

    /// Stamp created with the current time
    fn set_created_to_current_time(&mut self) {
        self.set_created(Utc::now());
    }

    /// Store a modification timestamp verbatim
    fn set_modified_text(&mut self, ts: &str) {
        self.common_mut().modified = Some(ts.to_string());
    }

    /// Set modified from a UTC time
    fn set_modified(&mut self, ts: DateTime<Utc>) {
        self.common_mut().modified = Some(timestamp(ts));
    }

    /// Stamp modified with the current time
    fn set_modified_to_current_time(&mut self) {
        self.set_modified(Utc::now());
    }
}

/// Name and description carried by domain objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Name and description setters for domain objects
pub trait Described {
    fn descriptor(&self) -> &Descriptor;

    fn descriptor_mut(&mut self) -> &mut Descriptor;

    /// Display name
    fn name(&self) -> Option<&str> {
        self.descriptor().name.as_deref()
    }

    /// Free-form description
    fn description(&self) -> Option<&str> {
        self.descriptor().description.as_deref()
    }

    /// Set the display name
    fn set_name(&mut self, name: &str) {
        self.descriptor_mut().name = Some(name.to_string());
    }

    /// Set the description
    fn set_description(&mut self, description: &str) {
        self.descriptor_mut().description = Some(description.to_string());
    }
}
