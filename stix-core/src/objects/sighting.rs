//! Sighting: a report that an object was seen, optionally backed by observed data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{insert_unique, timestamp, CommonProperties};
use crate::{Identifier, Reference};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    #[serde(flatten)]
    pub(crate) common: CommonProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first_seen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_seen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sighting_of_ref: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    observed_data_refs: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    where_sighted_refs: Vec<Identifier>,
}

impl Sighting {
    pub(crate) fn blank(id: Identifier) -> Self {
        Self {
            common: CommonProperties::new(id),
            description: None,
            first_seen: None,
            last_seen: None,
            count: None,
            sighting_of_ref: None,
            observed_data_refs: Vec::new(),
            where_sighted_refs: Vec::new(),
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

    /// Earliest time of the sighting
    pub fn first_seen(&self) -> Option<&str> {
        self.first_seen.as_deref()
    }

    /// Set first_seen from pre-formatted text
    pub fn set_first_seen_text(&mut self, ts: &str) {
        self.first_seen = Some(ts.to_string());
    }

    /// Set first_seen from a UTC time
    pub fn set_first_seen(&mut self, ts: DateTime<Utc>) {
        self.first_seen = Some(timestamp(ts));
    }

    /// Latest time of the sighting
    pub fn last_seen(&self) -> Option<&str> {
        self.last_seen.as_deref()
    }

    /// Set last_seen from pre-formatted text
    pub fn set_last_seen_text(&mut self, ts: &str) {
        self.last_seen = Some(ts.to_string());
    }

    /// Set last_seen from a UTC time
    pub fn set_last_seen(&mut self, ts: DateTime<Utc>) {
        self.last_seen = Some(timestamp(ts));
    }

    /// Number of times sighted
    pub fn count(&self) -> Option<u32> {
        self.count
    }

    /// Set the sighting count
    pub fn set_count(&mut self, count: u32) {
        self.count = Some(count);
    }

    /// Object that was sighted
    pub fn sighting_of_ref(&self) -> Option<&Identifier> {
        self.sighting_of_ref.as_ref()
    }

    /// Point the sighting at the sighted object
    pub fn set_sighting_of_ref(&mut self, sighted: impl Into<Identifier>) {
        self.sighting_of_ref = Some(sighted.into());
    }

    /// Observed data backing the sighting
    pub fn observed_data_refs(&self) -> &[Identifier] {
        &self.observed_data_refs
    }

    /// Add backing observed data; returns false if already present
    pub fn add_observed_data_ref(&mut self, observed: impl Into<Identifier>) -> bool {
        insert_unique(&mut self.observed_data_refs, observed.into())
    }

    /// Identities that made the sighting
    pub fn where_sighted_refs(&self) -> &[Identifier] {
        &self.where_sighted_refs
    }

    /// Add a sighting identity; returns false if already present
    pub fn add_where_sighted_ref(&mut self, identity: impl Into<Identifier>) -> bool {
        insert_unique(&mut self.where_sighted_refs, identity.into())
    }

    /// Identifiers this sighting points at
    pub fn references(&self) -> Vec<Reference<'_>> {
        let mut refs = self.common.references();
        if let Some(sighted) = &self.sighting_of_ref {
            refs.push(Reference::new("sighting_of_ref", sighted));
        }
        refs.extend(
            self.observed_data_refs
                .iter()
                .map(|target| Reference::new("observed_data_refs", target)),
        );
        refs.extend(
            self.where_sighted_refs
                .iter()
                .map(|target| Reference::new("where_sighted_refs", target)),
        );
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ObjectType, StixKind};

    #[test]
    fn test_sighting_fields() {
        let infra = Identifier::generate(ObjectType::Infrastructure);
        let observed = Identifier::generate(ObjectType::ObservedData);

        let mut sighting = Sighting::with_id(Identifier::generate(ObjectType::Sighting));
        sighting.set_first_seen_text("2016-09-01T00:00:01Z");
        sighting.set_last_seen_text("2016-09-01T10:30:00Z");
        sighting.set_count(10);
        sighting.set_sighting_of_ref(&infra);
        assert!(sighting.add_observed_data_ref(&observed));
        assert!(!sighting.add_observed_data_ref(&observed));

        let value = serde_json::to_value(sighting.clone().into_object()).unwrap();
        assert_eq!(value["type"], "sighting");
        assert_eq!(value["count"], 10);
        assert_eq!(value["sighting_of_ref"], infra.as_str());
        assert_eq!(value["observed_data_refs"], serde_json::json!([observed.as_str()]));
        assert!(value.get("where_sighted_refs").is_none());
        assert_eq!(sighting.references().len(), 2);
    }
}
