//! Campaign: a grouping of adversarial behavior over a period of time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{insert_unique, timestamp, CommonProperties, Descriptor};
use crate::{Identifier, Reference};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(flatten)]
    pub(crate) common: CommonProperties,
    #[serde(flatten)]
    pub(crate) descriptor: Descriptor,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first_seen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_seen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    objective: Option<String>,
}

impl Campaign {
    pub(crate) fn blank(id: Identifier) -> Self {
        Self {
            common: CommonProperties::new(id),
            descriptor: Descriptor::default(),
            aliases: Vec::new(),
            first_seen: None,
            last_seen: None,
            objective: None,
        }
    }

    /// Alternative names, in first-insertion order
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Add an alias; returns false if already present
    pub fn add_alias(&mut self, alias: &str) -> bool {
        insert_unique(&mut self.aliases, alias.to_string())
    }

    /// Earliest time the campaign was seen
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

    /// Latest time the campaign was seen
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

    /// Goal of the campaign
    pub fn objective(&self) -> Option<&str> {
        self.objective.as_deref()
    }

    /// Set the campaign objective
    pub fn set_objective(&mut self, objective: &str) {
        self.objective = Some(objective.to_string());
    }

    /// Identifiers this campaign points at
    pub fn references(&self) -> Vec<Reference<'_>> {
        self.common.references()
    }
}
