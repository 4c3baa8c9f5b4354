//! Infrastructure: systems and services used by an adversary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{add_phase, timestamp, CommonProperties, Descriptor, KillChainPhase};
use crate::{Identifier, Reference};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infrastructure {
    #[serde(flatten)]
    pub(crate) common: CommonProperties,
    #[serde(flatten)]
    pub(crate) descriptor: Descriptor,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    kill_chain_phases: Vec<KillChainPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first_seen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

impl Infrastructure {
    pub(crate) fn blank(id: Identifier) -> Self {
        Self {
            common: CommonProperties::new(id),
            descriptor: Descriptor::default(),
            kill_chain_phases: Vec::new(),
            first_seen: None,
            region: None,
            country: None,
        }
    }

    /// Kill-chain phases the infrastructure serves
    pub fn kill_chain_phases(&self) -> &[KillChainPhase] {
        &self.kill_chain_phases
    }

    /// Add a kill-chain phase; returns false if already present
    pub fn add_kill_chain_phase(&mut self, kill_chain_name: &str, phase_name: &str) -> bool {
        add_phase(&mut self.kill_chain_phases, kill_chain_name, phase_name)
    }

    /// Earliest time the infrastructure was seen
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

    /// Geographic region
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Set the region
    pub fn set_region(&mut self, region: &str) {
        self.region = Some(region.to_string());
    }

    /// Country code
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Set the country code
    pub fn set_country(&mut self, country: &str) {
        self.country = Some(country.to_string());
    }

    /// Identifiers this infrastructure points at
    pub fn references(&self) -> Vec<Reference<'_>> {
        self.common.references()
    }
}
