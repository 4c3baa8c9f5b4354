//! Indicator: a detection pattern for suspicious or malicious activity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{add_phase, insert_unique, timestamp, CommonProperties, Descriptor, KillChainPhase};
use crate::{Identifier, Reference};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    #[serde(flatten)]
    pub(crate) common: CommonProperties,
    #[serde(flatten)]
    pub(crate) descriptor: Descriptor,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    valid_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    valid_until: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    kill_chain_phases: Vec<KillChainPhase>,
}

impl Indicator {
    pub(crate) fn blank(id: Identifier) -> Self {
        Self {
            common: CommonProperties::new(id),
            descriptor: Descriptor::default(),
            labels: Vec::new(),
            pattern: None,
            valid_from: None,
            valid_until: None,
            kill_chain_phases: Vec::new(),
        }
    }

    /// Indicator labels, in first-insertion order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Add a label; returns false if already present
    pub fn add_label(&mut self, label: &str) -> bool {
        insert_unique(&mut self.labels, label.to_string())
    }

    /// Detection pattern
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Detection pattern, stored verbatim
    pub fn set_pattern(&mut self, pattern: &str) {
        self.pattern = Some(pattern.to_string());
    }

    /// Start of the validity window
    pub fn valid_from(&self) -> Option<&str> {
        self.valid_from.as_deref()
    }

    /// Set valid_from from pre-formatted text
    pub fn set_valid_from_text(&mut self, ts: &str) {
        self.valid_from = Some(ts.to_string());
    }

    /// Set valid_from from a UTC time
    pub fn set_valid_from(&mut self, ts: DateTime<Utc>) {
        self.valid_from = Some(timestamp(ts));
    }

    /// End of the validity window
    pub fn valid_until(&self) -> Option<&str> {
        self.valid_until.as_deref()
    }

    /// Set valid_until from pre-formatted text
    pub fn set_valid_until_text(&mut self, ts: &str) {
        self.valid_until = Some(ts.to_string());
    }

    /// Set valid_until from a UTC time
    pub fn set_valid_until(&mut self, ts: DateTime<Utc>) {
        self.valid_until = Some(timestamp(ts));
    }

    /// Kill-chain phases this indicator detects
    pub fn kill_chain_phases(&self) -> &[KillChainPhase] {
        &self.kill_chain_phases
    }

    /// Add a kill-chain phase; returns false if already present
    pub fn add_kill_chain_phase(&mut self, kill_chain_name: &str, phase_name: &str) -> bool {
        add_phase(&mut self.kill_chain_phases, kill_chain_name, phase_name)
    }

    /// Identifiers this indicator points at
    pub fn references(&self) -> Vec<Reference<'_>> {
        self.common.references()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Described, ObjectType, StixKind};
    use chrono::TimeZone;

    #[test]
    fn test_indicator_fields() {
        let mut indicator = Indicator::with_id(Identifier::generate(ObjectType::Indicator));
        indicator.set_name("Malware C2 Indicator 2016");
        indicator.set_description("This indicator should detect the SpyEye malware by looking for this MD5 hash");
        indicator.set_pattern("file-object:hashes.md5 = 84714c100d2dfc88629531f6456b8276");
        indicator.set_valid_from(Utc.with_ymd_and_hms(2016, 9, 1, 0, 0, 0).unwrap());

        let value = serde_json::to_value(indicator.into_object()).unwrap();
        assert_eq!(value["type"], "indicator");
        assert_eq!(
            value["pattern"],
            "file-object:hashes.md5 = 84714c100d2dfc88629531f6456b8276"
        );
        assert_eq!(value["valid_from"], "2016-09-01T00:00:00.000Z");
        assert!(value.get("valid_until").is_none());
        assert!(value.get("labels").is_none());
        assert!(value.get("kill_chain_phases").is_none());
    }
}
