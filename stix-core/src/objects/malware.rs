//! Malware: a malicious code family or sample
//!
//! Besides labels, file names, hashes and kill chain phases, a malware
//! object owns the scan results reported for it. Scan results are nested
//! values; they get no identifier and never appear at bundle level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{add_phase, insert_unique, timestamp, CommonProperties, Descriptor, Hashes, KillChainPhase};
use crate::{Identifier, Reference};

/// One anti-malware engine's verdict on a sample
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scanned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    classification: Option<String>,
}

impl ScanResult {
    /// Time of the scan
    pub fn scanned(&self) -> Option<&str> {
        self.scanned.as_deref()
    }

    /// Set scanned from pre-formatted text
    pub fn set_scanned_text(&mut self, ts: &str) {
        self.scanned = Some(ts.to_string());
    }

    /// Set scanned from a UTC time
    pub fn set_scanned(&mut self, ts: DateTime<Utc>) {
        self.scanned = Some(timestamp(ts));
    }

    /// Scanner product name
    pub fn product(&self) -> Option<&str> {
        self.product.as_deref()
    }

    /// Set the scanner product
    pub fn set_product(&mut self, product: &str) {
        self.product = Some(product.to_string());
    }

    /// Classification the scanner reported
    pub fn classification(&self) -> Option<&str> {
        self.classification.as_deref()
    }

    /// Set the classification
    pub fn set_classification(&mut self, classification: &str) {
        self.classification = Some(classification.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Malware {
    #[serde(flatten)]
    pub(crate) common: CommonProperties,
    #[serde(flatten)]
    pub(crate) descriptor: Descriptor,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    file_name: Vec<String>,
    #[serde(default, skip_serializing_if = "Hashes::is_empty")]
    hashes: Hashes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    kill_chain_phases: Vec<KillChainPhase>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    scan_data: Vec<ScanResult>,
}

impl Malware {
    pub(crate) fn blank(id: Identifier) -> Self {
        Self {
            common: CommonProperties::new(id),
            descriptor: Descriptor::default(),
            labels: Vec::new(),
            file_name: Vec::new(),
            hashes: Hashes::new(),
            kill_chain_phases: Vec::new(),
            scan_data: Vec::new(),
        }
    }

    /// Malware labels, in first-insertion order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Add a label; returns false if already present
    pub fn add_label(&mut self, label: &str) -> bool {
        insert_unique(&mut self.labels, label.to_string())
    }

    /// File names, duplicates kept
    pub fn filenames(&self) -> &[String] {
        &self.file_name
    }

    /// Append a file name
    pub fn add_filename(&mut self, filename: &str) {
        self.file_name.push(filename.to_string());
    }

    /// File digests by algorithm
    pub fn hashes(&self) -> &Hashes {
        &self.hashes
    }

    /// Record a digest; an algorithm already present keeps its position
    pub fn add_hash(&mut self, algorithm: &str, value: &str) {
        self.hashes.insert(algorithm, value);
    }

    /// Kill-chain phases the malware is used in
    pub fn kill_chain_phases(&self) -> &[KillChainPhase] {
        &self.kill_chain_phases
    }

    /// Add a kill-chain phase; returns false if already present
    pub fn add_kill_chain_phase(&mut self, kill_chain_name: &str, phase_name: &str) -> bool {
        add_phase(&mut self.kill_chain_phases, kill_chain_name, phase_name)
    }

    /// Scan results, in creation order
    pub fn scan_data(&self) -> &[ScanResult] {
        &self.scan_data
    }

    /// Append an empty scan result and return it for population
    pub fn new_scan_data(&mut self) -> &mut ScanResult {
        self.scan_data.push(ScanResult::default());
        let last = self.scan_data.len() - 1;
        &mut self.scan_data[last]
    }

    /// Identifiers this malware points at
    pub fn references(&self) -> Vec<Reference<'_>> {
        self.common.references()
    }
}
