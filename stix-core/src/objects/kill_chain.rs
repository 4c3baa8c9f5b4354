//! Kill chain phases and hash mappings
//!
//! Value types nested inside objects. Neither carries an identifier.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::insert_unique;

/// A stage of an attack lifecycle model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KillChainPhase {
    pub kill_chain_name: String,
    pub phase_name: String,
}

impl KillChainPhase {
    /// Create a phase of the named kill chain
    pub fn new(kill_chain_name: &str, phase_name: &str) -> Self {
        Self {
            kill_chain_name: kill_chain_name.to_string(),
            phase_name: phase_name.to_string(),
        }
    }
}

/// Add a phase unless an identical (kill chain, phase) pair is present
pub(crate) fn add_phase(phases: &mut Vec<KillChainPhase>, kill_chain_name: &str, phase_name: &str) -> bool {
    insert_unique(phases, KillChainPhase::new(kill_chain_name, phase_name))
}

/// Hash algorithm name to hex digest, in insertion order.
///
/// Writing an algorithm that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hashes {
    entries: Vec<(String, String)>,
}

impl Hashes {
    /// Create an empty hash map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the digest for an algorithm, replacing any earlier value in place
    pub fn insert(&mut self, algorithm: &str, value: &str) {
        match self.entries.iter_mut().find(|(alg, _)| alg == algorithm) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.entries.push((algorithm.to_string(), value.to_string())),
        }
    }

    /// Digest for an algorithm
    pub fn get(&self, algorithm: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(alg, _)| alg == algorithm)
            .map(|(_, value)| value.as_str())
    }

    /// Number of algorithms held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no digests are held
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate (algorithm, digest) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(alg, value)| (alg.as_str(), value.as_str()))
    }
}

impl Serialize for Hashes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (alg, value) in &self.entries {
            map.serialize_entry(alg, value)?;
        }
        map.end()
    }
}

struct HashesVisitor;

impl<'de> Visitor<'de> for HashesVisitor {
    type Value = Hashes;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of hash algorithm to hex digest")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut hashes = Hashes::new();
        while let Some((alg, value)) = access.next_entry::<String, String>()? {
            hashes.insert(&alg, &value);
        }
        Ok(hashes)
    }
}

impl<'de> Deserialize<'de> for Hashes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(HashesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_phase_ignored() {
        let mut phases = Vec::new();
        assert!(add_phase(&mut phases, "lockheed-martin-cyber-kill-chain", "command-and-control"));
        assert!(!add_phase(&mut phases, "lockheed-martin-cyber-kill-chain", "command-and-control"));
        assert!(add_phase(&mut phases, "lockheed-martin-cyber-kill-chain", "delivery"));
        assert_eq!(phases.len(), 2);
    }

    #[test]
    fn test_hashes_keep_insertion_order() {
        let mut hashes = Hashes::new();
        hashes.insert("sha256", "bb");
        hashes.insert("md5", "aa");
        let json = serde_json::to_string(&hashes).unwrap();
        assert_eq!(json, r#"{"sha256":"bb","md5":"aa"}"#);
    }

    #[test]
    fn test_hashes_last_write_wins() {
        let mut hashes = Hashes::new();
        hashes.insert("md5", "old");
        hashes.insert("sha1", "cc");
        hashes.insert("md5", "new");
        assert_eq!(hashes.len(), 2);
        assert_eq!(hashes.get("md5"), Some("new"));
        assert_eq!(hashes.iter().next(), Some(("md5", "new")));
    }

    #[test]
    fn test_hashes_parse_preserves_order() {
        let hashes: Hashes = serde_json::from_str(r#"{"sha256":"bb","md5":"aa"}"#).unwrap();
        let algs: Vec<&str> = hashes.iter().map(|(alg, _)| alg).collect();
        assert_eq!(algs, vec!["sha256", "md5"]);
    }
}
