//! JSON serialization of bundles
//!
//! Output is deterministic: struct properties are written in declaration
//! order and every collection keeps insertion order, so serializing the
//! same bundle twice yields identical bytes. Unset optional properties and
//! empty collections are left out entirely.

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use sha2::{Digest, Sha256};
use std::io::Write;
use tracing::trace;

use crate::{Bundle, BundleError, DEFAULT_INDENT};

/// Whitespace layout of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    /// No whitespace between tokens
    Compact,
    /// One property per line, indented
    #[default]
    Pretty,
}

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    pub style: OutputStyle,
    /// Spaces per nesting level in pretty mode (default: 4)
    pub indent: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            style: OutputStyle::default(),
            indent: DEFAULT_INDENT,
        }
    }
}

impl SerializerConfig {
    /// Compact output, no whitespace
    pub fn compact() -> Self {
        Self {
            style: OutputStyle::Compact,
            ..Default::default()
        }
    }

    /// Pretty output with the default indent
    pub fn pretty() -> Self {
        Self::default()
    }

    /// Override the pretty-print indent width
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Write the bundle to `writer`
pub fn to_writer<W: Write>(bundle: &Bundle, writer: W, config: &SerializerConfig) -> Result<(), BundleError> {
    match config.style {
        OutputStyle::Compact => serde_json::to_writer(writer, bundle),
        OutputStyle::Pretty => {
            let indent = vec![b' '; config.indent];
            let mut serializer = Serializer::with_formatter(writer, PrettyFormatter::with_indent(&indent));
            bundle.serialize(&mut serializer)
        }
    }
    .map_err(BundleError::Serialization)
}

/// Serialize to bytes
pub fn to_vec(bundle: &Bundle, config: &SerializerConfig) -> Result<Vec<u8>, BundleError> {
    let mut out = Vec::new();
    to_writer(bundle, &mut out, config)?;
    trace!(
        "Serialized bundle {} ({} objects, {} bytes, {:?})",
        bundle.id(),
        bundle.len(),
        out.len(),
        config.style
    );
    Ok(out)
}

/// Serialize to a string
pub fn to_string(bundle: &Bundle, config: &SerializerConfig) -> Result<String, BundleError> {
    // serde_json only writes UTF-8
    String::from_utf8(to_vec(bundle, config)?)
        .map_err(|err| BundleError::Serialization(serde::ser::Error::custom(err)))
}

/// Validate first, then serialize; a bundle with dangling references is rejected
pub fn to_string_checked(bundle: &Bundle, config: &SerializerConfig) -> Result<String, BundleError> {
    bundle.validate()?;
    to_string(bundle, config)
}

/// Hex SHA-256 of the compact encoding
pub fn fingerprint(bundle: &Bundle) -> Result<String, BundleError> {
    let bytes = to_vec(bundle, &SerializerConfig::compact())?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommonObject, Described, Identifier, ObjectType};
    use serde_json::Value;

    fn sample() -> Bundle {
        let mut bundle = Bundle::new();
        let malware = bundle.new_malware();
        bundle[&malware].set_name("SpyEye");
        bundle[&malware].add_label("trojan");
        bundle[&malware].add_label("malware-family");
        bundle[&malware].add_filename("cleansweep.exe");
        bundle[&malware].add_hash("md5", "84714c100d2dfc88629531f6456b8276");
        bundle[&malware].add_kill_chain_phase("lockheed-martin-cyber-kill-chain", "command-and-control");
        let scan = bundle[&malware].new_scan_data();
        scan.set_product("avg");

        let infra = bundle.new_infrastructure();
        bundle[&infra].set_region("Europe");

        let rel = bundle.new_relationship();
        bundle[&rel].set_relationship_type("uses");
        bundle[&rel].set_source_target(malware.id(), infra.id());
        bundle
    }

    #[test]
    fn test_repeated_serialization_identical() {
        let bundle = sample();
        assert_eq!(bundle.to_json().unwrap(), bundle.to_json().unwrap());
        assert_eq!(bundle.to_json_pretty().unwrap(), bundle.to_json_pretty().unwrap());
        assert_eq!(fingerprint(&bundle).unwrap(), fingerprint(&bundle).unwrap());
    }

    #[test]
    fn test_malware_scenario_output() {
        let mut bundle = Bundle::new();
        let malware = bundle.new_malware();
        bundle[&malware].set_name("SpyEye");
        bundle[&malware].add_label("trojan");
        bundle[&malware].add_label("malware-family");
        bundle[&malware].add_filename("cleansweep.exe");
        bundle[&malware].add_hash("md5", "84714c100d2dfc88629531f6456b8276");

        let json = bundle.to_json().unwrap();
        assert!(json.contains(r#""type":"malware""#));
        assert!(json.contains(r#""name":"SpyEye""#));
        assert!(json.contains(r#""labels":["trojan","malware-family"]"#));
        assert!(json.contains(r#""file_name":["cleansweep.exe"]"#));
        assert!(json.contains(r#""hashes":{"md5":"84714c100d2dfc88629531f6456b8276"}"#));
    }

    #[test]
    fn test_relationship_follows_endpoints() {
        let mut bundle = Bundle::new();
        let a = bundle.new_campaign();
        let b = bundle.new_malware();
        let r = bundle.new_relationship();
        bundle[&r].set_relationship_type("uses");
        bundle[&r].set_source_target(a.id(), b.id());

        let json = bundle.to_json().unwrap();
        let pos_a = json.find(&format!(r#""id":"{}""#, a.id())).unwrap();
        let pos_b = json.find(&format!(r#""id":"{}""#, b.id())).unwrap();
        let pos_r = json.find(&format!(r#""id":"{}""#, r.id())).unwrap();
        assert!(pos_a < pos_b && pos_b < pos_r);

        let value: Value = serde_json::from_str(&json).unwrap();
        let rel = &value["objects"][2];
        assert_eq!(rel["type"], "relationship");
        assert_eq!(rel["source_ref"], a.id().as_str());
        assert_eq!(rel["target_ref"], b.id().as_str());
    }

    #[test]
    fn test_empty_bundle() {
        let bundle = Bundle::new();
        let json = bundle.to_json().unwrap();
        assert_eq!(
            json,
            format!(r#"{{"type":"bundle","id":"{}","spec_version":"2.0","objects":[]}}"#, bundle.id())
        );
        let value: Value = serde_json::from_str(&bundle.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["objects"], serde_json::json!([]));
    }

    #[test]
    fn test_unset_optionals_absent() {
        let mut bundle = Bundle::new();
        bundle.new_campaign();
        bundle.new_indicator();
        bundle.new_infrastructure();
        bundle.new_malware();
        bundle.new_observed_data();
        bundle.new_relationship();
        bundle.new_sighting();

        let value: Value = serde_json::from_str(&bundle.to_json().unwrap()).unwrap();
        for object in value["objects"].as_array().unwrap() {
            let keys: Vec<&String> = object.as_object().unwrap().keys().collect();
            assert_eq!(keys.len(), 2, "unexpected keys {:?}", keys);
            assert!(object.get("type").is_some());
            assert!(object.get("id").is_some());
        }
        assert!(!bundle.to_json().unwrap().contains("null"));
    }

    #[test]
    fn test_pretty_and_compact_encode_same_data() {
        let bundle = sample();
        let compact: Value = serde_json::from_str(&bundle.to_json().unwrap()).unwrap();
        let pretty: Value = serde_json::from_str(&bundle.to_json_pretty().unwrap()).unwrap();
        assert_eq!(compact, pretty);
    }

    #[test]
    fn test_pretty_indent() {
        let bundle = Bundle::new();
        let pretty = bundle.to_json_pretty().unwrap();
        assert!(pretty.contains("\n    \"type\": \"bundle\""));

        let two = to_string(&bundle, &SerializerConfig::pretty().with_indent(2)).unwrap();
        assert!(two.contains("\n  \"type\": \"bundle\""));
    }

    #[test]
    fn test_duplicate_phase_serialized_once() {
        let mut bundle = Bundle::new();
        let infra = bundle.new_infrastructure();
        bundle[&infra].add_kill_chain_phase("lockheed-martin-cyber-kill-chain", "command-and-control");
        bundle[&infra].add_kill_chain_phase("lockheed-martin-cyber-kill-chain", "command-and-control");

        let json = bundle.to_json().unwrap();
        assert_eq!(json.matches("command-and-control").count(), 1);
    }

    #[test]
    fn test_round_trip() {
        let bundle = sample();
        let parsed = Bundle::from_json(&bundle.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, bundle);
        assert_eq!(parsed.to_json().unwrap(), bundle.to_json().unwrap());
    }

    #[test]
    fn test_parse_rejects_non_bundle() {
        let err = Bundle::from_json(r#"{"type":"malware","id":"malware--x","spec_version":"2.0"}"#);
        assert!(matches!(err, Err(BundleError::Parse(_))));
    }

    #[test]
    fn test_non_ascii_text_preserved() {
        let mut bundle = Bundle::new();
        let campaign = bundle.new_campaign();
        bundle[&campaign].set_name("Zürich Überfall 2016");
        bundle[&campaign].set_objective("銀行 → SWIFT");

        let json = to_string(&bundle, &SerializerConfig::compact()).unwrap();
        assert!(json.contains(r#""name":"Zürich Überfall 2016""#));
        assert!(json.contains(r#""objective":"銀行 → SWIFT""#));
        assert_eq!(json.as_bytes(), to_vec(&bundle, &SerializerConfig::compact()).unwrap());
    }

    #[test]
    fn test_checked_serialization_allows_identity_refs() {
        let mut bundle = Bundle::new();
        let malware = bundle.new_malware();
        bundle[&malware].set_created_by_ref("identity--8e2e2d2b-17d4-4cbf-938f-98ee46b3cd3f");

        let json = to_string_checked(&bundle, &SerializerConfig::compact()).unwrap();
        assert!(json.contains(r#""created_by_ref":"identity--8e2e2d2b-17d4-4cbf-938f-98ee46b3cd3f""#));
    }

    #[test]
    fn test_checked_serialization() {
        let mut bundle = sample();
        assert!(to_string_checked(&bundle, &SerializerConfig::compact()).is_ok());

        let sighting = bundle.new_sighting();
        bundle[&sighting].set_sighting_of_ref(Identifier::generate(ObjectType::Malware));
        let err = to_string_checked(&bundle, &SerializerConfig::compact()).unwrap_err();
        match err {
            BundleError::Validation(report) => assert_eq!(report.issues.len(), 1),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let mut bundle = sample();
        let before = bundle.fingerprint().unwrap();
        assert_eq!(before.len(), 64);

        let campaign = bundle.new_campaign();
        bundle[&campaign].set_created_text("2016-09-01T00:00:01Z");
        assert_ne!(bundle.fingerprint().unwrap(), before);
    }
}
