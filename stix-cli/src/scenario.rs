//! Reference scenario: a banking campaign using the SpyEye malware
//!
//! Builds a campaign, an indicator, C2 infrastructure with observed
//! traffic, a malware family and sample with scan results, the
//! relationships between them and two sightings.

use stix_core::{Bundle, BundleConfig, Described};
use tracing::info;

const KILL_CHAIN: &str = "lockheed-martin-cyber-kill-chain";

/// Build the full reference scenario into a fresh bundle
pub fn build(config: BundleConfig) -> Bundle {
    let mut bundle = Bundle::with_config(config);

    let campaign = bundle.new_campaign();
    {
        let c = &mut bundle[&campaign];
        c.set_name("Bank Attack 2016");
        c.set_objective("Compromise SWIFT system and steal money");
    }

    let indicator = bundle.new_indicator();
    {
        let i = &mut bundle[&indicator];
        i.set_name("Malware C2 Indicator 2016");
        i.set_description("This indicator should detect the SpyEye malware by looking for this MD5 hash");
        i.set_pattern("file-object:hashes.md5 = 84714c100d2dfc88629531f6456b8276");
    }

    // C2 infrastructure used by both the campaign and the malware
    let infra = bundle.new_infrastructure();
    {
        let inf = &mut bundle[&infra];
        inf.set_name("SpyEye Command and Control Servers");
        inf.set_description(
            "These servers are located in a datacenter in the Netherlands and the IPs change on a weekly basis",
        );
        inf.add_kill_chain_phase(KILL_CHAIN, "command-and-control");
        inf.set_first_seen_text("2016-09-01T00:00:01Z");
        inf.set_region("Europe");
        inf.set_country("NL");
    }

    let od1 = bundle.new_observed_data();
    {
        let od = &mut bundle[&od1];
        od.set_first_observed_text("2016-09-01T00:00:01Z");
        od.set_last_observed_text("2016-09-07T00:00:01Z");
        od.set_number_observed(3);
        od.set_objects("ipv4-addr 5.79.68.0/24");
    }

    let od2 = bundle.new_observed_data();
    {
        let od = &mut bundle[&od2];
        od.set_first_observed_text("2016-09-07T00:00:01Z");
        od.set_last_observed_text("2016-09-14T00:00:01Z");
        od.set_number_observed(3);
        od.set_objects("ipv4-addr 5.79.52.0/24");
    }

    // Backs the infrastructure sighting below
    let od3 = bundle.new_observed_data();
    {
        let od = &mut bundle[&od3];
        od.set_first_observed_text("2016-09-07T00:00:01Z");
        od.set_last_observed_text("2016-09-14T00:00:01Z");
        od.set_number_observed(1);
        od.set_objects("ipv4-addr 5.79.52.100");
    }

    let zeus = bundle.new_malware();
    {
        let m = &mut bundle[&zeus];
        m.set_name("Zeus");
        m.add_label("trojan");
        m.add_label("malware-family");
    }

    let spyeye = bundle.new_malware();
    {
        let m = &mut bundle[&spyeye];
        m.set_name("SpyEye");
        m.add_label("trojan");
        m.add_filename("cleansweep.exe");
        m.add_filename("spyeye2_exe");
        m.add_filename("build_1_.exe");
        m.add_hash("md5", "84714c100d2dfc88629531f6456b8276");
        m.add_hash(
            "sha256",
            "861aa9c5ddcb5284e1ba4e5d7ebacfa297567c353446506ee4b4e39c84454b09",
        );
        m.add_kill_chain_phase(KILL_CHAIN, "command-and-control");

        let avg = m.new_scan_data();
        avg.set_scanned_text("2016-08-30T06:31:48Z");
        avg.set_product("avg");
        avg.set_classification("Generic16.BFGI");

        let avast = m.new_scan_data();
        avast.set_scanned_text("2016-08-30T06:31:48Z");
        avast.set_product("avast");
        avast.set_classification("Win32:Downloader-NTU [PUP]");
    }

    let links = [
        ("member-of", zeus.id(), spyeye.id()),
        ("uses", campaign.id(), spyeye.id()),
        ("uses", campaign.id(), infra.id()),
        ("uses", spyeye.id(), infra.id()),
        ("indicates", indicator.id(), spyeye.id()),
        ("part-of", od1.id(), infra.id()),
        ("part-of", od2.id(), infra.id()),
    ];
    for (relationship_type, source, target) in links {
        let rel = bundle.new_relationship();
        let r = &mut bundle[&rel];
        r.set_relationship_type(relationship_type);
        r.set_source_target(source, target);
    }

    let malware_sighting = bundle.new_sighting();
    {
        let s = &mut bundle[&malware_sighting];
        s.set_first_seen_text("2016-09-01T00:00:01Z");
        s.set_last_seen_text("2016-09-01T10:30:00Z");
        s.set_count(3);
        s.set_sighting_of_ref(spyeye.id());
    }

    let infra_sighting = bundle.new_sighting();
    {
        let s = &mut bundle[&infra_sighting];
        s.set_first_seen_text("2016-09-01T00:00:01Z");
        s.set_last_seen_text("2016-09-01T10:30:00Z");
        s.set_count(10);
        s.set_sighting_of_ref(infra.id());
        s.add_observed_data_ref(od3.id());
    }

    info!("Built scenario bundle {} with {} objects", bundle.id(), bundle.len());
    bundle
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use stix_core::ObjectType;

    #[test]
    fn test_scenario_shape() {
        let bundle = build(BundleConfig::default());
        assert_eq!(bundle.len(), 17);

        let stats = bundle.stats();
        assert_eq!(
            stats.by_type,
            vec![
                (ObjectType::Campaign, 1),
                (ObjectType::Indicator, 1),
                (ObjectType::Infrastructure, 1),
                (ObjectType::ObservedData, 3),
                (ObjectType::Malware, 2),
                (ObjectType::Relationship, 7),
                (ObjectType::Sighting, 2),
            ]
        );
    }

    #[test]
    fn test_scenario_validates() {
        let bundle = build(BundleConfig::default());
        assert!(bundle.validate().is_ok());
    }

    #[test]
    fn test_scenario_output() {
        let bundle = build(BundleConfig::default());
        let value: Value = serde_json::from_str(&bundle.to_json_pretty().unwrap()).unwrap();
        let objects = value["objects"].as_array().unwrap();

        let spyeye = &objects[7];
        assert_eq!(spyeye["name"], "SpyEye");
        assert_eq!(spyeye["hashes"]["sha256"], "861aa9c5ddcb5284e1ba4e5d7ebacfa297567c353446506ee4b4e39c84454b09");
        assert_eq!(spyeye["scan_data"][1]["product"], "avast");

        let member_of = &objects[8];
        assert_eq!(member_of["relationship_type"], "member-of");
        assert_eq!(member_of["source_ref"], objects[6]["id"]);
        assert_eq!(member_of["target_ref"], spyeye["id"]);

        let infra_sighting = &objects[16];
        assert_eq!(infra_sighting["count"], 10);
        assert_eq!(infra_sighting["observed_data_refs"][0], objects[5]["id"]);
    }
}
