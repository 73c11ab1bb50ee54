//! End-to-end tests driving the planner from snapshot files.
//!
//! Each test loads a realistic inventory from disk the way the CLI does,
//! then checks the full query path: used-set construction, suggestions,
//! reclamation, and report generation.

#[cfg(test)]
mod allocation_integration_tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use cidrplan::cidr::{AddressBlock, AddressPool, UsedSet};
    use cidrplan::inventory::{self, InventorySnapshot};
    use cidrplan::planner;
    use cidrplan::report::{self, InventoryReport};

    const FIXTURE_YAML: &str = r#"
networks:
  - id: /subscriptions/sub-1/resourceGroups/rg-hub/providers/Microsoft.Network/virtualNetworks/hub-vnet
    name: hub-vnet
    address_prefixes:
      - 10.0.0.0/16
    subnets:
      - id: /subscriptions/sub-1/resourceGroups/rg-hub/providers/Microsoft.Network/virtualNetworks/hub-vnet/subnets/gateway
        name: gateway
        address_prefix: 10.0.0.0/24
      - id: /subscriptions/sub-1/resourceGroups/rg-hub/providers/Microsoft.Network/virtualNetworks/hub-vnet/subnets/firewall
        name: firewall
        address_prefix: 10.0.1.0/24
  - id: /subscriptions/sub-1/resourceGroups/rg-prod/providers/Microsoft.Network/virtualNetworks/prod-vnet
    name: prod-vnet
    address_prefixes:
      - 10.1.0.0/16
    subnets:
      - id: /subscriptions/sub-1/resourceGroups/rg-prod/providers/Microsoft.Network/virtualNetworks/prod-vnet/subnets/web
        name: web
        address_prefix: 10.1.0.0/24
      - id: /subscriptions/sub-1/resourceGroups/rg-prod/providers/Microsoft.Network/virtualNetworks/prod-vnet/subnets/db
        name: db
        address_prefix: 10.1.1.0/24
  - id: /subscriptions/sub-1/resourceGroups/rg-legacy/providers/Microsoft.Network/virtualNetworks/legacy-vnet
    name: legacy-vnet
    address_prefixes:
      - 192.168.0.0/24
    subnets: []
interfaces:
  - id: /subscriptions/sub-1/resourceGroups/rg-hub/providers/Microsoft.Network/networkInterfaces/gw-nic
    subnet_id: /subscriptions/sub-1/resourceGroups/rg-hub/providers/Microsoft.Network/virtualNetworks/hub-vnet/subnets/gateway
  - id: /subscriptions/sub-1/resourceGroups/rg-hub/providers/Microsoft.Network/networkInterfaces/fw-nic
    subnet_id: /SUBSCRIPTIONS/SUB-1/RESOURCEGROUPS/RG-HUB/PROVIDERS/MICROSOFT.NETWORK/VIRTUALNETWORKS/HUB-VNET/SUBNETS/FIREWALL
  - id: /subscriptions/sub-1/resourceGroups/rg-prod/providers/Microsoft.Network/networkInterfaces/web-nic
    subnet_id: /subscriptions/sub-1/resourceGroups/rg-prod/providers/Microsoft.Network/virtualNetworks/prod-vnet/subnets/web
"#;

    fn load_fixture() -> InventorySnapshot {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(FIXTURE_YAML.as_bytes()).unwrap();
        file.flush().unwrap();
        inventory::load_snapshot(file.path()).unwrap()
    }

    #[test]
    fn test_used_set_unions_networks_and_subnets() {
        let snapshot = load_fixture();
        let used = planner::used_blocks(&snapshot).unwrap();
        let rendered: Vec<String> = used.iter().map(|b| b.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "10.0.0.0/16",
                "10.0.0.0/24",
                "10.0.1.0/24",
                "10.1.0.0/16",
                "10.1.0.0/24",
                "10.1.1.0/24",
                "192.168.0.0/24",
            ]
        );
    }

    #[test]
    fn test_single_block_suggestion_clears_used_networks() {
        let snapshot = load_fixture();
        let used = planner::used_blocks(&snapshot).unwrap();
        let pool = AddressPool::rfc1918();

        let block = planner::suggest_block(&pool, &used, 16).unwrap().unwrap();
        assert_eq!(block.to_string(), "10.2.0.0/16");

        // every /24 under the used /16s conflicts through overlap, not
        // exact membership
        let block = planner::suggest_block(&pool, &used, 24).unwrap().unwrap();
        assert_eq!(block.to_string(), "10.2.0.0/24");
    }

    #[test]
    fn test_multi_subnet_request_finds_parent_and_children() {
        let snapshot = load_fixture();
        let used = planner::used_blocks(&snapshot).unwrap();
        let pool = AddressPool::rfc1918();

        let suggestion = planner::suggest_parent_block(&pool, &used, 26, 4)
            .unwrap()
            .unwrap();
        assert_eq!(suggestion.parent.to_string(), "10.2.0.0/24");
        let rendered: Vec<String> = suggestion.subnets.iter().map(|b| b.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["10.2.0.0/26", "10.2.0.64/26", "10.2.0.128/26", "10.2.0.192/26"]
        );
    }

    #[test]
    fn test_scoped_suggestion_inside_existing_network() {
        let snapshot = load_fixture();
        let net = snapshot.find_network("prod-vnet").unwrap();
        let parent: AddressBlock = net.address_prefixes[0].parse().unwrap();
        let existing =
            UsedSet::from_prefixes(net.subnets.iter().map(|s| s.address_prefix.as_str())).unwrap();

        let subnets = planner::suggest_subnets_within(&parent, &existing, 24, 2)
            .unwrap()
            .unwrap();
        let rendered: Vec<String> = subnets.iter().map(|b| b.to_string()).collect();
        assert_eq!(rendered, vec!["10.1.2.0/24", "10.1.3.0/24"]);
    }

    #[test]
    fn test_exhausted_custom_pool_yields_no_suggestion() {
        let snapshot = load_fixture();
        let used = planner::used_blocks(&snapshot).unwrap();
        let pool = AddressPool::new(vec!["192.168.0.0/24".parse().unwrap()]).unwrap();

        assert_eq!(planner::suggest_block(&pool, &used, 26).unwrap(), None);
        assert_eq!(
            planner::suggest_parent_block(&pool, &used, 28, 2).unwrap(),
            None
        );
    }

    #[test]
    fn test_reclaim_flow_spots_detached_resources() {
        let snapshot = load_fixture();

        let networks = planner::find_reclaimable_networks(&snapshot);
        assert_eq!(networks.len(), 1);
        assert_eq!(networks[0].name, "legacy-vnet");
        assert_eq!(networks[0].parent, "rg-legacy");

        // the firewall subnet's interface reference differs only in case,
        // so db is the only unattached subnet
        let subnets = planner::find_reclaimable_subnets(&snapshot);
        assert_eq!(subnets.len(), 1);
        assert_eq!(subnets[0].name, "db");
        assert_eq!(subnets[0].parent, "prod-vnet");
        assert_eq!(subnets[0].address_prefixes, vec!["10.1.1.0/24"]);
    }

    #[test]
    fn test_malformed_snapshot_prefix_fails_queries() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "networks:\n  - id: net-1\n    name: broken-vnet\n    address_prefixes: ['10.0.0.300/16']\n    subnets: []"
        )
        .unwrap();
        file.flush().unwrap();

        let snapshot = inventory::load_snapshot(file.path()).unwrap();
        assert!(planner::used_blocks(&snapshot).is_err());
        assert!(InventoryReport::from_snapshot(&snapshot, "broken.yaml").is_err());
    }

    #[test]
    fn test_report_files_round_trip() {
        let snapshot = load_fixture();
        let dir = TempDir::new().unwrap();
        let json_path = dir.path().join("inventory_report.json");
        let text_path = dir.path().join("inventory_report.txt");

        let full_report = InventoryReport::from_snapshot(&snapshot, "fixture.yaml").unwrap();
        report::generate_json_report(&full_report, &json_path).unwrap();
        report::generate_text_report(&full_report, &text_path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed["metadata"]["total_networks"], 3);
        assert_eq!(parsed["metadata"]["total_subnets"], 4);
        assert_eq!(parsed["unused_networks"][0]["name"], "legacy-vnet");

        let text = std::fs::read_to_string(&text_path).unwrap();
        assert!(text.contains("legacy-vnet"));
        assert!(text.contains("prod-vnet/db"));
        assert!(text.contains("Total blocks in use: 7"));
    }

    #[test]
    fn test_suggestions_are_stable_across_loads() {
        let pool = AddressPool::rfc1918();
        let first = {
            let used = planner::used_blocks(&load_fixture()).unwrap();
            planner::suggest_parent_block(&pool, &used, 27, 6).unwrap()
        };
        for _ in 0..5 {
            let used = planner::used_blocks(&load_fixture()).unwrap();
            assert_eq!(planner::suggest_parent_block(&pool, &used, 27, 6).unwrap(), first);
        }
    }
}
