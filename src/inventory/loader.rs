//! Snapshot file loading.
//!
//! Reads an inventory snapshot from disk, deserializes it as YAML or JSON
//! depending on the file extension, fills in implicit back-references, and
//! logs a structural lint pass over the result.

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use log::{info, warn};

use super::types::InventorySnapshot;

/// Load an inventory snapshot from a YAML or JSON file.
///
/// Files ending in `.json` parse as JSON; everything else parses as YAML.
/// Structural oddities (networks without prefixes, records without
/// identifiers) are logged as warnings but do not fail the load; CIDR
/// validity is not checked here at all, that happens when a query builds
/// its used set.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<InventorySnapshot> {
    let path = path.as_ref();
    info!("Loading inventory snapshot from: {}", path.display());

    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read snapshot file '{}'", path.display()))?;

    let mut snapshot: InventorySnapshot = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse JSON snapshot '{}'", path.display()))?,
        _ => serde_yaml::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse YAML snapshot '{}'", path.display()))?,
    };

    fill_subnet_networks(&mut snapshot);
    lint_snapshot(&snapshot);

    info!(
        "Snapshot holds {} networks, {} subnets, {} interface attachments",
        snapshot.networks.len(),
        snapshot.subnet_count(),
        snapshot.interfaces.len()
    );
    Ok(snapshot)
}

/// Fill each subnet's owning-network name when the snapshot left it
/// implicit through nesting.
fn fill_subnet_networks(snapshot: &mut InventorySnapshot) {
    for net in &mut snapshot.networks {
        for subnet in &mut net.subnets {
            if subnet.network.is_empty() {
                subnet.network = net.name.clone();
            }
        }
    }
}

/// Warn about structure that usually means a broken export.
fn lint_snapshot(snapshot: &InventorySnapshot) {
    for net in &snapshot.networks {
        if net.address_prefixes.is_empty() {
            warn!("Network '{}' declares no address prefixes", net.name);
        }
        if net.id.is_empty() {
            warn!("Network '{}' has an empty resource identifier", net.name);
        }
        for subnet in &net.subnets {
            if subnet.id.is_empty() {
                warn!(
                    "Subnet '{}' in network '{}' has an empty resource identifier",
                    subnet.name, net.name
                );
            }
        }
    }
    for nic in &snapshot.interfaces {
        if nic.subnet_id.is_empty() {
            warn!("Interface '{}' references no subnet", nic.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SNAPSHOT_YAML: &str = r#"
networks:
  - id: /subscriptions/s/resourceGroups/rg-a/providers/Microsoft.Network/virtualNetworks/vnet-a
    name: vnet-a
    address_prefixes:
      - 10.1.0.0/16
    subnets:
      - id: /subscriptions/s/resourceGroups/rg-a/providers/Microsoft.Network/virtualNetworks/vnet-a/subnets/default
        name: default
        address_prefix: 10.1.0.0/24
interfaces:
  - id: /subscriptions/s/resourceGroups/rg-a/providers/Microsoft.Network/networkInterfaces/nic-1
    subnet_id: /subscriptions/s/resourceGroups/rg-a/providers/Microsoft.Network/virtualNetworks/vnet-a/subnets/default
"#;

    fn temp_file_with(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_yaml_snapshot() {
        let file = temp_file_with(SNAPSHOT_YAML, ".yaml");
        let snapshot = load_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.networks.len(), 1);
        assert_eq!(snapshot.networks[0].subnets.len(), 1);
        assert_eq!(snapshot.interfaces.len(), 1);
    }

    #[test]
    fn test_load_json_snapshot() {
        let json = r#"{
            "networks": [
                {
                    "id": "/subscriptions/s/resourceGroups/rg-b/providers/Microsoft.Network/virtualNetworks/vnet-b",
                    "name": "vnet-b",
                    "address_prefixes": ["192.168.0.0/24"],
                    "subnets": []
                }
            ],
            "interfaces": []
        }"#;
        let file = temp_file_with(json, ".json");
        let snapshot = load_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.networks[0].name, "vnet-b");
        assert_eq!(snapshot.networks[0].address_prefixes, vec!["192.168.0.0/24"]);
    }

    #[test]
    fn test_subnet_network_backfilled_from_parent() {
        let file = temp_file_with(SNAPSHOT_YAML, ".yaml");
        let snapshot = load_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.networks[0].subnets[0].network, "vnet-a");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_snapshot(Path::new("/nonexistent/snapshot.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let file = temp_file_with("networks: [not closed", ".yaml");
        assert!(load_snapshot(file.path()).is_err());
    }

    #[test]
    fn test_empty_document_loads_as_empty_snapshot() {
        let file = temp_file_with("{}", ".yaml");
        let snapshot = load_snapshot(file.path()).unwrap();
        assert!(snapshot.networks.is_empty());
        assert!(snapshot.interfaces.is_empty());
    }
}
