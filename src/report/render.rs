//! Report rendering.
//!
//! Writes the inventory report as JSON and as a human-readable text file.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use super::types::InventoryReport;

/// Generate JSON report
pub fn generate_json_report(report: &InventoryReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Generate human-readable text report
pub fn generate_text_report(report: &InventoryReport, output_path: &Path) -> Result<()> {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(80));
    lines.push("                       NETWORK ADDRESS SPACE REPORT".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    // Metadata
    lines.push(format!("Generated: {}", report.metadata.generated_at));
    lines.push(format!("Snapshot: {}", report.metadata.snapshot_source));
    lines.push(format!("Networks: {}", report.metadata.total_networks));
    lines.push(format!("Subnets: {}", report.metadata.total_subnets));
    lines.push(format!("Interfaces: {}", report.metadata.total_interfaces));
    lines.push(String::new());

    // Used address space
    lines.push("=".repeat(80));
    lines.push("                          USED ADDRESS BLOCKS".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());
    if report.used_cidrs.is_empty() {
        lines.push("No address space is currently in use.".to_string());
    } else {
        for cidr in &report.used_cidrs {
            lines.push(format!("  {cidr}"));
        }
    }
    lines.push(String::new());
    lines.push(format!("Total blocks in use: {}", report.used_cidrs.len()));
    lines.push(String::new());

    // Subnet utilization
    if !report.usage.is_empty() {
        lines.push("=".repeat(80));
        lines.push("                          SUBNET UTILIZATION".to_string());
        lines.push("=".repeat(80));
        lines.push(String::new());

        lines.push(format!(
            "{:<24} {:<22} {:<20} {:<18} {:>10}",
            "Network", "Network CIDRs", "Subnet", "Subnet CIDR", "Addresses"
        ));
        lines.push("-".repeat(96));
        for row in &report.usage {
            let addresses = row
                .address_count
                .map(|count| count.to_string())
                .unwrap_or_else(|| "-".to_string());
            lines.push(format!(
                "{:<24} {:<22} {:<20} {:<18} {:>10}",
                row.network, row.network_prefixes, row.subnet, row.subnet_prefix, addresses
            ));
        }
        lines.push(String::new());
    }

    // Reclamation candidates
    lines.push("=".repeat(80));
    lines.push("                        RECLAMATION CANDIDATES".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    if report.unused_networks.is_empty() {
        lines.push("No unused networks. Every network CIDR has subnets.".to_string());
    } else {
        lines.push("Networks with no subnets:".to_string());
        for candidate in &report.unused_networks {
            lines.push(format!(
                "  {} ({}) in resource group {}",
                candidate.name,
                candidate.address_prefixes.join(", "),
                candidate.parent
            ));
        }
    }
    lines.push(String::new());

    if report.unused_subnets.is_empty() {
        lines.push("No unused subnets. Every subnet has an attached interface.".to_string());
    } else {
        lines.push("Subnets with no attached interfaces:".to_string());
        for candidate in &report.unused_subnets {
            lines.push(format!(
                "  {}/{} ({})",
                candidate.parent,
                candidate.name,
                candidate.address_prefixes.join(", ")
            ));
        }
    }
    lines.push(String::new());

    // Footer
    lines.push("=".repeat(80));

    let content = lines.join("\n");
    fs::write(output_path, content)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

/// Print a summary to stdout
pub fn print_summary(report: &InventoryReport) {
    println!("\n=== ADDRESS SPACE SUMMARY ===\n");
    println!("Networks: {}", report.metadata.total_networks);
    println!("Subnets: {}", report.metadata.total_subnets);
    println!("Interfaces: {}", report.metadata.total_interfaces);
    println!("Blocks in use: {}", report.used_cidrs.len());

    println!("\nReclamation:");
    println!("  Unused networks: {}", report.unused_networks.len());
    println!("  Unused subnets: {}", report.unused_subnets.len());

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{InventorySnapshot, NetworkRecord, SubnetRecord};
    use tempfile::TempDir;

    fn report() -> InventoryReport {
        let snapshot = InventorySnapshot {
            networks: vec![NetworkRecord {
                id: "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet-a"
                    .to_string(),
                name: "vnet-a".to_string(),
                address_prefixes: vec!["10.1.0.0/16".to_string()],
                subnets: vec![SubnetRecord {
                    id: "sub-1".to_string(),
                    name: "default".to_string(),
                    address_prefix: "10.1.0.0/24".to_string(),
                    network: "vnet-a".to_string(),
                }],
            }],
            interfaces: vec![],
        };
        InventoryReport::from_snapshot(&snapshot, "test.yaml").unwrap()
    }

    #[test]
    fn test_json_report_round_trips_through_serde() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        generate_json_report(&report(), &path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["metadata"]["total_networks"], 1);
        assert_eq!(parsed["used_cidrs"][0], "10.1.0.0/16");
        assert_eq!(parsed["unused_subnets"][0]["kind"], "subnet");
    }

    #[test]
    fn test_text_report_carries_all_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        generate_text_report(&report(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("NETWORK ADDRESS SPACE REPORT"));
        assert!(text.contains("USED ADDRESS BLOCKS"));
        assert!(text.contains("10.1.0.0/24"));
        assert!(text.contains("SUBNET UTILIZATION"));
        assert!(text.contains("RECLAMATION CANDIDATES"));
        assert!(text.contains("vnet-a/default"));
    }
}
