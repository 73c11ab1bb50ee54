//! Report data structures.

use serde::Serialize;

use crate::cidr::{AddressBlock, CidrError};
use crate::inventory::InventorySnapshot;
use crate::planner::{self, ReclamationCandidate};

/// Report metadata block
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// RFC 3339 generation timestamp
    pub generated_at: String,
    /// Where the snapshot came from
    pub snapshot_source: String,
    pub total_networks: usize,
    pub total_subnets: usize,
    pub total_interfaces: usize,
}

/// One row of the per-subnet utilization table
#[derive(Debug, Clone, Serialize)]
pub struct UsageRow {
    pub network: String,
    /// The owning network's declared prefixes, comma separated
    pub network_prefixes: String,
    pub subnet: String,
    pub subnet_prefix: String,
    /// Addresses the subnet covers; `None` when its prefix does not parse
    pub address_count: Option<u64>,
}

/// Full inventory report, serialized to JSON and rendered as text.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    pub metadata: ReportMetadata,
    /// Every used CIDR in ascending address order
    pub used_cidrs: Vec<String>,
    pub usage: Vec<UsageRow>,
    pub unused_networks: Vec<ReclamationCandidate>,
    pub unused_subnets: Vec<ReclamationCandidate>,
}

/// Per-subnet utilization rows in snapshot declaration order.
pub fn usage_rows(snapshot: &InventorySnapshot) -> Vec<UsageRow> {
    snapshot
        .networks
        .iter()
        .flat_map(|net| {
            net.subnets.iter().map(move |subnet| UsageRow {
                network: net.name.clone(),
                network_prefixes: net.address_prefixes.join(", "),
                subnet: subnet.name.clone(),
                subnet_prefix: subnet.address_prefix.clone(),
                address_count: subnet
                    .address_prefix
                    .parse::<AddressBlock>()
                    .ok()
                    .map(|block| block.address_count()),
            })
        })
        .collect()
}

impl InventoryReport {
    /// Build the full report for a snapshot.
    ///
    /// Fails when the snapshot's declared prefixes cannot form a used set;
    /// a report that silently dropped a claimed block would misstate the
    /// address space.
    pub fn from_snapshot(snapshot: &InventorySnapshot, source: &str) -> Result<Self, CidrError> {
        let used = planner::used_blocks(snapshot)?;
        Ok(Self {
            metadata: ReportMetadata {
                generated_at: chrono::Utc::now().to_rfc3339(),
                snapshot_source: source.to_string(),
                total_networks: snapshot.networks.len(),
                total_subnets: snapshot.subnet_count(),
                total_interfaces: snapshot.interfaces.len(),
            },
            used_cidrs: used.iter().map(|block| block.to_string()).collect(),
            usage: usage_rows(snapshot),
            unused_networks: planner::find_reclaimable_networks(snapshot),
            unused_subnets: planner::find_reclaimable_subnets(snapshot),
        })
    }
}
