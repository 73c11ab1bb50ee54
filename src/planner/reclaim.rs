//! Reclamation candidate detection.
//!
//! Finds allocated resources nothing depends on: networks with no subnets
//! and subnets no interface attachment references. Detection only; acting
//! on a candidate is up to the operator.

use std::collections::HashSet;

use serde::Serialize;

use crate::inventory::{InventorySnapshot, NetworkRecord, SubnetRecord};

/// Kind of resource a reclamation candidate is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Network,
    Subnet,
}

/// An allocated resource with no dependents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReclamationCandidate {
    pub kind: CandidateKind,
    pub name: String,
    /// Resource group for a network, owning network name for a subnet
    pub parent: String,
    /// Declared prefixes; a subnet always carries exactly one
    pub address_prefixes: Vec<String>,
}

/// Networks with no subnets carved out of them. Deleting one frees its
/// entire declared address space.
pub fn find_reclaimable_networks(snapshot: &InventorySnapshot) -> Vec<ReclamationCandidate> {
    snapshot
        .networks
        .iter()
        .filter(|net| net.subnets.is_empty())
        .map(network_candidate)
        .collect()
}

/// Subnets referenced by no interface attachment.
///
/// Identifier comparison is case-insensitive; providers do not report
/// resource identifiers consistently cased across API surfaces.
/// Attachments with an empty subnet reference are ignored.
pub fn find_reclaimable_subnets(snapshot: &InventorySnapshot) -> Vec<ReclamationCandidate> {
    let attached: HashSet<String> = snapshot
        .interfaces
        .iter()
        .filter(|nic| !nic.subnet_id.is_empty())
        .map(|nic| nic.subnet_id.to_lowercase())
        .collect();

    snapshot
        .networks
        .iter()
        .flat_map(|net| net.subnets.iter().map(move |subnet| (net, subnet)))
        .filter(|(_, subnet)| !attached.contains(&subnet.id.to_lowercase()))
        .map(|(net, subnet)| subnet_candidate(net, subnet))
        .collect()
}

fn network_candidate(net: &NetworkRecord) -> ReclamationCandidate {
    ReclamationCandidate {
        kind: CandidateKind::Network,
        name: net.name.clone(),
        parent: net.resource_group().unwrap_or("").to_string(),
        address_prefixes: net.address_prefixes.clone(),
    }
}

fn subnet_candidate(net: &NetworkRecord, subnet: &SubnetRecord) -> ReclamationCandidate {
    ReclamationCandidate {
        kind: CandidateKind::Subnet,
        name: subnet.name.clone(),
        parent: if subnet.network.is_empty() {
            net.name.clone()
        } else {
            subnet.network.clone()
        },
        address_prefixes: vec![subnet.address_prefix.clone()],
    }
}
