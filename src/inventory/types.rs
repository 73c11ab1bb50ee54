//! Inventory snapshot type definitions.
//!
//! These structs mirror the shape an inventory provider exports: virtual
//! networks with their declared address prefixes and subnets, plus the
//! network interface attachments that reference subnets. The snapshot is
//! the engine's only view of the outside world; it is handed in per query
//! and never cached or refreshed here.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Match: "/subscriptions/<id>/resourceGroups/<name>/..." in any casing
static RESOURCE_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/resourcegroups/([^/]+)").expect("Invalid resource group regex")
});

/// Extract the resource group name from a provider resource identifier.
///
/// Identifiers look like
/// `/subscriptions/<sub>/resourceGroups/<group>/providers/...`; the
/// path-segment casing varies between provider API surfaces, so the match
/// is case-insensitive. Returns `None` when the identifier carries no
/// resource group segment.
fn resource_group_of(resource_id: &str) -> Option<&str> {
    RESOURCE_GROUP
        .captures(resource_id)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// A subnet carved out of a virtual network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubnetRecord {
    /// Provider resource identifier
    pub id: String,
    /// Subnet name
    pub name: String,
    /// Declared CIDR prefix, e.g. "10.1.0.0/24"
    pub address_prefix: String,
    /// Name of the owning network; filled from the enclosing record when
    /// the snapshot leaves it implicit
    #[serde(default)]
    pub network: String,
}

impl SubnetRecord {
    pub fn resource_group(&self) -> Option<&str> {
        resource_group_of(&self.id)
    }
}

/// A virtual network and its declared address space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkRecord {
    /// Provider resource identifier
    pub id: String,
    /// Network name
    pub name: String,
    /// Declared CIDR prefixes in declaration order; most networks declare
    /// exactly one
    #[serde(default)]
    pub address_prefixes: Vec<String>,
    /// Subnets carved out of this network
    #[serde(default)]
    pub subnets: Vec<SubnetRecord>,
}

impl NetworkRecord {
    pub fn resource_group(&self) -> Option<&str> {
        resource_group_of(&self.id)
    }
}

/// A network interface attachment referencing a subnet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterfaceRecord {
    /// Provider resource identifier of the interface
    pub id: String,
    /// Identifier of the subnet the interface is attached to
    #[serde(default)]
    pub subnet_id: String,
}

/// Point-in-time view of the full network inventory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub networks: Vec<NetworkRecord>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceRecord>,
}

impl InventorySnapshot {
    /// Every declared prefix in the snapshot: each network's prefixes
    /// followed by its subnets' prefixes, in declaration order.
    pub fn all_prefixes(&self) -> impl Iterator<Item = &str> + '_ {
        self.networks.iter().flat_map(|net| {
            net.address_prefixes
                .iter()
                .map(String::as_str)
                .chain(net.subnets.iter().map(|s| s.address_prefix.as_str()))
        })
    }

    /// Total subnets across all networks
    pub fn subnet_count(&self) -> usize {
        self.networks.iter().map(|net| net.subnets.len()).sum()
    }

    /// Find a network by name, or failing that by resource identifier.
    /// Comparison is case-insensitive to match provider lookup behavior.
    pub fn find_network(&self, name_or_id: &str) -> Option<&NetworkRecord> {
        self.networks
            .iter()
            .find(|net| net.name.eq_ignore_ascii_case(name_or_id))
            .or_else(|| {
                self.networks
                    .iter()
                    .find(|net| net.id.eq_ignore_ascii_case(name_or_id))
            })
    }
}
