//! Inventory snapshots.
//!
//! The data model handed to every query: virtual networks, their subnets,
//! and interface attachments, as exported by the inventory provider.

pub mod loader;
pub mod types;

pub use loader::load_snapshot;
pub use types::{InterfaceRecord, InventorySnapshot, NetworkRecord, SubnetRecord};
