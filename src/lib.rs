//! # Cidrplan - CIDR allocation planning for cloud network inventories
//!
//! This library answers allocation questions about a cloud virtual network
//! inventory: what address space is in use, where a new non-overlapping
//! CIDR block of a requested size fits, and which allocated resources
//! could be reclaimed because nothing depends on them.
//!
//! ## Overview
//!
//! Cidrplan works on point-in-time inventory snapshots rather than live
//! provider APIs. A snapshot lists virtual networks with their declared
//! prefixes and subnets, plus the network interface attachments that
//! reference subnets. Every query rebuilds its view of used address space
//! from the snapshot it is given, so answers never depend on hidden state.
//!
//! ## Key Features
//!
//! - **Deterministic suggestions**: pool ranges searched in precedence
//!   order, candidates in ascending address order, identical output for
//!   identical input
//! - **Exact arithmetic**: CIDR blocks as integer ranges, no string
//!   comparison anywhere in the overlap logic
//! - **Multi-block planning**: smallest parent block able to hold N
//!   subnets of a requested size, with the subnets carved out
//! - **Reclamation detection**: unused networks and unattached subnets
//! - **Reports**: JSON and text renderings of the full address space
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `cidr`: address blocks, the search pool, and used-block tracking
//! - `inventory`: snapshot types and file loading
//! - `planner`: free-block searches and reclamation queries
//! - `report`: report building and rendering
//! - `config`: pool ranges and request limits
//!
//! ## Example Usage
//!
//! ```rust
//! use cidrplan::cidr::{AddressPool, UsedSet};
//! use cidrplan::planner;
//!
//! let pool = AddressPool::rfc1918();
//! let used = UsedSet::from_prefixes(["10.0.0.0/16"])?;
//!
//! let block = planner::suggest_block(&pool, &used, 16)?;
//! assert_eq!(block.map(|b| b.to_string()), Some("10.1.0.0/16".to_string()));
//! # Ok::<(), cidrplan::cidr::CidrError>(())
//! ```
//!
//! ## Snapshot Format
//!
//! Snapshots are YAML (or JSON) files shaped like the provider export:
//!
//! ```yaml
//! networks:
//!   - id: /subscriptions/.../virtualNetworks/prod-vnet
//!     name: prod-vnet
//!     address_prefixes: ["10.1.0.0/16"]
//!     subnets:
//!       - id: /subscriptions/.../subnets/web
//!         name: web
//!         address_prefix: 10.1.0.0/24
//! interfaces:
//!   - id: /subscriptions/.../networkInterfaces/web-nic
//!     subnet_id: /subscriptions/.../subnets/web
//! ```
//!
//! ## Error Handling
//!
//! The library distinguishes three outcomes. Malformed CIDR text anywhere
//! in the inventory is `CidrError::Format` and always fatal to the query.
//! Impossible requests (count zero, child larger than parent) are
//! `CidrError::Range`. Exhaustion, when no block fits, is `Ok(None)`
//! rather than an error. The binary layers `color_eyre` on top for
//! contextual reports.

pub mod cidr;
pub mod config;
pub mod inventory;
pub mod planner;
pub mod report;
