//! IPv4 address space model.
//!
//! Exact integer arithmetic over CIDR blocks (parsing, containment,
//! overlap, subdivision), the pool of top-level ranges searched for free
//! space, and the set of blocks an inventory already claims.

pub mod block;
pub mod pool;
pub mod used;

pub use block::{prefix_size, AddressBlock, CidrError};
pub use pool::AddressPool;
pub use used::UsedSet;
