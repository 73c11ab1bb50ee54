//! Allocation planning.
//!
//! Pure query functions over an inventory snapshot: deterministic
//! free-block searches in the address pool and reclamation candidate
//! detection. Nothing here performs I/O or mutates the inventory; callers
//! supply the snapshot and pool explicitly and interpret the answers.

pub mod allocation;
pub mod reclaim;

pub use allocation::{
    suggest_block, suggest_parent_block, suggest_subnets_within, used_blocks, ParentSuggestion,
};
pub use reclaim::{
    find_reclaimable_networks, find_reclaimable_subnets, CandidateKind, ReclamationCandidate,
};
