//! Free-block search.
//!
//! All searches are deterministic: pool ranges are visited in declared
//! precedence order and candidates within a range in ascending address
//! order, so the same inventory always yields the same suggestion. Ranges
//! are searched in parallel, but `find_map_first` keeps the result
//! identical to a sequential left-to-right scan.

use log::debug;
use rayon::prelude::*;

use crate::cidr::{prefix_size, AddressBlock, AddressPool, CidrError, UsedSet};
use crate::inventory::InventorySnapshot;

/// A suggested parent block together with the child blocks carved from its
/// start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentSuggestion {
    /// Smallest free block able to hold all requested children
    pub parent: AddressBlock,
    /// The first `count` children of the requested size, in ascending
    /// address order
    pub subnets: Vec<AddressBlock>,
}

/// Build the used set for a snapshot: the union of every network's
/// declared prefixes and every subnet's declared prefix.
pub fn used_blocks(snapshot: &InventorySnapshot) -> Result<UsedSet, CidrError> {
    UsedSet::from_prefixes(snapshot.all_prefixes())
}

/// Suggest the first free block of `prefix_len` in the pool.
///
/// Returns `Ok(None)` when every candidate in every range conflicts with a
/// used block; exhaustion is an answer, not an error.
pub fn suggest_block(
    pool: &AddressPool,
    used: &UsedSet,
    prefix_len: u8,
) -> Result<Option<AddressBlock>, CidrError> {
    if prefix_len > 32 {
        return Err(CidrError::Range(format!(
            "requested prefix length /{prefix_len} exceeds /32"
        )));
    }
    debug!(
        "Searching {} pool range(s) for a free /{} against {} used block(s)",
        pool.ranges().len(),
        prefix_len,
        used.len()
    );
    Ok(pool
        .ranges()
        .par_iter()
        .find_map_first(|range| first_fit(range, prefix_len, used)))
}

/// Suggest the smallest free parent block that can hold `count` children
/// of `child_prefix_len`, along with those children.
///
/// Parent sizes are tried finest first, starting at the minimum size whose
/// capacity covers the request and stopping at each range's own size. A
/// size with no free block in one range does not end the search; coarser
/// sizes in that range and all later ranges are still tried.
pub fn suggest_parent_block(
    pool: &AddressPool,
    used: &UsedSet,
    child_prefix_len: u8,
    count: u32,
) -> Result<Option<ParentSuggestion>, CidrError> {
    if child_prefix_len > 32 {
        return Err(CidrError::Range(format!(
            "requested prefix length /{child_prefix_len} exceeds /32"
        )));
    }
    if count == 0 {
        return Err(CidrError::Range("subnet count must be at least 1".to_string()));
    }

    // Total address demand; u128 because count * 2^(32 - p) can reach 2^64.
    let needed = u128::from(count) * u128::from(prefix_size(child_prefix_len));
    let start_prefix = (0..=child_prefix_len)
        .rev()
        .find(|&p| u128::from(prefix_size(p)) >= needed);
    let Some(start_prefix) = start_prefix else {
        debug!("No parent size can hold {count} x /{child_prefix_len}");
        return Ok(None);
    };

    debug!(
        "Searching for a parent of {count} x /{child_prefix_len}, starting at /{start_prefix}"
    );
    Ok(pool.ranges().par_iter().find_map_first(|range| {
        parent_in_range(range, start_prefix, child_prefix_len, count, used)
    }))
}

/// Suggest `count` free child blocks of `child_prefix_len` inside an
/// existing parent, skipping children that conflict with `existing`.
///
/// Returns `Ok(None)` when fewer than `count` children survive. Unlike the
/// pool searches, a child prefix shorter than the parent's is a range
/// error here: the caller named the parent, so an oversized child is a bad
/// request rather than space to skip.
pub fn suggest_subnets_within(
    parent: &AddressBlock,
    existing: &UsedSet,
    child_prefix_len: u8,
    count: u32,
) -> Result<Option<Vec<AddressBlock>>, CidrError> {
    if count == 0 {
        return Err(CidrError::Range("subnet count must be at least 1".to_string()));
    }
    let free: Vec<AddressBlock> = parent
        .subdivide(child_prefix_len)?
        .filter(|candidate| !existing.conflicts_with(candidate))
        .take(count as usize)
        .collect();
    if free.len() == count as usize {
        Ok(Some(free))
    } else {
        debug!(
            "Only {} of {count} requested /{child_prefix_len} children fit in {parent}",
            free.len()
        );
        Ok(None)
    }
}

/// First block of `prefix_len` inside `range` that conflicts with nothing
/// in `used`. A range smaller than the requested block yields nothing.
fn first_fit(range: &AddressBlock, prefix_len: u8, used: &UsedSet) -> Option<AddressBlock> {
    if prefix_len < range.prefix_len() {
        return None;
    }
    range
        .children_unchecked(prefix_len)
        .find(|candidate| !used.conflicts_with(candidate))
}

/// Search one pool range for the smallest free parent, sweeping parent
/// sizes from `start_prefix` up to the size of the range itself.
fn parent_in_range(
    range: &AddressBlock,
    start_prefix: u8,
    child_prefix_len: u8,
    count: u32,
    used: &UsedSet,
) -> Option<ParentSuggestion> {
    for parent_prefix in (range.prefix_len()..=start_prefix).rev() {
        let Some(parent) = first_fit(range, parent_prefix, used) else {
            continue;
        };
        let subnets: Vec<AddressBlock> = parent
            .children_unchecked(child_prefix_len)
            .take(count as usize)
            .collect();
        if subnets.len() == count as usize {
            return Some(ParentSuggestion { parent, subnets });
        }
    }
    None
}
