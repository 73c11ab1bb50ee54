//! Used-block tracking.
//!
//! A `UsedSet` is the set of address blocks an inventory snapshot has
//! already claimed. It is rebuilt from the snapshot for every query, so
//! there is no shared allocation state to keep consistent between calls.

use std::collections::BTreeSet;

use super::block::{AddressBlock, CidrError};

/// Set of address blocks already claimed by the inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedSet {
    blocks: BTreeSet<AddressBlock>,
}

impl UsedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a collection of CIDR strings into a used set.
    ///
    /// The first malformed entry fails the whole build. A dropped entry
    /// would remove a claimed block from consideration and later searches
    /// could hand out address space that is actually taken.
    pub fn from_prefixes<I, S>(prefixes: I) -> Result<Self, CidrError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for prefix in prefixes {
            set.insert(prefix.as_ref().parse()?);
        }
        Ok(set)
    }

    /// Record a block as used. Returns false when it was already present.
    pub fn insert(&mut self, block: AddressBlock) -> bool {
        self.blocks.insert(block)
    }

    /// Exact membership test: same base address and prefix length.
    pub fn contains(&self, block: &AddressBlock) -> bool {
        self.blocks.contains(block)
    }

    /// True when `candidate` is itself used or shares any address with a
    /// used block, in either containment direction.
    pub fn conflicts_with(&self, candidate: &AddressBlock) -> bool {
        self.blocks.contains(candidate) || self.blocks.iter().any(|used| used.overlaps(candidate))
    }

    /// Used blocks in ascending address order
    pub fn iter(&self) -> impl Iterator<Item = &AddressBlock> + '_ {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
