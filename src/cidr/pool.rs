//! Search pools of top-level address ranges.

use super::block::{AddressBlock, CidrError};

/// Ordered collection of top-level ranges the planner searches for free
/// blocks.
///
/// Range order is part of the contract: when more than one range could
/// satisfy a request, the earliest declared range wins. That precedence,
/// plus ascending-address search inside each range, is what makes
/// suggestions reproducible run over run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPool {
    ranges: Vec<AddressBlock>,
}

impl AddressPool {
    /// The three RFC 1918 private ranges in precedence order: 10/8 first,
    /// then 172.16/12, then 192.168/16.
    pub fn rfc1918() -> Self {
        Self {
            ranges: vec![
                AddressBlock::from_parts(u32::from_be_bytes([10, 0, 0, 0]), 8),
                AddressBlock::from_parts(u32::from_be_bytes([172, 16, 0, 0]), 12),
                AddressBlock::from_parts(u32::from_be_bytes([192, 168, 0, 0]), 16),
            ],
        }
    }

    /// Build a pool from explicit ranges, preserving their order as search
    /// precedence.
    ///
    /// The list must be non-empty and the ranges pairwise disjoint;
    /// overlapping ranges would let the same address be suggested twice
    /// under different names.
    pub fn new(ranges: Vec<AddressBlock>) -> Result<Self, CidrError> {
        if ranges.is_empty() {
            return Err(CidrError::Range("address pool cannot be empty".to_string()));
        }
        for (i, a) in ranges.iter().enumerate() {
            for b in &ranges[i + 1..] {
                if a.overlaps(b) {
                    return Err(CidrError::Range(format!("pool ranges {a} and {b} overlap")));
                }
            }
        }
        Ok(Self { ranges })
    }

    /// Ranges in precedence order
    pub fn ranges(&self) -> &[AddressBlock] {
        &self.ranges
    }
}
