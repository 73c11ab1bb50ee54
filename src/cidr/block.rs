//! IPv4 CIDR block arithmetic.
//!
//! Everything the planner decides rests on the integer arithmetic in this
//! file: parsing and normalizing CIDR notation, containment and overlap
//! tests, and ordered subdivision into smaller blocks. All operations are
//! exact; there is no floating point anywhere in the address math.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

/// Errors from CIDR parsing and block arithmetic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    /// Text that does not denote any IPv4 block at all
    #[error("Invalid CIDR notation: {0}")]
    Format(String),

    /// Structurally valid input asking for an impossible operation
    #[error("Invalid range: {0}")]
    Range(String),
}

/// Number of addresses covered by a prefix length, `2^(32 - prefix_len)`.
///
/// Returned as `u64` because a /0 covers 2^32 addresses, one more than
/// `u32` can hold. `prefix_len` must be at most 32.
pub fn prefix_size(prefix_len: u8) -> u64 {
    debug_assert!(prefix_len <= 32);
    1u64 << (32 - u32::from(prefix_len))
}

/// Network mask for a prefix length (high `prefix_len` bits set).
fn net_mask(prefix_len: u8) -> u32 {
    debug_assert!(prefix_len <= 32);
    match prefix_len {
        0 => 0,
        n => u32::MAX << (32 - u32::from(n)),
    }
}

/// Host mask for a prefix length (low `32 - prefix_len` bits set).
fn host_mask(prefix_len: u8) -> u32 {
    !net_mask(prefix_len)
}

/// An IPv4 network prefix: base address plus prefix length.
///
/// The base is stored normalized with all host bits cleared, so two blocks
/// compare equal exactly when they denote the same address range. Ordering
/// is by base address first, which gives collections of blocks the
/// ascending-address order the planner relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressBlock {
    base: u32,
    prefix_len: u8,
}

impl AddressBlock {
    /// Build a block from a base address and prefix length, masking the
    /// base down to its block boundary.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::net::Ipv4Addr;
    /// use cidrplan::cidr::AddressBlock;
    ///
    /// let block = AddressBlock::new(Ipv4Addr::new(10, 0, 0, 5), 24)?;
    /// assert_eq!(block.to_string(), "10.0.0.0/24");
    /// # Ok::<(), cidrplan::cidr::CidrError>(())
    /// ```
    pub fn new(base: Ipv4Addr, prefix_len: u8) -> Result<Self, CidrError> {
        if prefix_len > 32 {
            return Err(CidrError::Format(format!(
                "prefix length /{prefix_len} is outside the valid /0..=/32 range"
            )));
        }
        Ok(Self {
            base: u32::from(base) & net_mask(prefix_len),
            prefix_len,
        })
    }

    /// Build a block from parts known valid at compile time. The base must
    /// already be aligned to the prefix length.
    pub(crate) const fn from_parts(base: u32, prefix_len: u8) -> Self {
        Self { base, prefix_len }
    }

    /// First address of the block
    pub fn base(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.base)
    }

    /// Prefix length in bits
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Lowest address of the range as a raw integer
    pub fn range_start(&self) -> u32 {
        self.base
    }

    /// Highest address of the range as a raw integer
    pub fn range_end(&self) -> u32 {
        self.base | host_mask(self.prefix_len)
    }

    /// Total number of addresses in the block
    pub fn address_count(&self) -> u64 {
        prefix_size(self.prefix_len)
    }

    /// True when `inner`'s entire range lies within this block.
    pub fn contains(&self, inner: &AddressBlock) -> bool {
        inner.prefix_len >= self.prefix_len
            && (inner.base & net_mask(self.prefix_len)) == self.base
    }

    /// True when the two blocks share at least one address.
    ///
    /// Works on the range intervals directly, so blocks of different sizes
    /// and either containment direction are all handled by the same
    /// comparison. Adjacent blocks do not overlap.
    pub fn overlaps(&self, other: &AddressBlock) -> bool {
        self.range_start() <= other.range_end() && other.range_start() <= self.range_end()
    }

    /// Enumerate every child block of `new_prefix_len` inside this block in
    /// ascending address order.
    ///
    /// A prefix length equal to the block's own yields the block itself as
    /// the only child. Asking for a prefix shorter than the block's own, or
    /// longer than /32, is a range error.
    pub fn subdivide(
        &self,
        new_prefix_len: u8,
    ) -> Result<impl Iterator<Item = AddressBlock>, CidrError> {
        if new_prefix_len > 32 {
            return Err(CidrError::Range(format!(
                "cannot subdivide {self} into /{new_prefix_len} blocks: prefix length exceeds /32"
            )));
        }
        if new_prefix_len < self.prefix_len {
            return Err(CidrError::Range(format!(
                "cannot subdivide {self} into larger /{new_prefix_len} blocks"
            )));
        }
        Ok(self.children_unchecked(new_prefix_len))
    }

    /// Child enumeration without the argument checks. Callers must ensure
    /// `self.prefix_len <= new_prefix_len <= 32`.
    pub(crate) fn children_unchecked(
        &self,
        new_prefix_len: u8,
    ) -> impl Iterator<Item = AddressBlock> {
        debug_assert!(new_prefix_len <= 32 && new_prefix_len >= self.prefix_len);
        let count = 1u64 << u32::from(new_prefix_len - self.prefix_len);
        let step = prefix_size(new_prefix_len);
        let base = u64::from(self.base);
        (0..count).map(move |i| AddressBlock {
            base: (base + i * step) as u32,
            prefix_len: new_prefix_len,
        })
    }
}

impl FromStr for AddressBlock {
    type Err = CidrError;

    /// Parse standard `a.b.c.d/p` notation. Host bits in the address part
    /// are masked off rather than rejected, so `10.0.0.5/24` parses as
    /// `10.0.0.0/24`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (addr_text, len_text) = trimmed.split_once('/').ok_or_else(|| {
            CidrError::Format(format!("'{trimmed}' is missing the /prefix-length part"))
        })?;
        let base: Ipv4Addr = addr_text
            .parse()
            .map_err(|_| CidrError::Format(format!("'{addr_text}' is not a valid IPv4 address")))?;
        let prefix_len: u8 = len_text
            .parse()
            .map_err(|_| CidrError::Format(format!("'{len_text}' is not a valid prefix length")))?;
        AddressBlock::new(base, prefix_len)
    }
}

impl fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base(), self.prefix_len)
    }
}
