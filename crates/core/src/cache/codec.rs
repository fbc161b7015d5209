//! Address decomposition into tag and set-index fields.
//!
//! A 32-bit address is read most-significant bit first as
//! `[ tag | set index | offset ]`, with widths `tag_bits`, `num_sets_exp`, and
//! `line_size_exp`. The offset field is never extracted: the simulation works at
//! line granularity.

use crate::common::Addr;
use crate::common::constants::ADDRESS_BITS;
use crate::config::CacheConfig;

/// Splits addresses into `(tag, set)` pairs for one cache geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressCodec {
    tag_bits: u32,
    num_sets_exp: u32,
    line_size_exp: u32,
}

impl AddressCodec {
    /// Creates a codec for the field widths of `config`.
    pub const fn new(config: &CacheConfig) -> Self {
        Self {
            tag_bits: config.tag_bits(),
            num_sets_exp: config.num_sets_exp(),
            line_size_exp: config.line_size_exp(),
        }
    }

    /// Returns the value of the top `tag_bits` bits.
    ///
    /// With no tag bits every address has tag `0`.
    #[inline]
    pub const fn tag(&self, addr: Addr) -> u32 {
        if self.tag_bits == 0 {
            return 0;
        }
        addr.val() >> (ADDRESS_BITS - self.tag_bits)
    }

    /// Returns the value of the `num_sets_exp` bits following the tag.
    ///
    /// A single-set cache always yields set `0`.
    #[inline]
    pub const fn set(&self, addr: Addr) -> usize {
        if self.num_sets_exp == 0 {
            return 0;
        }
        let mask = (1u32 << self.num_sets_exp) - 1;
        ((addr.val() >> self.line_size_exp) & mask) as usize
    }

    /// Decodes an address into `(tag, set)`.
    #[inline]
    pub const fn decode(&self, addr: Addr) -> (u32, usize) {
        (self.tag(addr), self.set(addr))
    }

    /// Width of the tag field.
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Width of the set-index field.
    pub const fn set_bits(&self) -> u32 {
        self.num_sets_exp
    }
}
