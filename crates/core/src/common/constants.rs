//! Global Simulator Constants.
//!
//! This module defines constants used across the simulator. It includes:
//! 1. **Address Constants:** Width of a trace address and its hex rendering.
//! 2. **Geometry Limits:** The largest cache size whose byte count is representable.

/// Width of a trace address in bits.
pub const ADDRESS_BITS: u32 = 32;

/// Number of hexadecimal digits in a trace address (after the `0x` prefix).
pub const HEX_DIGITS: usize = 8;

/// Prefix every trace address carries.
pub const HEX_PREFIX: &str = "0x";

/// Largest cache size exponent accepted; byte counts are held in a `u64`.
///
/// Whether the line store fits in memory is decided when it is allocated.
pub const MAX_CACHE_SIZE_EXP: u32 = u64::BITS - 1;
