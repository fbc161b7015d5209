//! Trace address type.
//!
//! Defines a strong type for the 32-bit addresses carried by trace records. It provides:
//! 1. **Type Safety:** Keeps raw addresses apart from tags, set indices, and counters.
//! 2. **Parsing:** Accepts the trace-file form `0x` followed by exactly eight hex digits.
//! 3. **Rendering:** Formats back to the same fixed-width uppercase form.

use std::fmt;

use super::constants::{ADDRESS_BITS, HEX_DIGITS, HEX_PREFIX};

/// A 32-bit byte address taken from a memory-access trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Addr(pub u32);

impl Addr {
    /// Creates a new address from a raw 32-bit value.
    #[inline]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline]
    pub const fn val(&self) -> u32 {
        self.0
    }

    /// Parses the trace-file address form.
    ///
    /// The prefix is `0x` (an uppercase `X` is tolerated) and must be followed by
    /// exactly eight hexadecimal digits of either case.
    ///
    /// # Arguments
    ///
    /// * `text` - The address field as it appears in the trace.
    ///
    /// # Returns
    ///
    /// The parsed address, or `None` if the field is not in that form.
    pub fn from_hex(text: &str) -> Option<Self> {
        let (prefix, digits) = text.split_at_checked(HEX_PREFIX.len())?;
        if !prefix.eq_ignore_ascii_case(HEX_PREFIX) || digits.len() != HEX_DIGITS {
            return None;
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self)
    }

    /// Returns the address as a 32-character bit string, most significant bit first.
    ///
    /// Field boundaries (tag, set, offset) are easiest to check against this form.
    pub fn bit_string(&self) -> String {
        format!("{:0width$b}", self.0, width = ADDRESS_BITS as usize)
    }
}

impl From<u32> for Addr {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{HEX_PREFIX}{:08X}", self.0)
    }
}
