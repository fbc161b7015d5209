//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the cache model, the trace
//! reader, and the simulation driver. It includes:
//! 1. **Address Type:** A strong type for 32-bit trace addresses.
//! 2. **Constants:** Address width and trace-format constants.
//! 3. **Error Handling:** The crate-wide error enum and `Result` alias.

/// Trace address type.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

pub use addr::Addr;
pub use constants::{ADDRESS_BITS, HEX_DIGITS};
pub use error::{Result, SimError};
