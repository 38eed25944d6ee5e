//! Unified error type for sofle-status.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use core::fmt;

/// Top-level error type used across the widget and firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // UI / Display
    /// Drawing to or flushing a display surface failed.
    Display,

    /// The surface registry is at capacity.
    RegistryFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Display => f.write_str("display surface error"),
            Error::RegistryFull => f.write_str("surface registry full"),
        }
    }
}
