//! Error types for the driver
//!
//! This module defines the error returned by controller operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`Error`] - Runtime errors during controller operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level line errors,
//!   including the fatal [`LineAccess`](crate::interface::InterfaceError::LineAccess)
//!   raised when the lines cannot be claimed
//! - [`MonitorError`](crate::monitor::MonitorError) - Sensor or display failure
//!   while polling
//!
//! The HT1621 bus has no acknowledgment, so no error reports a rejected frame.
//! Out-of-range addresses are caught before any line is touched. A line that
//! fails mid-frame surfaces as [`Error::Interface`], with chip select released.

use crate::command::{MAX_ADDRESS, MEMORY_SIZE};
use crate::interface::ControllerInterface;

/// Errors that can occur when interacting with the controller
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: ControllerInterface> {
    /// Interface error (GPIO)
    ///
    /// Wraps the underlying hardware error from the [`ControllerInterface`] implementation.
    Interface(I::Error),
    /// Display memory address outside 0..=31
    InvalidAddress {
        /// Address requested
        address: u8,
    },
    /// Write would run past the end of display memory
    ///
    /// `address + len` must not exceed 32.
    BurstOverflow {
        /// Start address
        address: u8,
        /// Number of nibbles requested
        len: usize,
    },
}

impl<I: ControllerInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::InvalidAddress { address } => {
                write!(f, "Invalid address {address:#04x} (max {MAX_ADDRESS:#04x})")
            }
            Self::BurstOverflow { address, len } => write!(
                f,
                "Write of {len} nibbles at {address:#04x} exceeds {MEMORY_SIZE}-nibble memory"
            ),
        }
    }
}

impl<I: ControllerInterface + core::fmt::Debug> core::error::Error for Error<I> {}
