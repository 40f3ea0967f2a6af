//! HT1621 Segment LCD Driver
//!
//! A driver for the HT1621 segment LCD controller, bit-banged over four GPIO
//! lines, with glyph rendering for the GDC03849 temperature/humidity glass.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Full HT1621 command set (oscillator, bias, clock, timer, watchdog, tone, IRQ)
//! - Single and burst display memory writes
//! - Temperature and humidity rendering for the GDC03849 glass
//! - Change-driven polling loop with an explicit stop signal
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use ht1621::{Builder, Gdc03849, Ht1621, Interface};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # #[derive(Clone, Copy)]
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let (cs, rd, wr, data) = (MockPin, MockPin, MockPin, MockPin);
//! # let mut delay = MockDelay;
//! let interface = match Interface::new(cs, rd, wr, data, delay) {
//!     Ok(interface) => interface,
//!     Err(_) => return,
//! };
//! let driver = match Ht1621::new(interface, Builder::new().build(), &mut delay) {
//!     Ok(driver) => driver,
//!     Err(_) => return,
//! };
//!
//! let mut glass = Gdc03849::new(driver);
//! let _ = glass.self_test(&mut delay);
//! let _ = glass.show_temperature(24.5);
//! let _ = glass.show_humidity(61.0);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// HT1621 command definitions
pub mod command;
/// Controller configuration types and builder
pub mod config;
/// Core controller operations
pub mod display;
/// Error types for the driver
pub mod error;
/// GDC03849 glyph rendering
pub mod glyph;
/// Hardware interface abstraction
pub mod interface;
/// Sensor polling loop
pub mod monitor;

#[cfg(test)]
mod mock;

pub use config::{
    BiasCom, Builder, ClockSource, Config, Irq, Mode, TimeBase, TimeBaseFrequency, ToneFrequency,
    Watchdog,
};
pub use display::Ht1621;
pub use error::Error;
pub use glyph::Gdc03849;
pub use interface::{ControllerInterface, Interface, InterfaceError, MIN_EDGE_DELAY_US};
pub use monitor::{Changes, Monitor, MonitorError, Sensor};
