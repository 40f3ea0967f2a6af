//! HT1621 command definitions
//!
//! This module defines the flag codes and 9-bit command words understood by the
//! HT1621 segment LCD controller. Every transaction on the bus starts with a
//! 3-bit flag selecting the frame type, followed by its payload:
//!
//! | Frame | Flag | Payload |
//! |-------|------|---------|
//! | Command | `100` | 9-bit command word |
//! | Write | `101` | 6-bit address + one or more 4-bit nibbles |
//!
//! All fields are transmitted MSB first with no gap between flag and payload.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ht1621::{command, ControllerInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! let mut interface = match Interface::new(MockPin, MockPin, MockPin, MockPin, MockDelay) {
//!     Ok(interface) => interface,
//!     Err(_) => return,
//! };
//!
//! // Start the oscillator and turn the bias generator on
//! let _ = interface.write_command(command::SYS_EN);
//! let _ = interface.write_command(command::LCD_ON);
//! ```

// Frame flags

/// Command frame flag (`100`)
pub const FLAG_COMMAND: u8 = 0b100;

/// Write frame flag (`101`)
///
/// Also used for read-modify-write, which this driver does not issue.
pub const FLAG_WRITE: u8 = 0b101;

/// Read frame flag (`110`)
///
/// Requires reading the DATA line back; listed for completeness only.
pub const FLAG_READ: u8 = 0b110;

/// Width of the flag field in bits
pub const FLAG_BITS: u8 = 3;

/// Width of a command word in bits
pub const COMMAND_BITS: u8 = 9;

/// Width of a display memory address in bits
pub const ADDRESS_BITS: u8 = 6;

/// Width of a display memory cell in bits
pub const NIBBLE_BITS: u8 = 4;

/// Number of nibble cells in display memory
pub const MEMORY_SIZE: u8 = 32;

/// Highest valid display memory address
pub const MAX_ADDRESS: u8 = MEMORY_SIZE - 1;

// System control

/// Turn off system oscillator and LCD bias generator (0x000)
///
/// Power-on default.
pub const SYS_DIS: u16 = 0x000;

/// Turn on system oscillator (0x002)
pub const SYS_EN: u16 = 0x002;

/// Turn off LCD bias generator (0x004)
///
/// Power-on default.
pub const LCD_OFF: u16 = 0x004;

/// Turn on LCD bias generator (0x006)
pub const LCD_ON: u16 = 0x006;

// Time base and watchdog

/// Disable time base output (0x008)
pub const TIMER_DIS: u16 = 0x008;

/// Disable watchdog time-out flag output (0x00A)
pub const WDT_DIS: u16 = 0x00A;

/// Enable time base output (0x00C)
pub const TIMER_EN: u16 = 0x00C;

/// Enable watchdog time-out flag output (0x00E)
pub const WDT_EN: u16 = 0x00E;

/// Clear the time base generator (0x018)
pub const CLR_TIMER: u16 = 0x018;

/// Clear the watchdog timer state (0x01C)
pub const CLR_WDT: u16 = 0x01C;

// Tone output

/// Turn off tone output (0x010)
///
/// Power-on default.
pub const TONE_OFF: u16 = 0x010;

/// Turn on tone output (0x012)
pub const TONE_ON: u16 = 0x012;

/// Tone frequency 4 kHz (0x080)
pub const TONE_4K: u16 = 0x080;

/// Tone frequency 2 kHz (0x0C0)
pub const TONE_2K: u16 = 0x0C0;

// Clock source

/// System clock from a 32.768 kHz crystal (0x028)
pub const XTAL_32K: u16 = 0x028;

/// System clock from the on-chip RC oscillator (0x030)
///
/// Power-on default.
pub const RC_256K: u16 = 0x030;

/// System clock from an external 256 kHz source (0x038)
pub const EXT_256K: u16 = 0x038;

// Bias and common lines

/// 1/2 bias, 2 commons (0x040)
pub const BIAS_HALF_2COM: u16 = 0x040;

/// 1/2 bias, 3 commons (0x048)
pub const BIAS_HALF_3COM: u16 = 0x048;

/// 1/2 bias, 4 commons (0x050)
pub const BIAS_HALF_4COM: u16 = 0x050;

/// 1/3 bias, 2 commons (0x042)
pub const BIAS_THIRD_2COM: u16 = 0x042;

/// 1/3 bias, 3 commons (0x04A)
pub const BIAS_THIRD_3COM: u16 = 0x04A;

/// 1/3 bias, 4 commons (0x052)
pub const BIAS_THIRD_4COM: u16 = 0x052;

// IRQ

/// Disable IRQ output (0x100)
///
/// Power-on default.
pub const IRQ_DIS: u16 = 0x100;

/// Enable IRQ output (0x110)
pub const IRQ_EN: u16 = 0x110;

// Time base / watchdog clock output

/// Time base 1 Hz, watchdog time-out 4 s (0x140)
pub const F1: u16 = 0x140;

/// Time base 2 Hz, watchdog time-out 2 s (0x142)
pub const F2: u16 = 0x142;

/// Time base 4 Hz, watchdog time-out 1 s (0x144)
pub const F4: u16 = 0x144;

/// Time base 8 Hz, watchdog time-out 1/2 s (0x146)
pub const F8: u16 = 0x146;

/// Time base 16 Hz, watchdog time-out 1/4 s (0x148)
pub const F16: u16 = 0x148;

/// Time base 32 Hz, watchdog time-out 1/8 s (0x14A)
pub const F32: u16 = 0x14A;

/// Time base 64 Hz, watchdog time-out 1/16 s (0x14C)
pub const F64: u16 = 0x14C;

/// Time base 128 Hz, watchdog time-out 1/32 s (0x14E)
///
/// Power-on default.
pub const F128: u16 = 0x14E;

// Operating mode

/// Test mode, for the manufacturer only (0x1C0)
pub const TEST: u16 = 0x1C0;

/// Normal mode (0x1C6)
///
/// Power-on default.
pub const NORMAL: u16 = 0x1C6;
