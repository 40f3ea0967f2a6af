//! Hardware interface abstraction
//!
//! This module provides the [`ControllerInterface`] trait and the [`Interface`]
//! struct, which bit-bangs the HT1621 serial protocol over four GPIO lines.
//!
//! ## Hardware Requirements
//!
//! The HT1621 requires 4 output lines:
//! - **CS**: Chip select (active low, brackets one frame)
//! - **RD**: Read clock (unused for writes, held high)
//! - **WR**: Write clock (data latched on the rising edge)
//! - **DATA**: Serial data
//!
//! ## Timing
//!
//! Every edge is followed by a delay of at least [`MIN_EDGE_DELAY_US`]. The
//! delay is a lower bound of the protocol: shorter pulses corrupt frames on
//! real silicon, so it can be raised but never lowered.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use ht1621::{command, ControllerInterface, Interface};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! // Claim the four lines (cs, rd, wr, data)
//! let mut interface = match Interface::new(MockPin, MockPin, MockPin, MockPin, MockDelay) {
//!     Ok(interface) => interface,
//!     Err(_) => return,
//! };
//!
//! // Send a command frame
//! let _ = interface.write_command(command::LCD_ON);
//!
//! // Write three nibbles starting at address 0x04
//! let _ = interface.write_data(0x04, &[0x0F, 0x00, 0x0A]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::command::{ADDRESS_BITS, COMMAND_BITS, FLAG_BITS, FLAG_COMMAND, FLAG_WRITE, NIBBLE_BITS};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Minimum delay after each line edge, in microseconds
pub const MIN_EDGE_DELAY_US: u32 = 4;

/// Trait for the serial link to an HT1621 controller
///
/// This trait abstracts over the line-level implementation, allowing
/// [`Ht1621`](crate::display::Ht1621) to drive any transport that frames
/// HT1621 transactions correctly.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. Implement this trait
/// yourself for transports such as a PIO state machine or an SPI peripheral
/// configured for 9/13-bit words.
pub trait ControllerInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Send one command frame
    ///
    /// The implementation must, inside a single chip-select assertion, send
    /// the flag `100` followed by the low 9 bits of `command`, MSB first.
    ///
    /// # Errors
    ///
    /// Returns an error if driving a line fails.
    fn write_command(&mut self, command: u16) -> InterfaceResult<(), Self::Error>;

    /// Send one write frame
    ///
    /// The implementation must, inside a single chip-select assertion, send
    /// the flag `101`, the low 6 bits of `address`, then the low 4 bits of
    /// every nibble in order. The controller increments the address after
    /// each nibble.
    ///
    /// # Errors
    ///
    /// Returns an error if driving a line fails.
    fn write_data(&mut self, address: u8, nibbles: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Drive every line to its inactive (high) level
    ///
    /// # Errors
    ///
    /// Returns an error if driving a line fails.
    fn idle(&mut self) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<PinErr> {
    /// A line could not be claimed and driven to its idle level
    LineAccess(PinErr),
    /// A line failed while a frame was being sent
    Pin(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LineAccess(e) => write!(f, "Cannot access control line: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Bit-banged interface implementation for the HT1621
///
/// Implements [`ControllerInterface`] on top of embedded-hal v1.0
/// [`OutputPin`] and [`DelayNs`].
///
/// ## Type Parameters
///
/// * `CS` - Chip select pin
/// * `RD` - Read clock pin (held high)
/// * `WR` - Write clock pin
/// * `DATA` - Data pin
/// * `D` - Delay used for edge timing
pub struct Interface<CS, RD, WR, DATA, D> {
    /// Chip select (active low)
    cs: CS,
    /// Read clock, idle high
    rd: RD,
    /// Write clock, data latched on rising edge
    wr: WR,
    /// Serial data
    data: DATA,
    /// Edge timing
    delay: D,
    /// Delay after every edge in microseconds
    edge_delay_us: u32,
}

impl<CS, RD, WR, DATA, D, PinErr> Interface<CS, RD, WR, DATA, D>
where
    CS: OutputPin<Error = PinErr>,
    RD: OutputPin<Error = PinErr>,
    WR: OutputPin<Error = PinErr>,
    DATA: OutputPin<Error = PinErr>,
    D: DelayNs,
{
    /// Claim the four control lines
    ///
    /// Every line is driven high (inactive) before the interface is returned.
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::LineAccess`] if any line cannot be driven.
    pub fn new(
        cs: CS,
        rd: RD,
        wr: WR,
        data: DATA,
        delay: D,
    ) -> InterfaceResult<Self, InterfaceError<PinErr>> {
        let mut interface = Self {
            cs,
            rd,
            wr,
            data,
            delay,
            edge_delay_us: MIN_EDGE_DELAY_US,
        };
        interface.drive_idle().map_err(InterfaceError::LineAccess)?;
        Ok(interface)
    }

    /// Set the delay after every edge, in microseconds
    ///
    /// Values below [`MIN_EDGE_DELAY_US`] are raised to it.
    pub fn set_edge_delay_us(&mut self, delay_us: u32) -> &mut Self {
        self.edge_delay_us = delay_us.max(MIN_EDGE_DELAY_US);
        self
    }

    /// Get the delay after every edge, in microseconds
    pub fn edge_delay_us(&self) -> u32 {
        self.edge_delay_us
    }

    /// Give back the lines and the delay
    pub fn release(self) -> (CS, RD, WR, DATA, D) {
        (self.cs, self.rd, self.wr, self.data, self.delay)
    }

    fn drive_idle(&mut self) -> Result<(), PinErr> {
        self.cs.set_high()?;
        self.rd.set_high()?;
        self.wr.set_high()?;
        self.data.set_high()
    }

    fn begin_frame(&mut self) -> Result<(), PinErr> {
        self.cs.set_low()?;
        self.delay.delay_us(self.edge_delay_us);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), PinErr> {
        self.cs.set_high()?;
        self.delay.delay_us(self.edge_delay_us);
        Ok(())
    }

    /// Clock out the low `width` bits of `value`, MSB first
    fn send_bits(&mut self, value: u16, width: u8) -> Result<(), PinErr> {
        for position in (0..width).rev() {
            self.wr.set_low()?;
            if (value >> position) & 1 == 1 {
                self.data.set_high()?;
            } else {
                self.data.set_low()?;
            }
            self.delay.delay_us(self.edge_delay_us);
            self.wr.set_high()?;
            self.delay.delay_us(self.edge_delay_us);
        }
        Ok(())
    }

    /// Run `body` with chip select asserted
    ///
    /// Chip select is released even when `body` fails, so a broken frame
    /// never runs into the next one. The first error is returned.
    fn framed<F>(&mut self, body: F) -> Result<(), PinErr>
    where
        F: FnOnce(&mut Self) -> Result<(), PinErr>,
    {
        self.begin_frame()?;
        let sent = body(self);
        let ended = self.end_frame();
        sent.and(ended)
    }

    fn send_command_frame(&mut self, command: u16) -> Result<(), PinErr> {
        self.framed(|this| {
            this.send_bits(FLAG_COMMAND.into(), FLAG_BITS)?;
            this.send_bits(command, COMMAND_BITS)
        })
    }

    fn send_write_frame(&mut self, address: u8, nibbles: &[u8]) -> Result<(), PinErr> {
        self.framed(|this| {
            this.send_bits(FLAG_WRITE.into(), FLAG_BITS)?;
            this.send_bits(address.into(), ADDRESS_BITS)?;
            for &nibble in nibbles {
                this.send_bits(nibble.into(), NIBBLE_BITS)?;
            }
            Ok(())
        })
    }
}

impl<CS, RD, WR, DATA, D, PinErr> ControllerInterface for Interface<CS, RD, WR, DATA, D>
where
    CS: OutputPin<Error = PinErr>,
    RD: OutputPin<Error = PinErr>,
    WR: OutputPin<Error = PinErr>,
    DATA: OutputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn write_command(&mut self, command: u16) -> InterfaceResult<(), Self::Error> {
        self.send_command_frame(command).map_err(InterfaceError::Pin)
    }

    fn write_data(&mut self, address: u8, nibbles: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.send_write_frame(address, nibbles)
            .map_err(InterfaceError::Pin)
    }

    fn idle(&mut self) -> InterfaceResult<(), Self::Error> {
        self.drive_idle().map_err(InterfaceError::Pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command;
    use crate::config::Builder;
    use crate::display::Ht1621;
    use crate::error::Error;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use embedded_hal::digital::ErrorType;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Line {
        Cs,
        Rd,
        Wr,
        Data,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Set(Line, bool),
        DelayNs(u32),
    }

    type Trace = Rc<RefCell<Vec<Event>>>;

    #[derive(Debug, Clone, Copy)]
    struct MockError;

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    /// Remaining successful edges before a pin starts failing; `None` never fails
    type FailAfter = Rc<Cell<Option<usize>>>;

    struct MockPin {
        line: Line,
        trace: Trace,
        fail_after: FailAfter,
    }

    impl MockPin {
        fn set(&mut self, level: bool) -> Result<(), MockError> {
            match self.fail_after.get() {
                Some(0) => return Err(MockError),
                Some(n) => self.fail_after.set(Some(n - 1)),
                None => {}
            }
            self.trace.borrow_mut().push(Event::Set(self.line, level));
            Ok(())
        }
    }

    impl ErrorType for MockPin {
        type Error = MockError;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.set(false)
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.set(true)
        }
    }

    struct MockDelay {
        trace: Trace,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.trace.borrow_mut().push(Event::DelayNs(ns));
        }
    }

    type TestInterface = Interface<MockPin, MockPin, MockPin, MockPin, MockDelay>;

    fn pin(line: Line, trace: &Trace) -> MockPin {
        MockPin {
            line,
            trace: trace.clone(),
            fail_after: Rc::new(Cell::new(None)),
        }
    }

    fn test_interface() -> (TestInterface, Trace) {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let interface = Interface::new(
            pin(Line::Cs, &trace),
            pin(Line::Rd, &trace),
            pin(Line::Wr, &trace),
            pin(Line::Data, &trace),
            MockDelay {
                trace: trace.clone(),
            },
        )
        .unwrap();
        trace.borrow_mut().clear();
        (interface, trace)
    }

    /// Bits latched on each WR rising edge, grouped by chip-select assertion
    fn decode_frames(events: &[Event]) -> Vec<Vec<bool>> {
        let mut frames = Vec::new();
        let mut current: Option<Vec<bool>> = None;
        let mut data = true;
        let mut wr = true;
        for event in events {
            match *event {
                Event::Set(Line::Cs, false) => current = Some(Vec::new()),
                Event::Set(Line::Cs, true) => {
                    if let Some(bits) = current.take() {
                        frames.push(bits);
                    }
                }
                Event::Set(Line::Data, level) => data = level,
                Event::Set(Line::Wr, level) => {
                    if level && !wr {
                        if let Some(bits) = current.as_mut() {
                            bits.push(data);
                        }
                    }
                    wr = level;
                }
                _ => {}
            }
        }
        frames
    }

    fn bits(value: u16, width: u8) -> Vec<bool> {
        (0..width).rev().map(|i| (value >> i) & 1 == 1).collect()
    }

    #[test]
    fn test_new_drives_all_lines_high() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let _interface = Interface::new(
            pin(Line::Cs, &trace),
            pin(Line::Rd, &trace),
            pin(Line::Wr, &trace),
            pin(Line::Data, &trace),
            MockDelay {
                trace: trace.clone(),
            },
        )
        .unwrap();
        let events = trace.borrow();
        for line in [Line::Cs, Line::Rd, Line::Wr, Line::Data] {
            assert!(events.contains(&Event::Set(line, true)));
        }
        assert!(!events.iter().any(|e| matches!(e, Event::Set(_, false))));
    }

    #[test]
    fn test_new_reports_line_access_error() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let broken = pin(Line::Wr, &trace);
        broken.fail_after.set(Some(0));
        let result = Interface::new(
            pin(Line::Cs, &trace),
            pin(Line::Rd, &trace),
            broken,
            pin(Line::Data, &trace),
            MockDelay {
                trace: trace.clone(),
            },
        );
        assert!(matches!(result, Err(InterfaceError::LineAccess(MockError))));
    }

    fn last_level(events: &[Event], line: Line) -> Option<bool> {
        events.iter().rev().find_map(|event| match *event {
            Event::Set(l, level) if l == line => Some(level),
            _ => None,
        })
    }

    /// Interface whose WR line can be made to fail after construction
    fn interface_with_wr_fault() -> (TestInterface, Trace, FailAfter) {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let wr = pin(Line::Wr, &trace);
        let fail_after = wr.fail_after.clone();
        let interface = Interface::new(
            pin(Line::Cs, &trace),
            pin(Line::Rd, &trace),
            wr,
            pin(Line::Data, &trace),
            MockDelay {
                trace: trace.clone(),
            },
        )
        .unwrap();
        trace.borrow_mut().clear();
        (interface, trace, fail_after)
    }

    #[test]
    fn test_mid_frame_pin_error_releases_chip_select() {
        let (mut interface, trace, fail_after) = interface_with_wr_fault();
        fail_after.set(Some(5));

        let result = interface.write_command(command::LCD_ON);
        assert!(matches!(result, Err(InterfaceError::Pin(MockError))));

        let events = trace.borrow();
        assert_eq!(last_level(&events, Line::Cs), Some(true));
        assert_eq!(events.last(), Some(&Event::DelayNs(MIN_EDGE_DELAY_US * 1_000)));
    }

    #[test]
    fn test_frame_after_pin_error_starts_clean() {
        let (mut interface, trace, fail_after) = interface_with_wr_fault();
        fail_after.set(Some(5));
        assert!(interface.write_data(0x04, &[0x0A, 0x05]).is_err());

        fail_after.set(None);
        trace.borrow_mut().clear();
        interface.write_command(command::SYS_EN).unwrap();

        let mut expected = bits(command::FLAG_COMMAND.into(), 3);
        expected.extend(bits(command::SYS_EN, 9));
        assert_eq!(decode_frames(&trace.borrow()), alloc::vec![expected]);
    }

    #[test]
    fn test_driver_reports_pin_error_during_burst() {
        let (interface, _trace, fail_after) = interface_with_wr_fault();
        let config = Builder::new().power_up_delay_ms(0).build();
        let mut delay = crate::mock::MockDelay::default();
        // the bit-banged interface is not Debug, so the result cannot be unwrapped
        let Ok(mut driver) = Ht1621::new(interface, config, &mut delay) else {
            panic!("initialization failed");
        };

        fail_after.set(Some(20));
        let result = driver.write_burst(0x00, &[0x0F; 10]);
        assert!(matches!(
            result,
            Err(Error::Interface(InterfaceError::Pin(MockError)))
        ));
    }

    #[test]
    fn test_command_frame_bits() {
        let commands = [
            command::SYS_DIS,
            command::SYS_EN,
            command::LCD_ON,
            command::BIAS_THIRD_4COM,
            command::TONE_2K,
            command::IRQ_EN,
            command::F128,
            command::NORMAL,
        ];
        for cmd in commands {
            let (mut interface, trace) = test_interface();
            interface.write_command(cmd).unwrap();
            let frames = decode_frames(&trace.borrow());
            assert_eq!(frames.len(), 1);
            let mut expected = bits(0b100, 3);
            expected.extend(bits(cmd, 9));
            assert_eq!(frames[0], expected, "command {cmd:#05x}");
        }
    }

    #[test]
    fn test_command_frame_is_twelve_bits() {
        let (mut interface, trace) = test_interface();
        interface.write_command(command::NORMAL).unwrap();
        let frames = decode_frames(&trace.borrow());
        assert_eq!(frames[0].len(), 12);
    }

    #[test]
    fn test_single_write_frame_bits() {
        for (address, nibble) in [(0u8, 0u8), (0x0A, 0x0F), (31, 0x05), (0x15, 0x0A)] {
            let (mut interface, trace) = test_interface();
            interface.write_data(address, &[nibble]).unwrap();
            let frames = decode_frames(&trace.borrow());
            let mut expected = bits(0b101, 3);
            expected.extend(bits(address.into(), 6));
            expected.extend(bits(nibble.into(), 4));
            assert_eq!(frames, alloc::vec![expected]);
        }
    }

    #[test]
    fn test_burst_uses_one_chip_select_assertion() {
        let (mut interface, trace) = test_interface();
        let nibbles = [0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0x8, 0x9, 0xA];
        interface.write_data(0x0A, &nibbles).unwrap();

        let events = trace.borrow();
        let cs_low = events
            .iter()
            .filter(|e| **e == Event::Set(Line::Cs, false))
            .count();
        assert_eq!(cs_low, 1);

        let frames = decode_frames(&events);
        assert_eq!(frames.len(), 1);
        let mut expected = bits(0b101, 3);
        expected.extend(bits(0x0A, 6));
        for n in nibbles {
            expected.extend(bits(n.into(), 4));
        }
        assert_eq!(frames[0], expected);
    }

    #[test]
    fn test_read_line_never_driven_low() {
        let (mut interface, trace) = test_interface();
        interface.write_command(command::LCD_ON).unwrap();
        interface.write_data(0, &[0xF; 4]).unwrap();
        assert!(!trace
            .borrow()
            .iter()
            .any(|e| *e == Event::Set(Line::Rd, false)));
    }

    #[test]
    fn test_every_edge_followed_by_min_delay() {
        let (mut interface, trace) = test_interface();
        interface.write_data(0x03, &[0x9]).unwrap();
        let events = trace.borrow();
        // each CS or WR edge must be followed by a delay before the next WR/CS edge
        let mut pending_edge = false;
        for event in events.iter() {
            match *event {
                Event::Set(Line::Cs | Line::Wr, _) => {
                    assert!(!pending_edge, "edges without delay between them");
                    pending_edge = true;
                }
                Event::DelayNs(ns) => {
                    assert!(ns >= MIN_EDGE_DELAY_US * 1_000);
                    pending_edge = false;
                }
                _ => {}
            }
        }
        assert!(!pending_edge);
    }

    #[test]
    fn test_data_settles_before_rising_edge() {
        let (mut interface, trace) = test_interface();
        interface.write_command(command::TONE_ON).unwrap();
        let events = trace.borrow();
        for (i, event) in events.iter().enumerate() {
            if *event == Event::Set(Line::Wr, true) {
                assert!(matches!(events[i - 1], Event::DelayNs(_)));
            }
        }
    }

    #[test]
    fn test_edge_delay_is_a_lower_bound() {
        let (mut interface, trace) = test_interface();
        assert_eq!(interface.edge_delay_us(), MIN_EDGE_DELAY_US);

        interface.set_edge_delay_us(1);
        assert_eq!(interface.edge_delay_us(), MIN_EDGE_DELAY_US);

        interface.set_edge_delay_us(10);
        assert_eq!(interface.edge_delay_us(), 10);

        interface.write_command(command::LCD_OFF).unwrap();
        assert!(trace
            .borrow()
            .iter()
            .all(|e| !matches!(e, Event::DelayNs(ns) if *ns < 10_000)));
    }

    #[test]
    fn test_frame_ends_with_lines_idle() {
        let (mut interface, trace) = test_interface();
        interface.write_data(0, &[0x0]).unwrap();
        let events = trace.borrow();
        let last_cs = events
            .iter()
            .rev()
            .find_map(|e| match e {
                Event::Set(Line::Cs, level) => Some(*level),
                _ => None,
            });
        let last_wr = events.iter().rev().find_map(|e| match e {
            Event::Set(Line::Wr, level) => Some(*level),
            _ => None,
        });
        assert_eq!(last_cs, Some(true));
        assert_eq!(last_wr, Some(true));
    }
}
