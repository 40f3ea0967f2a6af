//! Change-driven refresh loop for a temperature/humidity sensor
//!
//! [`Monitor`] is the context object a polling loop owns: it holds the glass
//! and the last readings it rendered, and only rewrites a band when its value
//! changes. [`Monitor::run`] drives the loop and stops when the caller's stop
//! signal fires.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ht1621::{Builder, Gdc03849, Ht1621, Interface, Monitor, Sensor};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # #[derive(Clone, Copy)]
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # struct Dht11;
//! # impl Sensor for Dht11 {
//! #     type Error = ();
//! #     fn measure(&mut self) -> Result<(), ()> { Ok(()) }
//! #     fn temperature(&self) -> f32 { 21.0 }
//! #     fn humidity(&self) -> f32 { 40.0 }
//! # }
//! # let mut delay = MockDelay;
//! # let mut sensor = Dht11;
//! let interface = match Interface::new(MockPin, MockPin, MockPin, MockPin, MockDelay) {
//!     Ok(interface) => interface,
//!     Err(_) => return,
//! };
//! let driver = match Ht1621::new(interface, Builder::new().build(), &mut delay) {
//!     Ok(driver) => driver,
//!     Err(_) => return,
//! };
//! let mut glass = Gdc03849::new(driver);
//! let _ = glass.self_test(&mut delay);
//!
//! let mut monitor = Monitor::new(glass);
//! let mut polls = 0;
//! let _ = monitor.run(&mut sensor, &mut delay, 1_000, || {
//!     polls += 1;
//!     polls > 10
//! });
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;

use crate::error::Error;
use crate::glyph::Gdc03849;
use crate::interface::ControllerInterface;

/// A temperature/humidity sensor such as the DHT11
pub trait Sensor {
    /// Error reported by a failed measurement
    type Error: Debug;

    /// Take a new measurement
    ///
    /// # Errors
    ///
    /// Returns an error on a bus or checksum failure.
    fn measure(&mut self) -> Result<(), Self::Error>;

    /// Temperature from the last measurement
    fn temperature(&self) -> f32;

    /// Relative humidity from the last measurement
    fn humidity(&self) -> f32;
}

/// Errors that can occur while polling
#[derive(Debug)]
pub enum MonitorError<S, I: ControllerInterface> {
    /// The sensor failed to measure
    Sensor(S),
    /// Rendering the reading failed
    Display(Error<I>),
}

impl<S, I: ControllerInterface> From<Error<I>> for MonitorError<S, I> {
    fn from(e: Error<I>) -> Self {
        Self::Display(e)
    }
}

impl<S: Debug, I: ControllerInterface> core::fmt::Display for MonitorError<S, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "Sensor error: {e:?}"),
            Self::Display(e) => write!(f, "Display error: {e}"),
        }
    }
}

impl<S: Debug, I: ControllerInterface + Debug> core::error::Error for MonitorError<S, I> {}

/// Which bands a poll rewrote
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    /// Temperature band was rewritten
    pub temperature: bool,
    /// Humidity band was rewritten
    pub humidity: bool,
}

impl Changes {
    /// Whether anything was rewritten
    pub fn any(self) -> bool {
        self.temperature || self.humidity
    }
}

/// Polling context owning the glass and the last rendered readings
pub struct Monitor<I>
where
    I: ControllerInterface,
{
    glass: Gdc03849<I>,
    temperature: Option<f32>,
    humidity: Option<f32>,
}

impl<I> Monitor<I>
where
    I: ControllerInterface,
{
    /// Start with nothing rendered; the first update writes both bands
    pub fn new(glass: Gdc03849<I>) -> Self {
        Self {
            glass,
            temperature: None,
            humidity: None,
        }
    }

    /// Render the readings that differ from the last rendered ones
    pub fn update(&mut self, temperature: f32, humidity: f32) -> Result<Changes, Error<I>> {
        let mut changes = Changes::default();

        if self.temperature != Some(temperature) {
            self.glass.show_temperature(temperature)?;
            self.temperature = Some(temperature);
            changes.temperature = true;
        }
        if self.humidity != Some(humidity) {
            self.glass.show_humidity(humidity)?;
            self.humidity = Some(humidity);
            changes.humidity = true;
        }

        if changes.any() {
            log::debug!("temperature {temperature} | humidity {humidity}");
        }
        Ok(changes)
    }

    /// Measure once and render what changed
    ///
    /// A failed measurement leaves the glass untouched.
    pub fn poll<S: Sensor>(&mut self, sensor: &mut S) -> Result<Changes, MonitorError<S::Error, I>> {
        sensor.measure().map_err(MonitorError::Sensor)?;
        Ok(self.update(sensor.temperature(), sensor.humidity())?)
    }

    /// Poll every `period_ms` until `should_stop` returns true
    ///
    /// `should_stop` is checked before each poll. Sensor errors are logged and
    /// skipped; display errors end the loop.
    pub fn run<S, D, F>(
        &mut self,
        sensor: &mut S,
        delay: &mut D,
        period_ms: u32,
        mut should_stop: F,
    ) -> Result<(), Error<I>>
    where
        S: Sensor,
        D: DelayNs,
        F: FnMut() -> bool,
    {
        while !should_stop() {
            match self.poll(sensor) {
                Ok(_) => {}
                Err(MonitorError::Sensor(e)) => log::warn!("measurement failed: {e:?}"),
                Err(MonitorError::Display(e)) => return Err(e),
            }
            delay.delay_ms(period_ms);
        }
        Ok(())
    }

    /// Access the glass
    pub fn glass(&mut self) -> &mut Gdc03849<I> {
        &mut self.glass
    }

    /// Give back the glass
    pub fn release(self) -> Gdc03849<I> {
        self.glass
    }
}
