//! Glyph rendering for the GDC03849 temperature/humidity glass
//!
//! The glass has two five-digit bands, each backed by 10 nibbles of HT1621
//! display memory:
//!
//! | Band | Addresses | Digit order |
//! |------|-----------|-------------|
//! | Humidity | 0x00..0x0A | most significant digit first |
//! | Temperature | 0x0A..0x14 | least significant digit first |
//!
//! Each digit takes two nibbles. The decimal point, unit and band label
//! segments are part of the glyph codes, so a band always reads as
//! `ddd.dd` followed by its unit.
//!
//! Values are shown with two decimals: the reading is multiplied by 100,
//! truncated toward zero and the last five digits of its magnitude are
//! displayed. Readings of 1000 or more wrap and negative readings lose their
//! sign; callers needing range checks must validate before rendering.
//!
//! ## Example
//!
//! ```
//! use ht1621::glyph::temperature_nibbles;
//!
//! // 24.54 -> "02454" reversed -> 4, 5, 4, 2, 0
//! let nibbles = temperature_nibbles(24.543);
//! assert_eq!(&nibbles[..2], &[0x06, 0x0B]);
//! ```

use embedded_hal::delay::DelayNs;

use crate::command::MEMORY_SIZE;
use crate::display::Ht1621;
use crate::error::Error;
use crate::interface::ControllerInterface;

type GlyphResult<I> = core::result::Result<(), Error<I>>;

/// Digits shown per band
pub const DIGITS: usize = 5;

/// Nibbles written per band
pub const BAND_NIBBLES: usize = DIGITS * 2;

/// First address of the humidity band
pub const HUMIDITY_ADDRESS: u8 = 0x00;

/// First address of the temperature band
pub const TEMPERATURE_ADDRESS: u8 = 0x0A;

/// Temperature band segment codes for digits 0-9
pub const TEMPERATURE_GLYPHS: [[u8; 2]; 10] = [
    [0x0F, 0x0D],
    [0x06, 0x08],
    [0x0B, 0x0E],
    [0x0F, 0x0A],
    [0x06, 0x0B],
    [0x0D, 0x0B],
    [0x0D, 0x0F],
    [0x07, 0x08],
    [0x0F, 0x0F],
    [0x0F, 0x0B],
];

/// Humidity band segment codes for digits 0-9
pub const HUMIDITY_GLYPHS: [[u8; 2]; 10] = [
    [0x0D, 0x0F],
    [0x08, 0x06],
    [0x0B, 0x0D],
    [0x0A, 0x0F],
    [0x0E, 0x06],
    [0x0E, 0x0B],
    [0x0F, 0x0B],
    [0x08, 0x0E],
    [0x0F, 0x0F],
    [0x0E, 0x0F],
];

/// Split a reading into five decimal digits, most significant first
///
/// `24.543` becomes `[0, 2, 4, 5, 4]`.
pub fn digits(value: f32) -> [u8; DIGITS] {
    // saturating cast: NaN becomes 0, infinities clamp
    let scaled = (value * 100.0) as i64;
    let mut magnitude = scaled.unsigned_abs() % 100_000;
    let mut out = [0u8; DIGITS];
    for slot in out.iter_mut().rev() {
        *slot = (magnitude % 10) as u8;
        magnitude /= 10;
    }
    out
}

fn encode<'a>(
    digits: impl Iterator<Item = &'a u8>,
    table: &[[u8; 2]; 10],
) -> [u8; BAND_NIBBLES] {
    let mut nibbles = [0u8; BAND_NIBBLES];
    for (pair, digit) in nibbles.chunks_exact_mut(2).zip(digits) {
        pair.copy_from_slice(&table[usize::from(*digit)]);
    }
    nibbles
}

/// Nibbles for the temperature band, digits reversed
pub fn temperature_nibbles(value: f32) -> [u8; BAND_NIBBLES] {
    encode(digits(value).iter().rev(), &TEMPERATURE_GLYPHS)
}

/// Nibbles for the humidity band, digits in natural order
pub fn humidity_nibbles(value: f32) -> [u8; BAND_NIBBLES] {
    encode(digits(value).iter(), &HUMIDITY_GLYPHS)
}

/// GDC03849 glass driven by an HT1621
///
/// Wraps [`Ht1621`] and renders readings into the two bands.
pub struct Gdc03849<I>
where
    I: ControllerInterface,
{
    driver: Ht1621<I>,
}

impl<I> Gdc03849<I>
where
    I: ControllerInterface,
{
    /// Wrap an initialized controller
    pub fn new(driver: Ht1621<I>) -> Self {
        Self { driver }
    }

    /// Power-up lamp test
    ///
    /// Turns the display on, lights every segment, beeps for one second and
    /// blanks the glass again.
    pub fn self_test<D: DelayNs>(&mut self, delay: &mut D) -> GlyphResult<I> {
        self.driver.display_on()?;
        self.show_all_segments()?;
        self.driver.beep(1, delay)?;
        self.clear_all()
    }

    /// Render a temperature reading into the temperature band
    pub fn show_temperature(&mut self, value: f32) -> GlyphResult<I> {
        log::trace!("temperature {value}");
        self.driver
            .write_burst(TEMPERATURE_ADDRESS, &temperature_nibbles(value))
    }

    /// Render a humidity reading into the humidity band
    pub fn show_humidity(&mut self, value: f32) -> GlyphResult<I> {
        log::trace!("humidity {value}");
        self.driver
            .write_burst(HUMIDITY_ADDRESS, &humidity_nibbles(value))
    }

    /// Light every segment in display memory
    pub fn show_all_segments(&mut self) -> GlyphResult<I> {
        self.driver.fill_range(0, MEMORY_SIZE)
    }

    /// Blank all of display memory
    pub fn clear_all(&mut self) -> GlyphResult<I> {
        self.driver.clear_range(0, MEMORY_SIZE)
    }

    /// Blank the temperature band, label included
    pub fn clear_temperature_region(&mut self) -> GlyphResult<I> {
        self.driver
            .clear_range(TEMPERATURE_ADDRESS, BAND_NIBBLES as u8)
    }

    /// Blank the humidity band, label included
    pub fn clear_humidity_region(&mut self) -> GlyphResult<I> {
        self.driver
            .clear_range(HUMIDITY_ADDRESS, BAND_NIBBLES as u8)
    }

    /// Access the controller driver
    pub fn driver(&mut self) -> &mut Ht1621<I> {
        &mut self.driver
    }

    /// Give back the controller driver
    pub fn release(self) -> Ht1621<I> {
        self.driver
    }
}
