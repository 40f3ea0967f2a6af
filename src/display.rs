//! Core controller operations

use embedded_hal::delay::DelayNs;

use crate::command::{
    CLR_TIMER, CLR_WDT, LCD_OFF, LCD_ON, MAX_ADDRESS, MEMORY_SIZE, SYS_DIS, SYS_EN, TONE_OFF,
    TONE_ON,
};
use crate::config::Config;
use crate::error::Error;
use crate::interface::ControllerInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Nibble value lighting every segment of a cell
pub const ALL_SEGMENTS: u8 = 0x0F;

/// Core driver for the HT1621
///
/// Owns the interface (and through it the four control lines) for its whole
/// lifetime. All operations block until the last frame has been clocked out.
pub struct Ht1621<I>
where
    I: ControllerInterface,
{
    /// Hardware interface
    interface: I,
    /// Controller configuration, re-applied on every initialization
    config: Config,
    /// Whether the LCD bias generator is on
    is_display_on: bool,
}

impl<I> Ht1621<I>
where
    I: ControllerInterface,
{
    /// Create the driver and run a full initialization
    ///
    /// The display is left blank with the bias generator off; call
    /// [`display_on`](Self::display_on) to show memory contents.
    pub fn new<D: DelayNs>(interface: I, config: Config, delay: &mut D) -> Result<Self, Error<I>> {
        let mut driver = Self {
            interface,
            config,
            is_display_on: false,
        };
        driver.initialize(delay)?;
        Ok(driver)
    }

    /// Re-apply the stored configuration and blank display memory
    ///
    /// Sequence: idle lines and settle, stop the oscillator, apply the watchdog
    /// setting, restart the oscillator, apply the remaining settings, clear
    /// the timer and watchdog, then zero all 32 nibbles. Calling this twice
    /// leaves the controller in the same state.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        log::debug!("initializing HT1621 with {:?}", self.config);

        self.interface.idle().map_err(Error::Interface)?;
        delay.delay_ms(self.config.power_up_delay_ms);

        self.write_command(SYS_DIS)?;
        self.write_command(self.config.watchdog.command())?;
        self.write_command(SYS_EN)?;
        for command in self.config.setting_commands() {
            self.write_command(command)?;
        }
        self.write_command(CLR_TIMER)?;
        self.write_command(CLR_WDT)?;

        // SYS_DIS also stops the bias generator
        self.is_display_on = false;

        self.clear_range(0, MEMORY_SIZE)
    }

    /// Replace the configuration and re-initialize
    pub fn reconfigure<D: DelayNs>(&mut self, config: Config, delay: &mut D) -> DisplayResult<I> {
        self.config = config;
        self.initialize(delay)
    }

    /// Send a raw command word
    ///
    /// Only the low 9 bits are transmitted. See [`crate::command`] for values.
    pub fn write_command(&mut self, command: u16) -> DisplayResult<I> {
        log::trace!("command {command:#05x}");
        self.interface
            .write_command(command)
            .map_err(Error::Interface)
    }

    /// Write a single nibble
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidAddress` if `address` is above 31.
    pub fn write_one(&mut self, address: u8, nibble: u8) -> DisplayResult<I> {
        self.write_burst(address, &[nibble])
    }

    /// Write consecutive nibbles in a single framed transaction
    ///
    /// Chip select stays asserted for the whole burst; the controller advances
    /// the address after every nibble. An empty slice sends nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidAddress` if `address` is above 31, or
    /// `Error::BurstOverflow` if the burst would run past address 31.
    pub fn write_burst(&mut self, address: u8, nibbles: &[u8]) -> DisplayResult<I> {
        Self::check_range(address, nibbles.len())?;
        self.send_burst(address, nibbles)
    }

    /// Send a burst whose range has already been checked
    fn send_burst(&mut self, address: u8, nibbles: &[u8]) -> DisplayResult<I> {
        if nibbles.is_empty() {
            return Ok(());
        }
        log::trace!("write {} nibbles at {address:#04x}", nibbles.len());
        self.interface
            .write_data(address, nibbles)
            .map_err(Error::Interface)
    }

    /// Zero `count` nibbles starting at `address`
    pub fn clear_range(&mut self, address: u8, count: u8) -> DisplayResult<I> {
        self.fill_with(address, count, 0x00)
    }

    /// Light every segment of `count` nibbles starting at `address`
    pub fn fill_range(&mut self, address: u8, count: u8) -> DisplayResult<I> {
        self.fill_with(address, count, ALL_SEGMENTS)
    }

    fn fill_with(&mut self, address: u8, count: u8, value: u8) -> DisplayResult<I> {
        let buffer = [value; MEMORY_SIZE as usize];
        let count = usize::from(count);
        Self::check_range(address, count)?;
        self.send_burst(address, &buffer[..count])
    }

    /// Turn on the LCD bias generator
    pub fn display_on(&mut self) -> DisplayResult<I> {
        log::debug!("display on");
        self.write_command(LCD_ON)?;
        self.is_display_on = true;
        Ok(())
    }

    /// Turn off the LCD bias generator
    ///
    /// Display memory is kept.
    pub fn display_off(&mut self) -> DisplayResult<I> {
        log::debug!("display off");
        self.write_command(LCD_OFF)?;
        self.is_display_on = false;
        Ok(())
    }

    /// Start the tone output
    pub fn tone_on(&mut self) -> DisplayResult<I> {
        self.write_command(TONE_ON)
    }

    /// Stop the tone output
    pub fn tone_off(&mut self) -> DisplayResult<I> {
        self.write_command(TONE_OFF)
    }

    /// Sound the buzzer for `seconds`
    ///
    /// Blocks for the whole duration. Use [`beep_ms`](Self::beep_ms) for
    /// sub-second tones.
    pub fn beep<D: DelayNs>(&mut self, seconds: u32, delay: &mut D) -> DisplayResult<I> {
        log::debug!("beep for {seconds} s");
        self.tone_on()?;
        for _ in 0..seconds {
            delay.delay_ms(1_000);
        }
        self.tone_off()
    }

    /// Sound the buzzer for `ms` milliseconds
    pub fn beep_ms<D: DelayNs>(&mut self, ms: u32, delay: &mut D) -> DisplayResult<I> {
        log::debug!("beep for {ms} ms");
        self.tone_on()?;
        delay.delay_ms(ms);
        self.tone_off()
    }

    /// Clear the time base generator
    pub fn clear_timer(&mut self) -> DisplayResult<I> {
        self.write_command(CLR_TIMER)
    }

    /// Clear the watchdog timer
    pub fn clear_watchdog(&mut self) -> DisplayResult<I> {
        self.write_command(CLR_WDT)
    }

    /// Enter the low-power state
    ///
    /// Turns off the bias generator and the system oscillator. Call
    /// [`initialize`](Self::initialize) to resume.
    pub fn shutdown(&mut self) -> DisplayResult<I> {
        log::debug!("shutdown");
        self.write_command(LCD_OFF)?;
        self.write_command(SYS_DIS)?;
        self.is_display_on = false;
        Ok(())
    }

    /// Whether the LCD bias generator is on
    pub fn is_display_on(&self) -> bool {
        self.is_display_on
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }

    #[cfg(test)]
    pub(crate) fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    fn check_range(address: u8, len: usize) -> DisplayResult<I> {
        if address > MAX_ADDRESS {
            log::warn!("rejected address {address:#04x}");
            return Err(Error::InvalidAddress { address });
        }
        if usize::from(address) + len > usize::from(MEMORY_SIZE) {
            log::warn!("rejected {len}-nibble write at {address:#04x}");
            return Err(Error::BurstOverflow { address, len });
        }
        Ok(())
    }
}
