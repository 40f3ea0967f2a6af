//! Controller configuration types and builder

use crate::command;

/// Default wait after driving the lines idle, before the first command
pub const DEFAULT_POWER_UP_DELAY_MS: u32 = 1_000;

/// Time base output (timer) setting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeBase {
    /// Time base output disabled
    #[default]
    Disabled,
    /// Time base output enabled
    Enabled,
}

impl TimeBase {
    /// Command word applying this setting
    pub fn command(self) -> u16 {
        match self {
            Self::Disabled => command::TIMER_DIS,
            Self::Enabled => command::TIMER_EN,
        }
    }
}

/// Watchdog time-out flag output setting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Watchdog {
    /// Watchdog flag output disabled
    #[default]
    Disabled,
    /// Watchdog flag output enabled
    Enabled,
}

impl Watchdog {
    /// Command word applying this setting
    pub fn command(self) -> u16 {
        match self {
            Self::Disabled => command::WDT_DIS,
            Self::Enabled => command::WDT_EN,
        }
    }
}

/// System clock source
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClockSource {
    /// On-chip 256 kHz RC oscillator
    #[default]
    Rc256k,
    /// External 256 kHz clock on OSCI
    Ext256k,
    /// 32.768 kHz crystal
    Xtal32k,
}

impl ClockSource {
    /// Command word applying this setting
    pub fn command(self) -> u16 {
        match self {
            Self::Rc256k => command::RC_256K,
            Self::Ext256k => command::EXT_256K,
            Self::Xtal32k => command::XTAL_32K,
        }
    }
}

/// LCD bias and number of common lines
///
/// Must match the glass. The GDC03849 is driven at 1/3 bias with 4 commons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BiasCom {
    /// 1/2 bias, 2 commons
    Half2Com,
    /// 1/2 bias, 3 commons
    Half3Com,
    /// 1/2 bias, 4 commons
    Half4Com,
    /// 1/3 bias, 2 commons
    Third2Com,
    /// 1/3 bias, 3 commons
    Third3Com,
    /// 1/3 bias, 4 commons
    #[default]
    Third4Com,
}

impl BiasCom {
    /// Command word applying this setting
    pub fn command(self) -> u16 {
        match self {
            Self::Half2Com => command::BIAS_HALF_2COM,
            Self::Half3Com => command::BIAS_HALF_3COM,
            Self::Half4Com => command::BIAS_HALF_4COM,
            Self::Third2Com => command::BIAS_THIRD_2COM,
            Self::Third3Com => command::BIAS_THIRD_3COM,
            Self::Third4Com => command::BIAS_THIRD_4COM,
        }
    }
}

/// Tone output frequency
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToneFrequency {
    /// 2 kHz
    Khz2,
    /// 4 kHz
    #[default]
    Khz4,
}

impl ToneFrequency {
    /// Command word applying this setting
    pub fn command(self) -> u16 {
        match self {
            Self::Khz2 => command::TONE_2K,
            Self::Khz4 => command::TONE_4K,
        }
    }
}

/// IRQ output setting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Irq {
    /// IRQ output disabled
    #[default]
    Disabled,
    /// IRQ output enabled
    Enabled,
}

impl Irq {
    /// Command word applying this setting
    pub fn command(self) -> u16 {
        match self {
            Self::Disabled => command::IRQ_DIS,
            Self::Enabled => command::IRQ_EN,
        }
    }
}

/// Time base / watchdog clock output frequency
///
/// The watchdog time-out is `4 s / frequency_hz`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeBaseFrequency {
    /// 1 Hz (watchdog 4 s)
    Hz1,
    /// 2 Hz (watchdog 2 s)
    Hz2,
    /// 4 Hz (watchdog 1 s)
    Hz4,
    /// 8 Hz (watchdog 1/2 s)
    Hz8,
    /// 16 Hz (watchdog 1/4 s)
    Hz16,
    /// 32 Hz (watchdog 1/8 s)
    Hz32,
    /// 64 Hz (watchdog 1/16 s)
    Hz64,
    /// 128 Hz (watchdog 1/32 s)
    #[default]
    Hz128,
}

impl TimeBaseFrequency {
    /// Command word applying this setting
    pub fn command(self) -> u16 {
        match self {
            Self::Hz1 => command::F1,
            Self::Hz2 => command::F2,
            Self::Hz4 => command::F4,
            Self::Hz8 => command::F8,
            Self::Hz16 => command::F16,
            Self::Hz32 => command::F32,
            Self::Hz64 => command::F64,
            Self::Hz128 => command::F128,
        }
    }
}

/// Operating mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Normal operation
    #[default]
    Normal,
    /// Manufacturer test mode
    Test,
}

impl Mode {
    /// Command word applying this setting
    pub fn command(self) -> u16 {
        match self {
            Self::Normal => command::NORMAL,
            Self::Test => command::TEST,
        }
    }
}

/// Controller configuration
///
/// Applied in full by every initialization. Use [`Builder`] to create one, or
/// `Config::default()` for the settings the GDC03849 glass expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Time base output
    pub time_base: TimeBase,
    /// Watchdog flag output
    pub watchdog: Watchdog,
    /// System clock source
    pub clock_source: ClockSource,
    /// Bias and common lines
    pub bias_com: BiasCom,
    /// Tone output frequency
    pub tone_frequency: ToneFrequency,
    /// IRQ output
    pub irq: Irq,
    /// Time base / watchdog clock frequency
    pub time_base_frequency: TimeBaseFrequency,
    /// Operating mode
    pub mode: Mode,
    /// Settle time before the first command, in milliseconds
    pub power_up_delay_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Builder::new().build()
    }
}

impl Config {
    /// Settings sent after the oscillator is re-enabled, in transmission order
    pub fn setting_commands(&self) -> [u16; 7] {
        [
            self.time_base.command(),
            self.clock_source.command(),
            self.bias_com.command(),
            self.tone_frequency.command(),
            self.irq.command(),
            self.time_base_frequency.command(),
            self.mode.command(),
        ]
    }
}

/// Builder for constructing controller configuration
///
/// # Example
///
/// ```
/// use ht1621::{BiasCom, Builder, ToneFrequency};
///
/// let config = Builder::new()
///     .bias_com(BiasCom::Third4Com)
///     .tone_frequency(ToneFrequency::Khz2)
///     .power_up_delay_ms(0)
///     .build();
/// assert_eq!(config.tone_frequency, ToneFrequency::Khz2);
/// ```
#[must_use]
pub struct Builder {
    time_base: TimeBase,
    watchdog: Watchdog,
    clock_source: ClockSource,
    bias_com: BiasCom,
    tone_frequency: ToneFrequency,
    irq: Irq,
    time_base_frequency: TimeBaseFrequency,
    mode: Mode,
    power_up_delay_ms: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            time_base: TimeBase::Disabled,
            watchdog: Watchdog::Disabled,
            clock_source: ClockSource::Rc256k,
            bias_com: BiasCom::Third4Com,
            tone_frequency: ToneFrequency::Khz4,
            irq: Irq::Disabled,
            time_base_frequency: TimeBaseFrequency::Hz128,
            mode: Mode::Normal,
            power_up_delay_ms: DEFAULT_POWER_UP_DELAY_MS,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set time base output
    pub fn time_base(mut self, value: TimeBase) -> Self {
        self.time_base = value;
        self
    }

    /// Set watchdog flag output
    pub fn watchdog(mut self, value: Watchdog) -> Self {
        self.watchdog = value;
        self
    }

    /// Set system clock source
    pub fn clock_source(mut self, value: ClockSource) -> Self {
        self.clock_source = value;
        self
    }

    /// Set bias and common lines
    pub fn bias_com(mut self, value: BiasCom) -> Self {
        self.bias_com = value;
        self
    }

    /// Set tone output frequency
    pub fn tone_frequency(mut self, value: ToneFrequency) -> Self {
        self.tone_frequency = value;
        self
    }

    /// Set IRQ output
    pub fn irq(mut self, value: Irq) -> Self {
        self.irq = value;
        self
    }

    /// Set time base / watchdog clock frequency
    pub fn time_base_frequency(mut self, value: TimeBaseFrequency) -> Self {
        self.time_base_frequency = value;
        self
    }

    /// Set operating mode
    pub fn mode(mut self, value: Mode) -> Self {
        self.mode = value;
        self
    }

    /// Set the settle time before the first command
    pub fn power_up_delay_ms(mut self, value: u32) -> Self {
        self.power_up_delay_ms = value;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        Config {
            time_base: self.time_base,
            watchdog: self.watchdog,
            clock_source: self.clock_source,
            bias_com: self.bias_com,
            tone_frequency: self.tone_frequency,
            irq: self.irq,
            time_base_frequency: self.time_base_frequency,
            mode: self.mode,
            power_up_delay_ms: self.power_up_delay_ms,
        }
    }
}
