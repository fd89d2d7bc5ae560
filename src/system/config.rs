//! General system configuration

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::Priority,
};

use circular_watchface::{
    config::WatchFaceConfig,
    power::PowerConfig,
    ui::HourFormat,
    Error,
};

/// Time zone until the watch learns a better one, east of UTC in seconds
pub const TIMEZONE: i32 = 3_600;

pub struct SystemConfig {}

impl SystemConfig {
    /// Create new system configuration
    pub fn new() -> Config {
        // Generate default config, required because Config is set as
        // `non_exhaustive`
        let mut config = Config::default();

        // Set high-frequency and low-frequency clock sources to external
        config.hfclk_source = HfclkSource::ExternalXtal;
        config.lfclk_source = LfclkSource::ExternalXtal;

        // Enable DC/DC regulator to massively reduce runtime current consumption
        config.dcdc.reg1 = true;

        // The RTC time driver wakes the update timer, GPIOTE is unused
        config.time_interrupt_priority = Priority::P2;

        // Allow debugging
        config.debug = Debug::Allowed;

        config
    }

    /// Watch face settings of this board
    pub fn watchface() -> Result<WatchFaceConfig, Error> {
        WatchFaceConfig::default()
            .with_hour_format(HourFormat::H24)
            .with_utc_offset(TIMEZONE)
    }

    /// Timeouts and backlight levels per power state
    pub fn power() -> PowerConfig {
        PowerConfig::default()
    }
}
