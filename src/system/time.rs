//! Time keeping module for PineTime
//!
//! The watch has no real-time clock. Wall-clock time is a reference reading
//! (the firmware build time at boot) advanced by the uptime of the RTC timer.

use chrono::{DateTime, FixedOffset, Utc};
use embassy_time::Instant;

use circular_watchface::{
    clock::{TimeReference, TimeSource},
    Error,
};

/// Copies share the reference reading and read the same uptime counter
#[derive(Clone, Copy)]
pub struct DeviceClock {
    reference: TimeReference,
    zone: FixedOffset,
}

impl DeviceClock {
    /// Start the clock at `utc_epoch` seconds, taken now
    pub fn init(utc_epoch: i64, zone: FixedOffset) -> Result<Self, Error> {
        Ok(Self {
            reference: TimeReference::from_epoch(utc_epoch, Instant::now().as_millis())?,
            zone,
        })
    }
}

impl TimeSource for DeviceClock {
    fn now(&self) -> DateTime<Utc> {
        self.reference.at(Instant::now().as_millis())
    }

    fn time_zone(&self) -> FixedOffset {
        self.zone
    }
}
