//! Time keeping for the watch face
//!
//! The face never reads a clock directly. Wall-clock time and the active time
//! zone come from a [`TimeSource`], which the board implements on top of its
//! uptime counter and the tests implement with a settable value.

use core::time::Duration;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use crate::Error;

/// Platform-agnostic source of wall-clock time.
pub trait TimeSource {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Time zone currently configured on the device.
    fn time_zone(&self) -> FixedOffset;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn time_zone(&self) -> FixedOffset {
        (**self).time_zone()
    }
}

/// Wall-clock reading paired with the uptime at which it was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeReference {
    /// Clock time
    time: DateTime<Utc>,
    /// Related system uptime in milliseconds
    uptime_ms: u64,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: DateTime::UNIX_EPOCH,
            uptime_ms: 0,
        }
    }
}

impl TimeReference {
    /// Create new time reference from a UTC reading
    pub fn new(time: DateTime<Utc>, uptime_ms: u64) -> Self {
        Self { time, uptime_ms }
    }

    /// Create new time reference from seconds since the Unix epoch
    pub fn from_epoch(secs: i64, uptime_ms: u64) -> Result<Self, Error> {
        let time = DateTime::from_timestamp(secs, 0).ok_or(Error::InvalidTimestamp)?;
        Ok(Self::new(time, uptime_ms))
    }

    /// Wall-clock time at the given uptime.
    ///
    /// Uptimes earlier than the reference are clamped to the reference itself.
    pub fn at(&self, uptime_ms: u64) -> DateTime<Utc> {
        let elapsed = uptime_ms.saturating_sub(self.uptime_ms);
        i64::try_from(elapsed)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|delta| self.time.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Time left until the next multiple of `interval` since the Unix epoch.
///
/// The result lies in `(0, interval]`, so a tick scheduled exactly on a
/// boundary waits for the following one.
pub fn delay_to_boundary(now: DateTime<Utc>, interval: Duration) -> Duration {
    let interval_ms = i64::try_from(interval.as_millis()).unwrap_or(i64::MAX);
    if interval_ms == 0 {
        return Duration::ZERO;
    }
    let elapsed = now.timestamp_millis().rem_euclid(interval_ms);
    Duration::from_millis((interval_ms - elapsed) as u64)
}

/// Cached time zone used to turn UTC instants into displayed local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalClock {
    zone: FixedOffset,
}

impl LocalClock {
    pub fn new(zone: FixedOffset) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    /// Reload the zone from the time source. Returns whether it changed.
    pub fn refresh<T: TimeSource>(&mut self, source: &T) -> bool {
        let zone = source.time_zone();
        let changed = zone != self.zone;
        if changed {
            #[cfg(feature = "defmt")]
            defmt::info!(
                "Time zone changed to UTC{=i32}s",
                zone.local_minus_utc()
            );
            self.zone = zone;
        }
        changed
    }

    /// Current local time in the cached zone
    pub fn local<T: TimeSource>(&self, source: &T) -> DateTime<FixedOffset> {
        source.now().with_timezone(&self.zone)
    }
}
