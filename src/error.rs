//! Error type for the watch face library

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Time zone offset outside of ±24 h
    InvalidUtcOffset,
    /// Update interval of zero
    InvalidInterval,
    /// Epoch that cannot be represented as a date
    InvalidTimestamp,
    /// Text did not fit its buffer
    Format,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidUtcOffset => f.write_str("UTC offset out of range"),
            Error::InvalidInterval => f.write_str("update interval must not be zero"),
            Error::InvalidTimestamp => f.write_str("timestamp out of range"),
            Error::Format => f.write_str("text buffer too small"),
        }
    }
}
