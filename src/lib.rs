//! Circular watch face
//!
//! Draws an arc that grows with the minutes of the hour around the current
//! hour, colored by the part of the day, and keeps it up to date while the
//! watch is interactive. The board firmware in `main.rs` wires the
//! [`engine::Engine`] to the PineTime display, button and timers.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod engine;
mod error;
pub mod power;
pub mod ui;

pub use error::Error;
