//! Side button of the PineTime, the only wake source of the watch face

use debouncr::{debounce_2, Debouncer, Edge, Repeat2};
use embassy_nrf::{
    gpio::{Input, Output},
    peripherals::{P0_13, P0_15},
};
use embassy_time::{Duration, Timer};

/// Sampling period while waiting for a press
const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub struct Button {
    /// Reads high while pressed
    sense: Input<'static, P0_13>,
    /// Powers the button while sampling
    enable: Output<'static, P0_15>,
    debouncer: Debouncer<u8, Repeat2>,
}

impl Button {
    pub fn init(sense: Input<'static, P0_13>, enable: Output<'static, P0_15>) -> Self {
        Self {
            sense,
            enable,
            debouncer: debounce_2(false),
        }
    }

    /// Wait until the next debounced press
    pub async fn wait_for_press(&mut self) {
        loop {
            if self.sample().await == Some(Edge::Rising) {
                return;
            }
            Timer::after(POLL_INTERVAL).await;
        }
    }

    async fn sample(&mut self) -> Option<Edge> {
        self.enable.set_high();
        // Outputs settle shortly after enabling
        Timer::after(Duration::from_micros(1)).await;
        let edge = self.debouncer.update(self.sense.is_high());
        // Around 34µA drawn while P0.15 stays high
        self.enable.set_low();
        edge
    }
}
