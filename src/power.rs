//! Power states of the watch
//!
//! The watch has no framework deciding when the face is ambient or hidden, so
//! the board drives these transitions itself from button presses and
//! inactivity timeouts. Each transition yields the engine callbacks it implies.

use core::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Full brightness, redraw every minute
    Interactive,
    /// Dimmed, redraw on host ticks only
    Ambient,
    /// Backlight off, face hidden
    Off,
}

/// Engine callback resulting from a power transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerEvent {
    Visibility(bool),
    Ambient(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerConfig {
    /// Idle time before going ambient
    pub ambient_timeout: Duration,
    /// Idle time in ambient before switching the display off
    pub off_timeout: Duration,
    /// Backlight level (0–7) while interactive
    pub interactive_brightness: u8,
    /// Backlight level (0–7) while ambient
    pub ambient_brightness: u8,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            ambient_timeout: Duration::from_secs(15),
            off_timeout: Duration::from_secs(60),
            interactive_brightness: 4,
            ambient_brightness: 1,
        }
    }
}

/// Up to two engine callbacks, in dispatch order
pub type PowerEvents = [Option<PowerEvent>; 2];

pub struct PowerPolicy {
    config: PowerConfig,
    state: PowerState,
}

impl PowerPolicy {
    /// The watch boots switched off; call [`PowerPolicy::on_wake`] to show the face
    pub fn new(config: PowerConfig) -> Self {
        Self {
            config,
            state: PowerState::Off,
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    /// User activity, e.g. a button press
    pub fn on_wake(&mut self) -> PowerEvents {
        let events = match self.state {
            PowerState::Off => [
                Some(PowerEvent::Visibility(true)),
                Some(PowerEvent::Ambient(false)),
            ],
            PowerState::Ambient => [Some(PowerEvent::Ambient(false)), None],
            PowerState::Interactive => [None, None],
        };
        self.state = PowerState::Interactive;
        events
    }

    /// The timeout of the current state elapsed without activity
    pub fn on_inactivity(&mut self) -> PowerEvents {
        let (next, event) = match self.state {
            PowerState::Interactive => (PowerState::Ambient, Some(PowerEvent::Ambient(true))),
            PowerState::Ambient => (PowerState::Off, Some(PowerEvent::Visibility(false))),
            PowerState::Off => (PowerState::Off, None),
        };
        self.state = next;
        [event, None]
    }

    /// Idle time until the next step down, `None` once off
    pub fn timeout(&self) -> Option<Duration> {
        match self.state {
            PowerState::Interactive => Some(self.config.ambient_timeout),
            PowerState::Ambient => Some(self.config.off_timeout),
            PowerState::Off => None,
        }
    }

    /// Backlight level for the current state
    pub fn brightness(&self) -> u8 {
        match self.state {
            PowerState::Interactive => self.config.interactive_brightness,
            PowerState::Ambient => self.config.ambient_brightness,
            PowerState::Off => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boots_off() {
        let policy = PowerPolicy::new(PowerConfig::default());
        assert_eq!(policy.state(), PowerState::Off);
        assert_eq!(policy.timeout(), None);
        assert_eq!(policy.brightness(), 0);
    }

    #[test]
    fn wake_from_off_shows_interactive_face() {
        let mut policy = PowerPolicy::new(PowerConfig::default());
        assert_eq!(
            policy.on_wake(),
            [
                Some(PowerEvent::Visibility(true)),
                Some(PowerEvent::Ambient(false))
            ]
        );
        assert_eq!(policy.state(), PowerState::Interactive);
        assert_eq!(policy.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(policy.brightness(), 4);
    }

    #[test]
    fn inactivity_steps_down() {
        let mut policy = PowerPolicy::new(PowerConfig::default());
        policy.on_wake();

        assert_eq!(policy.on_inactivity(), [Some(PowerEvent::Ambient(true)), None]);
        assert_eq!(policy.state(), PowerState::Ambient);
        assert_eq!(policy.brightness(), 1);
        assert_eq!(policy.timeout(), Some(Duration::from_secs(60)));

        assert_eq!(
            policy.on_inactivity(),
            [Some(PowerEvent::Visibility(false)), None]
        );
        assert_eq!(policy.state(), PowerState::Off);

        assert_eq!(policy.on_inactivity(), [None, None]);
        assert_eq!(policy.state(), PowerState::Off);
    }

    #[test]
    fn wake_from_ambient() {
        let mut policy = PowerPolicy::new(PowerConfig::default());
        policy.on_wake();
        policy.on_inactivity();

        assert_eq!(policy.on_wake(), [Some(PowerEvent::Ambient(false)), None]);
        assert_eq!(policy.on_wake(), [None, None]);
        assert_eq!(policy.state(), PowerState::Interactive);
    }
}
