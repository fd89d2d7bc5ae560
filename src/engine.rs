//! Watch face engine
//!
//! Reacts to the lifecycle callbacks of the host: visibility, ambient mode,
//! device properties, surface changes, ticks and time zone changes. The engine
//! keeps a single repeating update aligned to the update interval running
//! while the face is visible and interactive, and asks the host to redraw
//! whenever the displayed state may have changed.

use core::time::Duration;

use chrono::Timelike;
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565};

use crate::{
    clock::{delay_to_boundary, LocalClock, TimeSource},
    config::WatchFaceConfig,
    ui::{FaceGeometry, ScreenShape, WatchFace, WatchFaceState},
};

/// Services the platform provides to the engine.
///
/// All calls happen on the thread that dispatches the engine's events.
pub trait Host {
    /// Request a redraw of the face
    fn invalidate(&mut self);

    /// Start delivering time zone changes
    fn register_time_zone_listener(&mut self);

    /// Stop delivering time zone changes
    fn unregister_time_zone_listener(&mut self);

    /// Deliver a timer event after `delay`, replacing any pending one
    fn schedule_update(&mut self, delay: Duration);

    /// Drop the pending timer event, if any
    fn cancel_update(&mut self);
}

pub struct Engine<F, T> {
    face: F,
    time_source: T,
    clock: LocalClock,
    geometry: FaceGeometry,
    update_interval: Duration,
    visible: bool,
    ambient: bool,
    /// Device property: ambient mode has reduced color depth
    low_bit_ambient: bool,
    anti_alias: bool,
    registered_time_zone_listener: bool,
}

impl<F, T> Engine<F, T>
where
    F: WatchFace,
    T: TimeSource,
{
    /// Create the engine. It starts hidden, interactive and without a timer.
    pub fn new(config: &WatchFaceConfig, face: F, time_source: T) -> Self {
        let clock = LocalClock::new(time_source.time_zone());
        Self {
            face,
            time_source,
            clock,
            geometry: FaceGeometry::default(),
            update_interval: config.update_interval,
            visible: false,
            ambient: false,
            low_bit_ambient: false,
            anti_alias: true,
            registered_time_zone_listener: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_in_ambient_mode(&self) -> bool {
        self.ambient
    }

    pub fn geometry(&self) -> FaceGeometry {
        self.geometry
    }

    pub fn time_source(&self) -> &T {
        &self.time_source
    }

    /// The update timer runs only while visible and interactive
    pub fn should_timer_be_running(&self) -> bool {
        self.visible && !self.ambient
    }

    pub fn on_properties_changed(&mut self, low_bit_ambient: bool) {
        self.low_bit_ambient = low_bit_ambient;
        self.update_anti_alias();
    }

    /// Periodic tick of the host, delivered while ambient
    pub fn on_time_tick<H: Host>(&mut self, host: &mut H) {
        host.invalidate();
    }

    pub fn on_ambient_mode_changed<H: Host>(&mut self, ambient: bool, host: &mut H) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Ambient mode: {}", ambient);

        if self.ambient != ambient {
            self.ambient = ambient;
            self.update_anti_alias();
            if ambient {
                self.unregister_receiver(host);
            } else if self.visible {
                self.register_receiver(host);
                self.clock.refresh(&self.time_source);
            }
            host.invalidate();
        }

        // Whether the timer runs depends on visibility as well
        self.update_timer(host);
    }

    pub fn on_visibility_changed<H: Host>(&mut self, visible: bool, host: &mut H) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Visible: {}", visible);

        self.visible = visible;
        if visible {
            if !self.ambient {
                self.register_receiver(host);
            }
            // The zone may have changed while hidden
            self.clock.refresh(&self.time_source);
        } else {
            self.unregister_receiver(host);
        }

        self.update_timer(host);
    }

    /// The device time zone changed
    pub fn on_time_zone_changed<H: Host>(&mut self, host: &mut H) {
        if !self.registered_time_zone_listener {
            #[cfg(feature = "defmt")]
            defmt::debug!("Time zone change ignored, listener not registered");
            return;
        }
        self.clock.refresh(&self.time_source);
        host.invalidate();
    }

    /// The update scheduled through [`Host::schedule_update`] is due
    pub fn on_timer_fired<H: Host>(&mut self, host: &mut H) {
        host.invalidate();
        if self.should_timer_be_running() {
            let delay = delay_to_boundary(self.time_source.now(), self.update_interval);
            host.schedule_update(delay);
        }
    }

    pub fn on_surface_changed(&mut self, width: u32, height: u32) {
        self.geometry.on_surface_changed(width, height);
    }

    pub fn on_apply_window_insets(&mut self, shape: ScreenShape, chin: u32) {
        self.geometry.on_insets(shape, chin);
    }

    /// Snapshot of what the face shows right now
    pub fn state(&self) -> WatchFaceState {
        let local = self.clock.local(&self.time_source);
        WatchFaceState {
            hour: local.hour(),
            minute: local.minute(),
            ambient: self.ambient,
            anti_alias: self.anti_alias,
            geometry: self.geometry,
        }
    }

    pub fn on_draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.face.draw(target, &self.state())
    }

    /// Flat colors only while ambient on a low-bit display
    fn update_anti_alias(&mut self) {
        self.anti_alias = !(self.ambient && self.low_bit_ambient);
    }

    fn register_receiver<H: Host>(&mut self, host: &mut H) {
        if self.registered_time_zone_listener {
            return;
        }
        self.registered_time_zone_listener = true;
        host.register_time_zone_listener();
    }

    fn unregister_receiver<H: Host>(&mut self, host: &mut H) {
        if !self.registered_time_zone_listener {
            return;
        }
        self.registered_time_zone_listener = false;
        host.unregister_time_zone_listener();
    }

    /// Restart the timer so the first update happens immediately
    fn update_timer<H: Host>(&mut self, host: &mut H) {
        host.cancel_update();
        if self.should_timer_be_running() {
            host.schedule_update(Duration::ZERO);
        }
    }
}
