#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pin, Pull},
    peripherals::SPI2,
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel, signal::Signal};
use embassy_time::{Duration, Timer};

bind_interrupts!(struct Irqs {
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use circular_watchface::{
    clock::{delay_to_boundary, TimeSource},
    engine::{Engine, Host},
    power::{PowerEvent, PowerEvents, PowerPolicy},
    ui::CircularWatchface,
};
use peripherals::{backlight::Backlight, button::Button, display::Display};
use system::{config::SystemConfig, time::DeviceClock};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

type WatchEngine = Engine<CircularWatchface, DeviceClock>;

/// Period of the ambient time tick
const TICK_INTERVAL: core::time::Duration = core::time::Duration::from_secs(60);

/// Messages for the watch face task, handled one at a time in order
#[derive(defmt::Format)]
enum WatchEvent {
    ButtonPressed,
    Inactive,
    TimerFired,
    TimeTick,
}

// Communication channels
static EVENTS: Channel<ThreadModeRawMutex, WatchEvent, 8> = Channel::new();
/// Delay of the next face update, `None` cancels it
static SCHEDULE: Signal<ThreadModeRawMutex, Option<Duration>> = Signal::new();
/// Idle timeout of the current power state, restarted on every signal
static ACTIVITY: Signal<ThreadModeRawMutex, Option<Duration>> = Signal::new();

/// Board side of the engine's host services
#[derive(Default)]
struct BoardHost {
    redraw: bool,
}

impl Host for BoardHost {
    fn invalidate(&mut self) {
        self.redraw = true;
    }

    fn register_time_zone_listener(&mut self) {
        // The zone is fixed at build time, nothing reports changes yet
        defmt::debug!("Time zone listener registered");
    }

    fn unregister_time_zone_listener(&mut self) {
        defmt::debug!("Time zone listener unregistered");
    }

    fn schedule_update(&mut self, delay: core::time::Duration) {
        SCHEDULE.signal(Some(Duration::from_millis(delay.as_millis() as u64)));
    }

    fn cancel_update(&mut self) {
        SCHEDULE.signal(None);
    }
}

/// Forward power transitions to the engine
fn dispatch(engine: &mut WatchEngine, events: PowerEvents, host: &mut BoardHost) {
    for event in events.into_iter().flatten() {
        defmt::info!("Power event: {}", event);
        match event {
            PowerEvent::Visibility(visible) => engine.on_visibility_changed(visible, host),
            PowerEvent::Ambient(ambient) => engine.on_ambient_mode_changed(ambient, host),
        }
    }
}

/// Owns the engine and the screen; the single consumer of watch events.
#[embassy_executor::task(pool_size = 1)]
async fn watchface(
    mut engine: WatchEngine,
    mut display: Display,
    mut backlight: Backlight,
    mut policy: PowerPolicy,
) {
    let mut host = BoardHost::default();

    let geometry = display.geometry();
    engine.on_surface_changed(geometry.bounds().size.width, geometry.bounds().size.height);
    engine.on_apply_window_insets(geometry.shape(), geometry.chin());
    // The LCD keeps its full color depth when dimmed
    engine.on_properties_changed(false);

    let events = policy.on_wake();
    dispatch(&mut engine, events, &mut host);
    power_changed(&mut backlight, &policy);

    loop {
        if host.redraw && engine.is_visible() {
            host.redraw = false;
            if let Err(e) = display.render(&engine) {
                defmt::warn!("Redraw failed: {}", e);
            }
        }

        match EVENTS.receive().await {
            WatchEvent::ButtonPressed => {
                let events = policy.on_wake();
                dispatch(&mut engine, events, &mut host);
                power_changed(&mut backlight, &policy);
            }
            WatchEvent::Inactive => {
                let events = policy.on_inactivity();
                dispatch(&mut engine, events, &mut host);
                power_changed(&mut backlight, &policy);
            }
            WatchEvent::TimerFired => engine.on_timer_fired(&mut host),
            WatchEvent::TimeTick => {
                if engine.is_visible() && engine.is_in_ambient_mode() {
                    engine.on_time_tick(&mut host);
                }
            }
        }
    }
}

/// Apply the brightness of a new power state and restart its idle timeout
fn power_changed(backlight: &mut Backlight, policy: &PowerPolicy) {
    backlight.set(policy.brightness());
    ACTIVITY.signal(policy.timeout().map(|idle| Duration::from_millis(idle.as_millis() as u64)));
}

/// Delivers the face update requested by the engine
#[embassy_executor::task(pool_size = 1)]
async fn update_timer() {
    let mut pending = None;
    loop {
        pending = match pending {
            None => SCHEDULE.wait().await,
            Some(delay) => match select(Timer::after(delay), SCHEDULE.wait()).await {
                Either::First(_) => {
                    EVENTS.send(WatchEvent::TimerFired).await;
                    None
                }
                // Replaced or cancelled
                Either::Second(next) => next,
            },
        };
    }
}

/// Minute tick for ambient redraws, on the minute boundaries of `clock`
#[embassy_executor::task(pool_size = 1)]
async fn time_tick(clock: DeviceClock) {
    loop {
        let delay = delay_to_boundary(clock.now(), TICK_INTERVAL);
        Timer::after(Duration::from_millis(delay.as_millis() as u64)).await;
        EVENTS.send(WatchEvent::TimeTick).await;
    }
}

/// Reports inactivity once the timeout of the power state elapses
#[embassy_executor::task(pool_size = 1)]
async fn power_watchdog() {
    let mut timeout = None;
    loop {
        timeout = match timeout {
            None => ACTIVITY.wait().await,
            Some(idle) => match select(Timer::after(idle), ACTIVITY.wait()).await {
                Either::First(_) => {
                    EVENTS.send(WatchEvent::Inactive).await;
                    ACTIVITY.wait().await
                }
                Either::Second(next) => next,
            },
        };
    }
}

/// Turns button presses into wake events
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button) {
    loop {
        button.wait_for_press().await;
        defmt::info!("Button pressed");
        EVENTS.send(WatchEvent::ButtonPressed).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Initialize Backlight, off until the face is drawn
    let backlight = Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
        0,
    );

    // Initialize Button
    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_18.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26.degrade(), Level::Low, OutputDrive::Standard),
    ));

    // Initialize watch face
    let config = unwrap!(SystemConfig::watchface());
    let clock = unwrap!(DeviceClock::init(UTC_EPOCH, config.utc_offset));
    let engine = Engine::new(&config, CircularWatchface::new(&config), clock);
    let policy = PowerPolicy::new(SystemConfig::power());

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(update_timer()));
    unwrap!(spawner.spawn(time_tick(clock)));
    unwrap!(spawner.spawn(power_watchdog()));
    unwrap!(spawner.spawn(poll_button(button)));
    unwrap!(spawner.spawn(watchface(engine, display, backlight, policy)));
}
