//! Shared telemetry fed by GPIO event callbacks
//!
//! The GPIO daemon calls back on its own thread for every input edge and
//! watchdog timeout, while the episode controller reads the telemetry from the
//! caller's thread. Both sides go through one mutex around the
//! [`TelemetryState`]:
//!
//! - Callbacks decode the raw event and apply it under the lock, so the
//!   encoder read-then-reset and the speed write land together
//! - The controller copies a whole [`TelemetrySnapshot`] under the lock, so a
//!   snapshot never mixes two callbacks
//!
//! The critical sections are a handful of arithmetic operations. Logging and
//! any other work happens after the lock is released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use racing_car_core::action::Action;
use racing_car_core::telemetry::{
    Edge, EventOutcome, PulseResetPolicy, TelemetryEvent, TelemetryParams, TelemetrySnapshot,
    TelemetryState, Termination,
};

use crate::parameters::{PinConfig, TimingConfig};
use crate::platform::{
    Result,
    traits::{EdgeTrigger, GpioEvent, GpioService},
};
use crate::{log_debug, log_info, log_trace};

/// Telemetry shared between GPIO callbacks and the episode controller
///
/// Cloning yields another handle to the same state.
#[derive(Debug, Clone)]
pub struct SharedTelemetry {
    state: Arc<Mutex<TelemetryState>>,
    params: TelemetryParams,
    pins: PinConfig,
}

impl SharedTelemetry {
    /// Create zeroed telemetry for the given physical parameters and pin map
    pub fn new(params: TelemetryParams, pins: PinConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(TelemetryState::new())),
            params,
            pins,
        }
    }

    // Every update keeps the state consistent on its own, so a panic in
    // another holder leaves nothing half-written.
    fn lock(&self) -> MutexGuard<'_, TelemetryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Arm both watchdogs and subscribe the input pins
    ///
    /// The encoder and lap marker watchdogs run on their own windows.
    ///
    /// # Errors
    ///
    /// Returns the first GPIO error. Subscriptions made before the failure
    /// stay in place until the owner of `gpio` calls [`GpioService::stop`].
    pub fn attach<G: GpioService + ?Sized>(&self, gpio: &mut G, timing: &TimingConfig) -> Result<()> {
        gpio.set_watchdog(self.pins.encoder_pulse, timing.speed_window_ms)?;
        gpio.set_watchdog(self.pins.lap_marker, timing.reward_window_ms)?;

        for (pin, channel) in self.pins.inputs() {
            let telemetry = self.clone();
            gpio.subscribe(
                pin,
                EdgeTrigger::Rising,
                Arc::new(move |event: GpioEvent| {
                    telemetry.handle_gpio_event(event);
                }),
            )?;
            log_debug!("subscribed pin {} as {:?}", pin, channel);
        }
        Ok(())
    }

    /// Decode and apply a raw GPIO event
    ///
    /// Events on unknown pins or with unknown levels are electrical noise and
    /// are dropped.
    pub fn handle_gpio_event(&self, event: GpioEvent) -> EventOutcome {
        let Some(channel) = self.pins.channel_for(event.pin) else {
            log_trace!("ignoring event on unmapped pin {}", event.pin);
            return EventOutcome::Ignored;
        };
        let Some(edge) = Edge::from_level(event.level) else {
            log_trace!("ignoring level {} on pin {}", event.level, event.pin);
            return EventOutcome::Ignored;
        };
        self.handle_event(TelemetryEvent::new(channel, edge, event.tick_us))
    }

    /// Apply a decoded event
    pub fn handle_event(&self, event: TelemetryEvent) -> EventOutcome {
        let outcome = self.lock().apply(&event, &self.params);

        match outcome {
            EventOutcome::Terminated(reason) => {
                log_info!("episode terminated: {} (tick {})", reason.as_str(), event.tick_us);
            }
            EventOutcome::Updated => {
                log_trace!("{:?} {:?} at tick {}", event.channel, event.edge, event.tick_us);
            }
            EventOutcome::Ignored => {
                log_trace!("ignoring {:?} on {:?}", event.edge, event.channel);
            }
        }
        outcome
    }

    /// Copy all fields at one instant
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.lock().snapshot()
    }

    pub fn is_done(&self) -> bool {
        self.lock().is_done()
    }

    pub fn termination(&self) -> Option<Termination> {
        self.lock().termination()
    }

    /// Store the command last sent to the actuators
    pub fn record_command(&self, action: Action) {
        self.lock().record_command(action.steering(), action.throttle());
    }

    /// Return to the zero baseline and snapshot it under the same lock
    pub fn reset(&self, policy: PulseResetPolicy) -> TelemetrySnapshot {
        let mut state = self.lock();
        state.reset(policy);
        state.snapshot()
    }

    pub fn params(&self) -> &TelemetryParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockGpio;

    fn telemetry() -> SharedTelemetry {
        SharedTelemetry::new(TelemetryParams::default(), PinConfig::default())
    }

    fn attached() -> (SharedTelemetry, MockGpio) {
        let telemetry = telemetry();
        let mut gpio = MockGpio::new();
        telemetry
            .attach(&mut gpio, &TimingConfig::default())
            .unwrap();
        (telemetry, gpio)
    }

    #[test]
    fn test_attach_arms_independent_watchdogs() {
        let telemetry = telemetry();
        let mut gpio = MockGpio::new();
        let timing = TimingConfig {
            speed_window_ms: 250,
            reward_window_ms: 1000,
        };
        telemetry.attach(&mut gpio, &timing).unwrap();

        assert_eq!(gpio.watchdog_ms(12), Some(250));
        assert_eq!(gpio.watchdog_ms(13), Some(1000));
        assert_eq!(gpio.watchdog_ms(1), None);
        assert_eq!(gpio.watchdog_ms(2), None);
        for pin in [1, 2, 12, 13] {
            assert_eq!(gpio.subscription_count(pin), 1);
        }
    }

    #[test]
    fn test_attach_propagates_subscribe_failure() {
        let telemetry = telemetry();
        let mut gpio = MockGpio::new();
        gpio.set_fail_subscribe(true);
        assert!(telemetry.attach(&mut gpio, &TimingConfig::default()).is_err());
    }

    #[test]
    fn test_encoder_through_gpio() {
        let (telemetry, gpio) = attached();

        for _ in 0..256 {
            gpio.rising(12);
        }
        assert_eq!(telemetry.snapshot().pulse_accumulator, 256);

        gpio.timeout(12);
        let snapshot = telemetry.snapshot();
        assert_eq!(snapshot.pulse_accumulator, 0);
        assert_eq!(snapshot.speed, telemetry.params().speed_from_pulses(256));
    }

    #[test]
    fn test_lap_marker_through_gpio() {
        let (telemetry, gpio) = attached();

        gpio.rising(13);
        gpio.rising(13);
        gpio.timeout(13);

        assert_eq!(telemetry.snapshot().reward, 9.0);
    }

    #[test]
    fn test_line_sensor_through_gpio() {
        let (telemetry, gpio) = attached();

        gpio.rising(2);

        assert!(telemetry.is_done());
        assert_eq!(telemetry.termination(), Some(Termination::RightLine));
    }

    #[test]
    fn test_unmapped_pin_is_ignored() {
        let telemetry = telemetry();
        let outcome = telemetry.handle_gpio_event(GpioEvent {
            pin: 26,
            level: GpioEvent::LEVEL_RISING,
            tick_us: 0,
        });
        assert_eq!(outcome, EventOutcome::Ignored);
        assert_eq!(telemetry.snapshot(), TelemetrySnapshot::default());
    }

    #[test]
    fn test_unknown_level_is_ignored() {
        let telemetry = telemetry();
        let outcome = telemetry.handle_gpio_event(GpioEvent {
            pin: 1,
            level: 7,
            tick_us: 0,
        });
        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(!telemetry.is_done());
    }

    #[test]
    fn test_reset_returns_zero_snapshot() {
        let (telemetry, gpio) = attached();
        gpio.rising(13);
        gpio.rising(1);
        telemetry.record_command(Action::from_slice(&[0.4, 0.3]).unwrap());

        let snapshot = telemetry.reset(PulseResetPolicy::ClearOnReset);

        assert_eq!(snapshot, TelemetrySnapshot::default());
        assert_eq!(telemetry.termination(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let telemetry = telemetry();
        let other = telemetry.clone();
        other.record_command(Action::from_slice(&[-0.2, 0.1]).unwrap());
        assert_eq!(telemetry.snapshot().steering_signal, -0.2);
    }
}
