//! Telemetry state machine driven by GPIO events
//!
//! The racing car reports its progress through four digital inputs:
//! - Two line sensors that fire when the car leaves the track
//! - A wheel encoder whose pulses are counted per measurement window
//! - A lap marker that fires each time the car passes it
//!
//! The encoder and lap marker pins carry independent watchdogs. A watchdog
//! timeout closes the current measurement window: for the encoder it turns the
//! pulse count into a speed, for the lap marker it charges an idle penalty.
//!
//! [`TelemetryState::apply`] is the single dispatch function from an event to
//! a state transition. It is pure and can be driven by synthetic events.
//!
//! # Invariants
//!
//! - `done` only goes from false to true; [`TelemetryState::reset`] clears it
//! - The pulse accumulator is read and cleared in the same update that writes `speed`
//! - A reward that drops below zero sets `done` in the same update

use core::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Role of a GPIO input pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Left track boundary sensor
    LeftLineSensor,
    /// Right track boundary sensor
    RightLineSensor,
    /// Wheel encoder pulse output
    EncoderPulse,
    /// Lap marker (encoder zero) input
    LapMarker,
}

/// Kind of GPIO event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// High to low transition
    Falling,
    /// Low to high transition
    Rising,
    /// Watchdog fired without an edge in the configured window
    Timeout,
}

impl Edge {
    /// Decode a raw GPIO level as reported by the GPIO daemon
    ///
    /// Levels follow the pigpio convention: 0 falling, 1 rising, 2 watchdog
    /// timeout. Any other value is noise and yields `None`.
    pub fn from_level(level: u32) -> Option<Self> {
        match level {
            0 => Some(Edge::Falling),
            1 => Some(Edge::Rising),
            2 => Some(Edge::Timeout),
            _ => None,
        }
    }
}

/// A decoded GPIO event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryEvent {
    pub channel: Channel,
    pub edge: Edge,
    /// Daemon tick in microseconds (wraps at `u32::MAX`)
    pub tick_us: u32,
}

impl TelemetryEvent {
    pub const fn new(channel: Channel, edge: Edge, tick_us: u32) -> Self {
        Self {
            channel,
            edge,
            tick_us,
        }
    }
}

/// What happens to the pulse accumulator when an episode is reset
///
/// The accumulator is normally cleared only by an encoder timeout. Resetting
/// mid-window carries the pulses of the previous episode into the first speed
/// estimate of the next one unless `ClearOnReset` is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseResetPolicy {
    /// Leave pending pulses for the running window to consume
    #[default]
    CarryOver,
    /// Drop pending pulses on reset
    ClearOnReset,
}

/// How the reward behaves once idle penalties push it below zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardFloor {
    /// Keep subtracting; the reward keeps falling while the car idles
    #[default]
    Unbounded,
    /// Terminate on the crossing and hold the reward at zero
    ClampAtZero,
}

/// Reason an episode terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    LeftLine,
    RightLine,
    NegativeReward,
}

impl Termination {
    /// Return the reason as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::LeftLine => "left line crossed",
            Termination::RightLine => "right line crossed",
            Termination::NegativeReward => "reward below zero",
        }
    }
}

/// Result of dispatching one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventOutcome {
    /// The channel/edge combination has no meaning (noise)
    Ignored,
    /// State changed, episode still running or already terminated
    Updated,
    /// This event terminated the episode
    Terminated(Termination),
}

/// Physical constants and reward shaping used by the dispatch function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryParams {
    /// Encoder pulses per shaft revolution
    pub encoder_lines: u32,
    /// Tire diameter in meters
    pub tire_diameter_m: f32,
    /// Ratio between encoder shaft and wheel revolutions
    pub gear_ratio: f32,
    /// Encoder measurement window in milliseconds
    pub speed_window_ms: u32,
    /// Reward added on each lap marker pass
    pub lap_reward: f32,
    /// Reward removed on each lap marker window without a pass
    pub idle_penalty: f32,
    pub reward_floor: RewardFloor,
}

impl TelemetryParams {
    /// Convert the pulses counted in one speed window into meters per second
    pub fn speed_from_pulses(&self, pulses: u32) -> f32 {
        let distance_m = pulses as f32 / self.encoder_lines as f32 * PI * self.tire_diameter_m;
        let window_s = self.speed_window_ms as f32 / 1000.0;
        distance_m / window_s * self.gear_ratio
    }
}

impl Default for TelemetryParams {
    fn default() -> Self {
        Self {
            encoder_lines: 512,
            tire_diameter_m: 0.05,
            gear_ratio: 145.0 / 35.0,
            speed_window_ms: 500,
            lap_reward: 5.0,
            idle_penalty: 1.0,
            reward_floor: RewardFloor::Unbounded,
        }
    }
}

/// Consistent copy of the telemetry taken at one instant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TelemetrySnapshot {
    pub steering_signal: f32,
    pub motor_signal: f32,
    pub reward: f32,
    pub speed: f32,
    pub done: bool,
    pub pulse_accumulator: u32,
}

/// Telemetry of the running episode
#[derive(Debug, Clone, Default)]
pub struct TelemetryState {
    steering_signal: f32,
    motor_signal: f32,
    reward: f32,
    speed: f32,
    done: bool,
    pulse_accumulator: u32,
    termination: Option<Termination>,
}

impl TelemetryState {
    /// Create a zeroed telemetry state
    pub const fn new() -> Self {
        Self {
            steering_signal: 0.0,
            motor_signal: 0.0,
            reward: 0.0,
            speed: 0.0,
            done: false,
            pulse_accumulator: 0,
            termination: None,
        }
    }

    /// Dispatch one event
    pub fn apply(&mut self, event: &TelemetryEvent, params: &TelemetryParams) -> EventOutcome {
        match (event.channel, event.edge) {
            (Channel::LeftLineSensor, Edge::Rising) => self.terminate(Termination::LeftLine),
            (Channel::RightLineSensor, Edge::Rising) => self.terminate(Termination::RightLine),
            (Channel::EncoderPulse, Edge::Rising) => {
                self.pulse_accumulator = self.pulse_accumulator.saturating_add(1);
                EventOutcome::Updated
            }
            (Channel::EncoderPulse, Edge::Timeout) => {
                self.speed = params.speed_from_pulses(self.pulse_accumulator);
                self.pulse_accumulator = 0;
                EventOutcome::Updated
            }
            (Channel::LapMarker, Edge::Rising) => {
                self.reward += params.lap_reward;
                EventOutcome::Updated
            }
            (Channel::LapMarker, Edge::Timeout) => {
                self.reward -= params.idle_penalty;
                if self.reward < 0.0 {
                    if params.reward_floor == RewardFloor::ClampAtZero {
                        self.reward = 0.0;
                    }
                    self.terminate(Termination::NegativeReward)
                } else {
                    EventOutcome::Updated
                }
            }
            _ => EventOutcome::Ignored,
        }
    }

    fn terminate(&mut self, reason: Termination) -> EventOutcome {
        if self.done {
            return EventOutcome::Updated;
        }
        self.done = true;
        self.termination = Some(reason);
        EventOutcome::Terminated(reason)
    }

    /// Return to the zero baseline of a new episode
    pub fn reset(&mut self, policy: PulseResetPolicy) {
        self.steering_signal = 0.0;
        self.motor_signal = 0.0;
        self.reward = 0.0;
        self.speed = 0.0;
        self.done = false;
        self.termination = None;
        if policy == PulseResetPolicy::ClearOnReset {
            self.pulse_accumulator = 0;
        }
    }

    /// Store the steering/motor signals last sent to the actuators
    pub fn record_command(&mut self, steering: f32, motor: f32) {
        self.steering_signal = steering;
        self.motor_signal = motor;
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            steering_signal: self.steering_signal,
            motor_signal: self.motor_signal,
            reward: self.reward,
            speed: self.speed,
            done: self.done,
            pulse_accumulator: self.pulse_accumulator,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Reason for the termination of the current episode, if any
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(channel: Channel, edge: Edge) -> TelemetryEvent {
        TelemetryEvent::new(channel, edge, 0)
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_edge_from_level() {
        assert_eq!(Edge::from_level(0), Some(Edge::Falling));
        assert_eq!(Edge::from_level(1), Some(Edge::Rising));
        assert_eq!(Edge::from_level(2), Some(Edge::Timeout));
        assert_eq!(Edge::from_level(3), None);
    }

    #[test]
    fn test_initial_state_is_zeroed() {
        let snapshot = TelemetryState::new().snapshot();
        assert_eq!(snapshot, TelemetrySnapshot::default());
    }

    #[test]
    fn test_encoder_window_speed() {
        let params = TelemetryParams::default();
        let mut state = TelemetryState::new();

        for _ in 0..512 {
            assert_eq!(
                state.apply(&event(Channel::EncoderPulse, Edge::Rising), &params),
                EventOutcome::Updated
            );
        }
        assert_eq!(state.snapshot().pulse_accumulator, 512);

        state.apply(&event(Channel::EncoderPulse, Edge::Timeout), &params);

        let expected = (512.0 / 512.0 * PI * 0.05) / 0.5 * (145.0 / 35.0);
        let snapshot = state.snapshot();
        assert!(approx_eq(snapshot.speed, expected), "speed {}", snapshot.speed);
        assert_eq!(snapshot.pulse_accumulator, 0);
    }

    #[test]
    fn test_speed_is_overwritten_per_window() {
        let params = TelemetryParams::default();
        let mut state = TelemetryState::new();

        for _ in 0..100 {
            state.apply(&event(Channel::EncoderPulse, Edge::Rising), &params);
        }
        state.apply(&event(Channel::EncoderPulse, Edge::Timeout), &params);
        assert!(state.snapshot().speed > 0.0);

        // A window without pulses means the car stopped
        state.apply(&event(Channel::EncoderPulse, Edge::Timeout), &params);
        assert_eq!(state.snapshot().speed, 0.0);
    }

    #[test]
    fn test_lap_then_timeout_nets_four() {
        let params = TelemetryParams::default();
        let mut state = TelemetryState::new();

        state.apply(&event(Channel::LapMarker, Edge::Rising), &params);
        state.apply(&event(Channel::LapMarker, Edge::Timeout), &params);

        assert_eq!(state.snapshot().reward, 4.0);
        assert!(!state.is_done());
    }

    #[test]
    fn test_idle_timeouts_terminate_on_crossing() {
        let params = TelemetryParams::default();
        let mut state = TelemetryState::new();
        let timeout = event(Channel::LapMarker, Edge::Timeout);

        assert_eq!(
            state.apply(&timeout, &params),
            EventOutcome::Terminated(Termination::NegativeReward)
        );
        assert!(state.is_done());
        assert_eq!(state.apply(&timeout, &params), EventOutcome::Updated);
        assert_eq!(state.apply(&timeout, &params), EventOutcome::Updated);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.reward, -3.0);
        assert!(snapshot.done);
        assert_eq!(state.termination(), Some(Termination::NegativeReward));
    }

    #[test]
    fn test_clamp_at_zero_floor() {
        let params = TelemetryParams {
            reward_floor: RewardFloor::ClampAtZero,
            ..TelemetryParams::default()
        };
        let mut state = TelemetryState::new();
        let timeout = event(Channel::LapMarker, Edge::Timeout);

        state.apply(&timeout, &params);
        state.apply(&timeout, &params);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.reward, 0.0);
        assert!(snapshot.done);
    }

    #[test]
    fn test_line_sensors_latch_done() {
        let params = TelemetryParams::default();
        let mut state = TelemetryState::new();

        assert_eq!(
            state.apply(&event(Channel::RightLineSensor, Edge::Rising), &params),
            EventOutcome::Terminated(Termination::RightLine)
        );
        // Later events neither clear done nor replace the first reason
        assert_eq!(
            state.apply(&event(Channel::LeftLineSensor, Edge::Rising), &params),
            EventOutcome::Updated
        );
        state.apply(&event(Channel::LapMarker, Edge::Rising), &params);

        assert!(state.is_done());
        assert_eq!(state.termination(), Some(Termination::RightLine));
    }

    #[test]
    fn test_spurious_events_are_ignored() {
        let params = TelemetryParams::default();
        let mut state = TelemetryState::new();

        let spurious = [
            event(Channel::LeftLineSensor, Edge::Falling),
            event(Channel::LeftLineSensor, Edge::Timeout),
            event(Channel::RightLineSensor, Edge::Timeout),
            event(Channel::EncoderPulse, Edge::Falling),
            event(Channel::LapMarker, Edge::Falling),
        ];
        for e in &spurious {
            assert_eq!(state.apply(e, &params), EventOutcome::Ignored);
        }
        assert_eq!(state.snapshot(), TelemetrySnapshot::default());
    }

    #[test]
    fn test_reset_carry_over_keeps_pulses() {
        let params = TelemetryParams::default();
        let mut state = TelemetryState::new();

        for _ in 0..10 {
            state.apply(&event(Channel::EncoderPulse, Edge::Rising), &params);
        }
        state.apply(&event(Channel::LeftLineSensor, Edge::Rising), &params);
        state.record_command(0.3, 0.2);

        state.reset(PulseResetPolicy::CarryOver);

        let snapshot = state.snapshot();
        assert!(!snapshot.done);
        assert_eq!(snapshot.reward, 0.0);
        assert_eq!(snapshot.speed, 0.0);
        assert_eq!(snapshot.steering_signal, 0.0);
        assert_eq!(snapshot.motor_signal, 0.0);
        assert_eq!(snapshot.pulse_accumulator, 10);
        assert_eq!(state.termination(), None);
    }

    #[test]
    fn test_reset_clear_drops_pulses() {
        let params = TelemetryParams::default();
        let mut state = TelemetryState::new();

        for _ in 0..10 {
            state.apply(&event(Channel::EncoderPulse, Edge::Rising), &params);
        }
        state.reset(PulseResetPolicy::ClearOnReset);
        assert_eq!(state.snapshot().pulse_accumulator, 0);
    }

    #[test]
    fn test_record_command() {
        let mut state = TelemetryState::new();
        state.record_command(-0.5, 0.36);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.steering_signal, -0.5);
        assert_eq!(snapshot.motor_signal, 0.36);
    }
}
