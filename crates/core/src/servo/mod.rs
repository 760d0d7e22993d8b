//! Servo pulse mapping for rover steering and throttle
//!
//! This module provides platform-agnostic types for actuator encoding:
//! - Normalized commands (-1.0 to +1.0)
//! - Pulse width conversion around a neutral point (default 1500 μs)
//!
//! # Design
//!
//! This module is pure `no_std` with no feature gates. Writing the pulse
//! widths to hardware belongs to the platform layer of the main crate.
//!
//! ## Safety
//!
//! Commands are not clamped here. A terminated episode must be forced to
//! neutral by the caller before encoding.

use serde::{Deserialize, Serialize};

use crate::scaler::scale_range;

/// Neutral servo pulse width in microseconds
pub const NEUTRAL_PULSE_US: f32 = 1500.0;

/// Pulse width span of a single servo-like channel
///
/// The channel swings symmetrically around `neutral_us` by `range_us` in each
/// direction: -1.0 maps to `neutral_us - range_us`, +1.0 to `neutral_us + range_us`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServoRange {
    pub neutral_us: f32,
    pub range_us: f32,
}

impl ServoRange {
    /// Create a range centred on the standard 1500 μs neutral
    pub const fn centered(range_us: f32) -> Self {
        Self {
            neutral_us: NEUTRAL_PULSE_US,
            range_us,
        }
    }

    /// Shortest pulse width (normalized -1.0)
    pub fn min_us(&self) -> f32 {
        self.neutral_us - self.range_us
    }

    /// Longest pulse width (normalized +1.0)
    pub fn max_us(&self) -> f32 {
        self.neutral_us + self.range_us
    }

    /// Convert a normalized command into a pulse width (microseconds)
    pub fn pulse_for(&self, normalized: f32) -> f32 {
        scale_range(normalized, -1.0, 1.0, self.min_us(), self.max_us())
    }
}

/// Actuator calibration for the two PWM channels of the car
///
/// Steering drives the servo, throttle drives the ESC. Both take servo-like
/// pulse widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorConfig {
    pub steering: ServoRange,
    pub throttle: ServoRange,
}

impl ActuatorConfig {
    /// Build a calibration from the servo and motor swing (μs each way)
    pub const fn new(servo_range_us: f32, motor_range_us: f32) -> Self {
        Self {
            steering: ServoRange::centered(servo_range_us),
            throttle: ServoRange::centered(motor_range_us),
        }
    }

    /// Encode a steering/throttle pair into (steering μs, throttle μs)
    pub fn encode(&self, steering: f32, throttle: f32) -> (f32, f32) {
        (self.steering.pulse_for(steering), self.throttle.pulse_for(throttle))
    }
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self::new(200.0, 500.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steering_pulses() {
        let config = ActuatorConfig::new(200.0, 500.0);
        assert_eq!(config.steering.pulse_for(-1.0), 1300.0);
        assert_eq!(config.steering.pulse_for(0.0), 1500.0);
        assert_eq!(config.steering.pulse_for(1.0), 1700.0);
    }

    #[test]
    fn test_throttle_pulses() {
        let config = ActuatorConfig::new(200.0, 500.0);
        assert_eq!(config.throttle.pulse_for(-1.0), 1000.0);
        assert_eq!(config.throttle.pulse_for(0.0), 1500.0);
        assert_eq!(config.throttle.pulse_for(1.0), 2000.0);
    }

    #[test]
    fn test_encode_pair() {
        let config = ActuatorConfig::default();
        assert_eq!(config.encode(0.5, -0.5), (1600.0, 1250.0));
        assert_eq!(config.encode(0.0, 0.0), (1500.0, 1500.0));
    }

    #[test]
    fn test_range_bounds() {
        let range = ServoRange::centered(200.0);
        assert_eq!(range.min_us(), 1300.0);
        assert_eq!(range.max_us(), 1700.0);
    }

    #[test]
    fn test_off_center_neutral() {
        // ESCs with a trimmed neutral still swing symmetrically
        let range = ServoRange {
            neutral_us: 1520.0,
            range_us: 400.0,
        };
        assert_eq!(range.pulse_for(-1.0), 1120.0);
        assert_eq!(range.pulse_for(0.0), 1520.0);
        assert_eq!(range.pulse_for(1.0), 1920.0);
    }
}
