//! Physical constants and measurement windows

use racing_car_core::servo::ActuatorConfig;
use serde::{Deserialize, Serialize};

/// Drivetrain geometry and actuator calibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Tire diameter (m)
    pub tire_diameter_m: f32,
    /// Encoder shaft revolutions per wheel revolution
    pub gear_ratio: f32,
    /// Encoder pulses per revolution
    pub encoder_lines: u32,
    /// Steering swing around neutral (μs)
    pub servo_range_us: f32,
    /// Throttle swing around neutral (μs)
    pub motor_range_us: f32,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            tire_diameter_m: 0.05,
            gear_ratio: 145.0 / 35.0,
            encoder_lines: 512,
            servo_range_us: 200.0,
            motor_range_us: 500.0,
        }
    }
}

impl HardwareConfig {
    pub fn actuator_config(&self) -> ActuatorConfig {
        ActuatorConfig::new(self.servo_range_us, self.motor_range_us)
    }
}

/// Watchdog windows of the two measurement clocks
///
/// The windows are independent: speed is sampled per encoder window, the idle
/// penalty is charged per lap marker window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Encoder watchdog window (ms)
    pub speed_window_ms: u32,
    /// Lap marker watchdog window (ms)
    pub reward_window_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            speed_window_ms: 500,
            reward_window_ms: 500,
        }
    }
}
