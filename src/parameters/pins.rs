//! Pin assignment
//!
//! BCM pin numbers of the servo outputs and sensor inputs.

use racing_car_core::telemetry::Channel;
use serde::{Deserialize, Serialize};

/// GPIO pin assignment of the car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinConfig {
    /// Steering servo PWM output
    pub steering_servo: u8,
    /// Motor ESC PWM output
    pub motor: u8,
    pub left_line_sensor: u8,
    pub right_line_sensor: u8,
    /// Encoder pulse output (speed watchdog)
    pub encoder_pulse: u8,
    /// Encoder zero / lap marker input (reward watchdog)
    pub lap_marker: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            steering_servo: 4,
            motor: 17,
            left_line_sensor: 1,
            right_line_sensor: 2,
            encoder_pulse: 12,
            lap_marker: 13,
        }
    }
}

impl PinConfig {
    /// Input pins with their telemetry role
    pub fn inputs(&self) -> [(u8, Channel); 4] {
        [
            (self.left_line_sensor, Channel::LeftLineSensor),
            (self.right_line_sensor, Channel::RightLineSensor),
            (self.encoder_pulse, Channel::EncoderPulse),
            (self.lap_marker, Channel::LapMarker),
        ]
    }

    /// Role of an input pin, `None` for pins the car does not listen to
    pub fn channel_for(&self, pin: u8) -> Option<Channel> {
        self.inputs()
            .into_iter()
            .find(|(p, _)| *p == pin)
            .map(|(_, channel)| channel)
    }

    /// First pin assigned to more than one role
    pub fn duplicate(&self) -> Option<u8> {
        let pins = [
            self.steering_servo,
            self.motor,
            self.left_line_sensor,
            self.right_line_sensor,
            self.encoder_pulse,
            self.lap_marker,
        ];
        (0..pins.len())
            .find(|&i| pins[i + 1..].contains(&pins[i]))
            .map(|i| pins[i])
    }
}
