//! Car configuration
//!
//! All settings are fixed at construction. Every block has defaults matching
//! the reference car (1:10 chassis, 50 mm tires, 512-line encoder), and the
//! whole configuration can be loaded from TOML:
//!
//! ```toml
//! motor_limitation = 0.5
//!
//! [timing]
//! speed_window_ms = 250
//!
//! [policy]
//! pulse_reset = "clear_on_reset"
//! reward_floor = "clamp_at_zero"
//! ```
//!
//! Missing keys keep their defaults. [`CarConfig::validate`] runs on
//! construction of the environment.

mod hardware;
mod pins;

pub use hardware::{HardwareConfig, TimingConfig};
pub use pins::PinConfig;

use racing_car_core::telemetry::{PulseResetPolicy, RewardFloor, TelemetryParams};
use serde::{Deserialize, Serialize};

use crate::platform::traits::{CameraSettings, ColorFormat};

/// Reward added per lap marker pass
pub const LAP_REWARD: f32 = 5.0;
/// Reward removed per lap marker window without a pass
pub const IDLE_PENALTY: f32 = 1.0;

/// Configuration errors, raised before any hardware is touched
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("motor_limitation must be within [0, 1], got {0}")]
    MotorLimitation(f32),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be at least 1 ms")]
    ZeroWindow { field: &'static str },

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    ZeroImageSize { width: u32, height: u32 },

    #[error("pin {0} is assigned to more than one role")]
    DuplicatePin(u8),

    #[error("invalid configuration file: {0}")]
    Parse(String),
}

/// Output image geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub width: u32,
    pub height: u32,
    pub format: ColorFormat,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            format: ColorFormat::Rgb,
        }
    }
}

/// Telemetry behaviours left open by the hardware design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryPolicy {
    pub pulse_reset: PulseResetPolicy,
    pub reward_floor: RewardFloor,
}

/// Complete car configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    /// Throttle attenuation factor, within [0, 1]
    pub motor_limitation: f32,
    pub pins: PinConfig,
    pub hardware: HardwareConfig,
    pub timing: TimingConfig,
    pub image: ImageConfig,
    pub camera: CameraSettings,
    pub policy: TelemetryPolicy,
    /// Seed for `sample_observation`/`sample_action`; `None` draws from entropy
    pub sample_seed: Option<u64>,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            motor_limitation: 0.6,
            pins: PinConfig::default(),
            hardware: HardwareConfig::default(),
            timing: TimingConfig::default(),
            image: ImageConfig::default(),
            camera: CameraSettings::default(),
            policy: TelemetryPolicy::default(),
            sample_seed: None,
        }
    }
}

impl CarConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed documents and any
    /// validation error of the parsed values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: CarConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the car cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.motor_limitation) {
            return Err(ConfigError::MotorLimitation(self.motor_limitation));
        }

        let hw = &self.hardware;
        let positive = [
            ("tire_diameter_m", hw.tire_diameter_m),
            ("gear_ratio", hw.gear_ratio),
            ("encoder_lines", hw.encoder_lines as f32),
            ("servo_range_us", hw.servo_range_us),
            ("motor_range_us", hw.motor_range_us),
        ];
        for (field, value) in positive {
            // NaN fails the comparison as well
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.timing.speed_window_ms == 0 {
            return Err(ConfigError::ZeroWindow {
                field: "speed_window_ms",
            });
        }
        if self.timing.reward_window_ms == 0 {
            return Err(ConfigError::ZeroWindow {
                field: "reward_window_ms",
            });
        }

        if self.image.width == 0 || self.image.height == 0 {
            return Err(ConfigError::ZeroImageSize {
                width: self.image.width,
                height: self.image.height,
            });
        }

        if let Some(pin) = self.pins.duplicate() {
            return Err(ConfigError::DuplicatePin(pin));
        }

        Ok(())
    }

    /// Parameters of the telemetry dispatch function
    pub fn telemetry_params(&self) -> TelemetryParams {
        TelemetryParams {
            encoder_lines: self.hardware.encoder_lines,
            tire_diameter_m: self.hardware.tire_diameter_m,
            gear_ratio: self.hardware.gear_ratio,
            speed_window_ms: self.timing.speed_window_ms,
            lap_reward: LAP_REWARD,
            idle_penalty: IDLE_PENALTY,
            reward_floor: self.policy.reward_floor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CarConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.motor_limitation, 0.6);
        assert_eq!(config.image.width, 320);
        assert_eq!(config.image.height, 240);
        assert_eq!(config.policy.pulse_reset, PulseResetPolicy::CarryOver);
        assert_eq!(config.policy.reward_floor, RewardFloor::Unbounded);
    }

    #[test]
    fn test_motor_limitation_above_one() {
        let config = CarConfig {
            motor_limitation: 1.2,
            ..CarConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MotorLimitation(1.2)));

        let config = CarConfig {
            motor_limitation: 1.0,
            ..CarConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_motor_limitation_negative_or_nan() {
        let config = CarConfig {
            motor_limitation: -0.5,
            ..CarConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MotorLimitation(-0.5)));

        let config = CarConfig {
            motor_limitation: f32::NAN,
            ..CarConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MotorLimitation(_))
        ));
    }

    #[test]
    fn test_non_positive_constants() {
        let mut config = CarConfig::default();
        config.hardware.tire_diameter_m = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "tire_diameter_m",
                value: 0.0
            })
        );

        let mut config = CarConfig::default();
        config.hardware.encoder_lines = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "encoder_lines",
                ..
            })
        ));

        let mut config = CarConfig::default();
        config.hardware.gear_ratio = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_window() {
        let mut config = CarConfig::default();
        config.timing.reward_window_ms = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroWindow {
                field: "reward_window_ms"
            })
        );
    }

    #[test]
    fn test_zero_image() {
        let mut config = CarConfig::default();
        config.image.height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroImageSize { .. })
        ));
    }

    #[test]
    fn test_duplicate_pin() {
        let mut config = CarConfig::default();
        config.pins.motor = config.pins.steering_servo;
        assert_eq!(config.validate(), Err(ConfigError::DuplicatePin(4)));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = CarConfig::from_toml_str(
            r#"
            motor_limitation = 0.5

            [timing]
            speed_window_ms = 250

            [policy]
            pulse_reset = "clear_on_reset"
            reward_floor = "clamp_at_zero"
            "#,
        )
        .unwrap();

        assert_eq!(config.motor_limitation, 0.5);
        assert_eq!(config.timing.speed_window_ms, 250);
        assert_eq!(config.timing.reward_window_ms, 500);
        assert_eq!(config.policy.pulse_reset, PulseResetPolicy::ClearOnReset);
        assert_eq!(config.policy.reward_floor, RewardFloor::ClampAtZero);
        assert_eq!(config.pins, PinConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        assert_eq!(
            CarConfig::from_toml_str("motor_limitation = 2.0"),
            Err(ConfigError::MotorLimitation(2.0))
        );
        assert!(matches!(
            CarConfig::from_toml_str("motor_limitation = \"fast\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_telemetry_params() {
        let mut config = CarConfig::default();
        config.timing.speed_window_ms = 250;
        config.policy.reward_floor = RewardFloor::ClampAtZero;

        let params = config.telemetry_params();
        assert_eq!(params.speed_window_ms, 250);
        assert_eq!(params.encoder_lines, 512);
        assert_eq!(params.lap_reward, 5.0);
        assert_eq!(params.idle_penalty, 1.0);
        assert_eq!(params.reward_floor, RewardFloor::ClampAtZero);
    }
}
