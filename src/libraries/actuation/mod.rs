//! Actuation driver for rover steering and throttle
//!
//! This module sits between the episode controller and the PWM hardware:
//! - Normalized commands (-1.0 to +1.0)
//! - Pulse width encoding (1500 μs neutral, configurable swing)
//! - Fault propagation (no retries)
//!
//! ## Safety
//!
//! The driver writes what it is told. Forcing a terminated car to neutral is
//! the episode controller's job. A failed write is reported to the caller so
//! a stalled actuator never goes unnoticed.

use racing_car_core::action::Action;
use racing_car_core::servo::ActuatorConfig;

use crate::log_error;
use crate::platform::{Result, traits::ServoPwm};

/// Steering servo and motor ESC behind one servo PWM output
pub struct ActuationDriver<P: ServoPwm> {
    pwm: P,
    steering_pin: u8,
    motor_pin: u8,
    config: ActuatorConfig,
}

impl<P: ServoPwm> ActuationDriver<P> {
    /// Create a new actuation driver
    ///
    /// # Arguments
    ///
    /// * `pwm` - Servo PWM output
    /// * `steering_pin` - Pin of the steering servo
    /// * `motor_pin` - Pin of the motor ESC
    /// * `config` - Pulse width calibration
    pub fn new(pwm: P, steering_pin: u8, motor_pin: u8, config: ActuatorConfig) -> Self {
        Self {
            pwm,
            steering_pin,
            motor_pin,
            config,
        }
    }

    /// Encode and write a steering/throttle command
    ///
    /// # Errors
    ///
    /// Returns the PWM error of the first failed write. Steering is written
    /// before throttle.
    pub fn apply_command(&mut self, steering: f32, throttle: f32) -> Result<()> {
        let (steering_us, throttle_us) = self.config.encode(steering, throttle);

        if let Err(e) = self.pwm.set_servo_pulse_width(self.steering_pin, steering_us) {
            log_error!("steering write failed on pin {}: {}", self.steering_pin, e);
            return Err(e);
        }
        if let Err(e) = self.pwm.set_servo_pulse_width(self.motor_pin, throttle_us) {
            log_error!("motor write failed on pin {}: {}", self.motor_pin, e);
            return Err(e);
        }
        Ok(())
    }

    /// Write a validated action
    pub fn apply(&mut self, action: Action) -> Result<()> {
        self.apply_command(action.steering(), action.throttle())
    }

    /// Center the steering and stop the motor
    pub fn neutral(&mut self) -> Result<()> {
        self.apply(Action::NEUTRAL)
    }

    pub fn config(&self) -> &ActuatorConfig {
        &self.config
    }
}
