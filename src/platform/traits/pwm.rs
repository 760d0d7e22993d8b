//! Servo PWM interface trait
//!
//! This module defines the servo-style PWM output used for the steering servo
//! and the motor ESC. Both take a pulse width repeated at the servo frame rate.

use crate::platform::Result;

/// Servo PWM interface trait
///
/// # Safety Invariants
///
/// - Only one owner per output
/// - A pulse width of 0 switches the output off on most backends; the car
///   never sends it
pub trait ServoPwm: Send {
    /// Set the pulse width of `pin` in microseconds
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm` if the pin or pulse width is rejected or
    /// the write fails.
    fn set_servo_pulse_width(&mut self, pin: u8, pulse_us: f32) -> Result<()>;
}
