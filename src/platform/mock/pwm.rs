//! Mock servo PWM implementation for testing

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::platform::{
    Result,
    error::{PlatformError, PwmError},
    traits::ServoPwm,
};

/// One pulse width written to a pin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseWrite {
    pub pin: u8,
    pub pulse_us: f32,
}

#[derive(Debug, Default)]
struct MockPwmState {
    writes: Vec<PulseWrite>,
    failing: bool,
}

/// Mock servo PWM
///
/// Records every write for test verification. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct MockPwm {
    state: Arc<Mutex<MockPwmState>>,
}

impl MockPwm {
    /// Create a new mock PWM
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockPwmState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make subsequent writes fail with `PwmError::WriteFailed`
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// All successful writes, oldest first
    pub fn writes(&self) -> Vec<PulseWrite> {
        self.lock().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.lock().writes.len()
    }

    /// Last pulse width written to `pin`
    pub fn last_pulse(&self, pin: u8) -> Option<f32> {
        self.lock()
            .writes
            .iter()
            .rev()
            .find(|w| w.pin == pin)
            .map(|w| w.pulse_us)
    }
}

impl ServoPwm for MockPwm {
    fn set_servo_pulse_width(&mut self, pin: u8, pulse_us: f32) -> Result<()> {
        let mut state = self.lock();
        if state.failing {
            return Err(PlatformError::Pwm(PwmError::WriteFailed));
        }
        if !pulse_us.is_finite() || pulse_us < 0.0 {
            return Err(PlatformError::Pwm(PwmError::InvalidPulseWidth));
        }
        state.writes.push(PulseWrite { pin, pulse_us });
        Ok(())
    }
}
