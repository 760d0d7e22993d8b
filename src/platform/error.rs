//! Platform error types
//!
//! This module defines error types for hardware collaborator operations.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All hardware backends map their library-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// PWM operation failed
    Pwm(PwmError),
    /// GPIO operation failed
    Gpio(GpioError),
    /// Camera operation failed
    Camera(CameraError),
}

/// PWM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    /// Pin cannot drive a servo signal
    InvalidPin,
    /// Pulse width rejected by the backend
    InvalidPulseWidth,
    /// Write to the daemon or device failed
    WriteFailed,
}

/// GPIO-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Invalid pin number
    InvalidPin,
    /// Callback registration failed
    SubscribeFailed,
    /// Watchdog could not be armed
    WatchdogFailed,
    /// Service is stopped or unreachable
    NotConnected,
}

/// Camera-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraError {
    /// Settings rejected by the device
    InvalidSettings,
    /// Capture did not complete
    CaptureFailed,
    /// Captured buffer does not match the requested frame size
    FrameSizeMismatch {
        /// Expected byte count
        expected: usize,
        /// Received byte count
        actual: usize,
    },
    /// Camera was already released
    Closed,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Pwm(e) => write!(f, "PWM error: {:?}", e),
            PlatformError::Gpio(e) => write!(f, "GPIO error: {:?}", e),
            PlatformError::Camera(e) => write!(f, "Camera error: {:?}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<PwmError> for PlatformError {
    fn from(e: PwmError) -> Self {
        PlatformError::Pwm(e)
    }
}

impl From<GpioError> for PlatformError {
    fn from(e: GpioError) -> Self {
        PlatformError::Gpio(e)
    }
}

impl From<CameraError> for PlatformError {
    fn from(e: CameraError) -> Self {
        PlatformError::Camera(e)
    }
}
