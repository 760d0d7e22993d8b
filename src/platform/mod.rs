//! Platform abstraction layer
//!
//! This module describes the hardware collaborators of the car: the GPIO
//! daemon delivering input edges and watchdog timeouts, the servo PWM output
//! and the camera. Real backends implement the traits; [`mock`] provides
//! in-memory implementations for host testing.

pub mod error;
pub mod mock;
pub mod traits;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{
    CameraInterface, CameraSettings, ColorFormat, EdgeTrigger, EventCallback, Frame,
    GpioEvent, GpioService, ServoPwm,
};
