//! Platform abstraction traits
//!
//! This module defines the traits that hardware backends must provide.

pub mod camera;
pub mod gpio;
pub mod pwm;

// Re-export trait interfaces
pub use camera::{CameraInterface, CameraSettings, ColorFormat, Frame};
pub use gpio::{EdgeTrigger, EventCallback, GpioEvent, GpioService};
pub use pwm::ServoPwm;
