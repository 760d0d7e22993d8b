//! Rover vehicle implementation
//!
//! This module contains the episode controller of the racing car: the
//! reset/step/close interface an agent drives, built on the actuation driver,
//! the shared telemetry and the camera.
//!
//! ## Modules
//!
//! - `env`: [`RacingCar`], the episode controller
//! - `step`: Step results and the telemetry projection returned as `info`

pub mod env;
pub mod step;

// Re-export commonly used types
pub use env::RacingCar;
pub use step::{CarInfo, EpisodeState, StepResult};
