//! Subsystems
//!
//! - `telemetry`: Shared telemetry fed by GPIO event callbacks

pub mod telemetry;

pub use telemetry::SharedTelemetry;
