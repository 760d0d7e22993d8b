//! Common libraries
//!
//! ## Libraries
//!
//! - `actuation`: Servo output processing (steering servo and motor ESC)

pub mod actuation;

// Re-export commonly used types
pub use actuation::ActuationDriver;
