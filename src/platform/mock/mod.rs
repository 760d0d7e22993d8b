//! Mock platform implementation for testing
//!
//! This module provides in-memory implementations of the platform traits.
//! Every mock is a cheap handle over shared state: clone it before handing it
//! to the environment and keep the clone to drive or inspect the hardware.
//!
//! # Example
//!
//! ```
//! use racing_car::platform::mock::MockGpio;
//! use racing_car::platform::traits::{EdgeTrigger, GpioEvent, GpioService};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! let mut gpio = MockGpio::new();
//! let probe = gpio.clone();
//! let count = Arc::new(AtomicU32::new(0));
//! let seen = count.clone();
//! gpio.subscribe(12, EdgeTrigger::Rising, Arc::new(move |_: GpioEvent| {
//!     seen.fetch_add(1, Ordering::SeqCst);
//! }))
//! .unwrap();
//!
//! probe.rising(12);
//! assert_eq!(count.load(Ordering::SeqCst), 1);
//! ```

mod camera;
mod gpio;
mod pwm;

pub use camera::MockCamera;
pub use gpio::MockGpio;
pub use pwm::{MockPwm, PulseWrite};
