//! racing_car - Physical RC car exposed as a reinforcement-learning environment
//!
//! An agent drives the car through a synchronous reset/step/close interface.
//! Camera frames are the observations. Steering and throttle are the actions.
//! Reward and termination come from GPIO telemetry (line sensors, wheel
//! encoder and lap marker) collected asynchronously by event callbacks.
//!
//! Hardware sits behind the traits in [`platform`]; [`platform::mock`]
//! provides in-memory implementations for host testing.
//!
//! ```
//! use racing_car::platform::mock::{MockCamera, MockGpio, MockPwm};
//! use racing_car::{CarConfig, RacingCar};
//!
//! let gpio = MockGpio::new();
//! let mut car = RacingCar::new(CarConfig::default(), gpio.clone(), MockPwm::new(), MockCamera::new())?;
//!
//! let first = car.reset()?;
//! assert!(!first.done);
//!
//! gpio.rising(13); // lap marker
//! gpio.timeout(13); // reward window closes
//! let result = car.step(&[0.0, 0.5])?;
//! assert_eq!(result.reward, 4.0);
//!
//! car.close()?;
//! # Ok::<(), racing_car::EnvError>(())
//! ```

// Platform abstraction layer (GPIO, servo PWM, camera)
pub mod platform;

// Pulse width output
pub mod libraries;

// Telemetry fed by GPIO callbacks
pub mod subsystems;

// Episode controller
pub mod rover;

pub mod error;
pub mod logging;
pub mod parameters;

#[doc(hidden)]
pub use tracing;

pub use error::EnvError;
pub use parameters::{CarConfig, ConfigError};
pub use racing_car_core as core_logic;
pub use rover::{CarInfo, EpisodeState, RacingCar, StepResult};
