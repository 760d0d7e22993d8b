//! Episode controller
//!
//! [`RacingCar`] turns the asynchronous telemetry of the car into a
//! synchronous reset/step interface. It owns the hardware handles:
//!
//! - The GPIO service, whose callbacks feed the shared telemetry
//! - The actuation driver for the steering servo and the motor ESC
//! - The camera providing observations
//!
//! `reset` and `step` never wait on telemetry; they block only on the PWM
//! writes and the camera capture.
//!
//! ## Safety
//!
//! Once an episode terminates, every step commands neutral regardless of the
//! action, so a car that left the track stops even if the agent keeps
//! driving. Only `reset` starts a new episode.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use racing_car_core::action::{ACTION_DIM, Action};
use racing_car_core::telemetry::TelemetrySnapshot;

use super::step::{EpisodeState, StepResult};
use crate::error::EnvError;
use crate::libraries::ActuationDriver;
use crate::parameters::CarConfig;
use crate::platform::traits::{CameraInterface, Frame, GpioService, ServoPwm};
use crate::subsystems::SharedTelemetry;
use crate::{log_debug, log_error, log_info, log_warn};

/// Physical racing car as a reinforcement-learning environment
pub struct RacingCar<G: GpioService, P: ServoPwm, C: CameraInterface> {
    gpio: G,
    actuation: ActuationDriver<P>,
    camera: C,
    telemetry: SharedTelemetry,
    config: CarConfig,
    rng: StdRng,
}

impl<G: GpioService, P: ServoPwm, C: CameraInterface> RacingCar<G, P, C> {
    /// Build the environment on already-running hardware services
    ///
    /// Validates the configuration, arms the watchdogs, subscribes the input
    /// pins, configures the camera and centers the actuators.
    ///
    /// # Errors
    ///
    /// - `EnvError::Config` if the configuration is invalid; no hardware is touched
    /// - `EnvError::Hardware` if a service refuses its setup; the GPIO
    ///   service is stopped before returning
    pub fn new(config: CarConfig, mut gpio: G, pwm: P, mut camera: C) -> Result<Self, EnvError> {
        config.validate()?;

        let telemetry = SharedTelemetry::new(config.telemetry_params(), config.pins);
        let mut actuation = ActuationDriver::new(
            pwm,
            config.pins.steering_servo,
            config.pins.motor,
            config.hardware.actuator_config(),
        );

        let setup = telemetry
            .attach(&mut gpio, &config.timing)
            .and_then(|()| actuation.neutral())
            .and_then(|()| camera.configure(&config.camera));
        if let Err(e) = setup {
            log_error!("setup failed: {}", e);
            // callbacks must not outlive the environment
            if let Err(stop) = gpio.stop() {
                log_warn!("gpio release after failed setup: {}", stop);
            }
            return Err(e.into());
        }

        let rng = match config.sample_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log_info!(
            "racing car ready: motor_limitation={}, speed window {} ms, reward window {} ms, image {}x{}",
            config.motor_limitation,
            config.timing.speed_window_ms,
            config.timing.reward_window_ms,
            config.image.width,
            config.image.height
        );

        Ok(Self {
            gpio,
            actuation,
            camera,
            telemetry,
            config,
            rng,
        })
    }

    /// Start a new episode
    ///
    /// Centers the actuators, clears the telemetry and captures the first
    /// observation. The result always reports zero reward and `done = false`.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::Hardware` if actuation or capture fails.
    pub fn reset(&mut self) -> Result<StepResult, EnvError> {
        self.actuation.neutral()?;
        let snapshot = self.telemetry.reset(self.config.policy.pulse_reset);
        let observation = self.capture()?;

        log_info!("episode reset");
        Ok(StepResult::new(observation, snapshot))
    }

    /// Apply an action vector and observe the result
    ///
    /// `action` holds steering (-1 full left, +1 full right) and throttle
    /// (-1 full brake, +1 full gas).
    ///
    /// # Errors
    ///
    /// - `EnvError::Validation` if the action does not have two components
    ///   within [-1, 1]; nothing is actuated or recorded
    /// - `EnvError::Hardware` if actuation or capture fails
    pub fn step(&mut self, action: &[f32]) -> Result<StepResult, EnvError> {
        let action = Action::from_slice(action)?;
        self.step_action(action)
    }

    /// Apply an already validated action
    ///
    /// The signals are recorded into telemetry only once both PWM writes
    /// succeeded.
    pub fn step_action(&mut self, action: Action) -> Result<StepResult, EnvError> {
        let command = if self.telemetry.is_done() {
            Action::NEUTRAL
        } else {
            action.attenuated(self.config.motor_limitation)
        };

        self.actuation.apply(command)?;
        self.telemetry.record_command(command);
        let observation = self.capture()?;

        Ok(StepResult::new(observation, self.telemetry.snapshot()))
    }

    /// Release the hardware
    ///
    /// Closes the camera, centers the actuators and stops the GPIO service.
    /// All three are attempted even if one fails; the first error is
    /// returned. Consuming `self` rules out a second close.
    pub fn close(mut self) -> Result<(), EnvError> {
        let camera = self.camera.close();
        let actuation = self.actuation.neutral();
        let gpio = self.gpio.stop();

        for (what, result) in [("camera", &camera), ("actuation", &actuation), ("gpio", &gpio)] {
            if let Err(e) = result {
                log_warn!("close: {} release failed: {}", what, e);
            }
        }
        camera?;
        actuation?;
        gpio?;

        log_info!("racing car closed");
        Ok(())
    }

    fn capture(&mut self) -> Result<Frame, EnvError> {
        let image = &self.config.image;
        let frame = self
            .camera
            .capture_frame(image.width, image.height, image.format)
            .and_then(|frame| {
                frame.ensure_shape(image.width, image.height, image.format)?;
                Ok(frame)
            })
            .inspect_err(|e| log_error!("capture failed: {}", e))?;
        Ok(frame)
    }

    /// Random frame with the observation geometry, for sizing agent inputs
    pub fn sample_observation(&mut self) -> Frame {
        let image = &self.config.image;
        let mut frame = Frame::zeroed(image.width, image.height, image.format);
        self.rng.fill(&mut frame.data[..]);
        frame
    }

    /// Uniformly random action in [-1, 1] on both axes
    pub fn sample_action(&mut self) -> [f32; ACTION_DIM] {
        let sample = [
            self.rng.gen_range(-1.0..=1.0),
            self.rng.gen_range(-1.0..=1.0),
        ];
        log_debug!("sampled action {:?}", sample);
        sample
    }

    /// Current telemetry without touching the hardware
    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.telemetry.snapshot()
    }

    pub fn episode_state(&self) -> EpisodeState {
        EpisodeState::from_done(self.telemetry.is_done())
    }

    pub fn config(&self) -> &CarConfig {
        &self.config
    }
}
