use racing_car_core::action::ActionError;

use crate::parameters::ConfigError;
use crate::platform::PlatformError;

/// Errors surfaced by the environment API.
///
/// Episode termination is not an error; it is reported through
/// [`StepResult::done`](crate::rover::StepResult::done).
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// Invalid construction parameters. The environment was not built.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rejected action. Nothing was actuated or recorded.
    #[error("Invalid action: {0}")]
    Validation(#[from] ActionError),

    /// Actuation, capture or GPIO failure. Not retried.
    #[error("Hardware fault: {0}")]
    Hardware(#[from] PlatformError),
}

impl EnvError {
    pub fn is_hardware_fault(&self) -> bool {
        matches!(self, EnvError::Hardware(_))
    }
}
