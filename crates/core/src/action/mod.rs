//! Agent action type and validation
//!
//! An action is a two-element vector: steering (-1.0 full left, +1.0 full
//! right) followed by throttle (-1.0 full brake, +1.0 full gas). Invalid
//! actions are rejected, never clamped.

use core::fmt;

/// Number of components in an action vector
pub const ACTION_DIM: usize = 2;

/// Errors raised when an action vector fails validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionError {
    /// Action vector does not have exactly two components
    WrongArity {
        /// Number of components received
        actual: usize,
    },
    /// Component magnitude above 1.0
    OutOfRange {
        /// Position of the offending component
        index: usize,
        /// Value received
        value: f32,
    },
    /// Component is NaN or infinite
    NotFinite {
        /// Position of the offending component
        index: usize,
    },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::WrongArity { actual } => {
                write!(
                    f,
                    "Incorrect action shape: expected {} components, got {}",
                    ACTION_DIM, actual
                )
            }
            ActionError::OutOfRange { index, value } => {
                write!(
                    f,
                    "Incorrect action value: component {} is {} (must be within [-1, 1])",
                    index, value
                )
            }
            ActionError::NotFinite { index } => {
                write!(f, "Incorrect action value: component {} is not finite", index)
            }
        }
    }
}

impl core::error::Error for ActionError {}

/// A validated steering/throttle command
///
/// Fields are private: an `Action` only comes out of [`Action::from_slice`],
/// [`Action::NEUTRAL`] or [`Action::attenuated`], so both components always
/// lie within [-1, 1].
///
/// ```compile_fail
/// use racing_car_core::action::Action;
///
/// let action = Action { steering: 3.0, throttle: 0.0 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Action {
    steering: f32,
    throttle: f32,
}

impl Action {
    /// Zero steering, zero throttle
    pub const NEUTRAL: Action = Action {
        steering: 0.0,
        throttle: 0.0,
    };

    /// Validate a raw action vector
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] if the slice does not hold exactly two finite
    /// components with magnitude at most 1.0.
    pub fn from_slice(values: &[f32]) -> Result<Self, ActionError> {
        let &[steering, throttle] = values else {
            return Err(ActionError::WrongArity {
                actual: values.len(),
            });
        };
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(ActionError::NotFinite { index });
            }
            if !(-1.0..=1.0).contains(&value) {
                return Err(ActionError::OutOfRange { index, value });
            }
        }
        Ok(Self { steering, throttle })
    }

    /// Scale the throttle by a motor limitation factor
    ///
    /// The factor is taken within [0, 1], so the result stays in range.
    pub fn attenuated(self, motor_limitation: f32) -> Self {
        Self {
            steering: self.steering,
            throttle: self.throttle * motor_limitation.clamp(0.0, 1.0),
        }
    }

    pub fn steering(&self) -> f32 {
        self.steering
    }

    pub fn throttle(&self) -> f32 {
        self.throttle
    }

    pub fn as_array(&self) -> [f32; ACTION_DIM] {
        [self.steering, self.throttle]
    }
}
