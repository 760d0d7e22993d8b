//! Step results
//!
//! Every `reset` and `step` returns the four-tuple familiar from simulated
//! environments: observation, reward, done and an info record.

use racing_car_core::telemetry::TelemetrySnapshot;
use serde::{Deserialize, Serialize};

use crate::platform::traits::Frame;

/// Episode lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeState {
    /// The car may move
    Active,
    /// The car left the track or idled; actions are ignored until reset
    Terminated,
}

impl EpisodeState {
    pub fn from_done(done: bool) -> Self {
        if done {
            EpisodeState::Terminated
        } else {
            EpisodeState::Active
        }
    }
}

/// Telemetry returned as `info`
///
/// Serializes with the key names agents expect from the info mapping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CarInfo {
    #[serde(rename = "Steering signal")]
    pub steering_signal: f32,
    #[serde(rename = "Motor signal")]
    pub motor_signal: f32,
    #[serde(rename = "Reward")]
    pub reward: f32,
    #[serde(rename = "Car speed")]
    pub car_speed: f32,
    #[serde(rename = "Done")]
    pub done: bool,
}

impl From<TelemetrySnapshot> for CarInfo {
    fn from(snapshot: TelemetrySnapshot) -> Self {
        Self {
            steering_signal: snapshot.steering_signal,
            motor_signal: snapshot.motor_signal,
            reward: snapshot.reward,
            car_speed: snapshot.speed,
            done: snapshot.done,
        }
    }
}

/// Result of `reset` or `step`
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Camera frame captured after the command was applied
    pub observation: Frame,
    /// Accumulated episode reward
    pub reward: f32,
    /// Whether the episode has terminated
    pub done: bool,
    pub info: CarInfo,
}

impl StepResult {
    pub(crate) fn new(observation: Frame, snapshot: TelemetrySnapshot) -> Self {
        Self {
            observation,
            reward: snapshot.reward,
            done: snapshot.done,
            info: CarInfo::from(snapshot),
        }
    }

    /// Split into the `(observation, reward, done, info)` tuple
    pub fn into_tuple(self) -> (Frame, f32, bool, CarInfo) {
        (self.observation, self.reward, self.done, self.info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::traits::ColorFormat;

    #[test]
    fn test_info_keys() {
        let info = CarInfo {
            steering_signal: 0.5,
            motor_signal: 0.25,
            reward: 4.0,
            car_speed: 1.5,
            done: false,
        };
        let json = serde_json::to_value(info).unwrap();

        assert_eq!(json["Steering signal"], 0.5);
        assert_eq!(json["Motor signal"], 0.25);
        assert_eq!(json["Reward"], 4.0);
        assert_eq!(json["Car speed"], 1.5);
        assert_eq!(json["Done"], false);
    }

    #[test]
    fn test_result_duplicates_reward_and_done() {
        let snapshot = TelemetrySnapshot {
            reward: -1.0,
            done: true,
            speed: 0.75,
            ..TelemetrySnapshot::default()
        };
        let result = StepResult::new(Frame::zeroed(2, 2, ColorFormat::Rgb), snapshot);

        assert_eq!(result.reward, result.info.reward);
        assert_eq!(result.done, result.info.done);
        assert_eq!(result.info.car_speed, 0.75);

        let (frame, reward, done, _) = result.into_tuple();
        assert_eq!(frame.data.len(), 12);
        assert_eq!(reward, -1.0);
        assert!(done);
    }

    #[test]
    fn test_episode_state() {
        assert_eq!(EpisodeState::from_done(false), EpisodeState::Active);
        assert_eq!(EpisodeState::from_done(true), EpisodeState::Terminated);
    }
}
