//! Camera yaw configuration

use serde::{Deserialize, Serialize};

use crate::error::{non_negative, positive, ConfigError};

/// Frame of reference the yaw clamp is applied in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampSpace {
    /// Clamp the raw accumulated yaw to `[-clamp_angle, clamp_angle]`
    #[default]
    Absolute,
    /// Clamp the wrapped offset from the yaw the camera started with
    RelativeToStart,
}

/// Camera yaw configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YawConfig {
    /// Degrees added or removed per turn press
    pub turn_angle: f32,
    /// Tracking speed; the smoothing time is `1 / turn_speed` seconds
    pub turn_speed: f32,
    /// Whether the target yaw is clamped
    pub clamp: bool,
    /// Half-width of the allowed arc in degrees
    pub clamp_angle: f32,
    pub clamp_space: ClampSpace,
}

impl Default for YawConfig {
    fn default() -> Self {
        Self {
            turn_angle: 90.0,
            turn_speed: 5.0,
            clamp: false,
            clamp_angle: 90.0,
            clamp_space: ClampSpace::Absolute,
        }
    }
}

impl YawConfig {
    /// Smoothing time constant in seconds
    pub fn smooth_time(&self) -> f32 {
        1.0 / self.turn_speed
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("camera.turn_angle", self.turn_angle)?;
        positive("camera.turn_speed", self.turn_speed)?;
        non_negative("camera.clamp_angle", self.clamp_angle)?;
        Ok(())
    }
}
