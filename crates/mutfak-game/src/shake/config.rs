use serde::{Deserialize, Serialize};

use crate::error::{non_negative, ConfigError};

/// Camera shake configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// Seconds a shake lasts
    pub duration: f32,
    /// Largest offset from the rest position
    pub magnitude: f32,
    /// Fixed seed for reproducible jitter; entropy when unset
    pub seed: Option<u64>,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            duration: 0.15,
            magnitude: 0.05,
            seed: None,
        }
    }
}

impl ShakeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("shake.duration", self.duration)?;
        non_negative("shake.magnitude", self.magnitude)?;
        Ok(())
    }
}
