//! Kitchen settings with persistence
//!
//! Settings are read from `~/.config/mutfak/settings.toml`, or from the file
//! named by `MUTFAK_SETTINGS`.

use std::env;
use std::fs;
use std::path::PathBuf;

use mutfak_core::TimeConfig;
use mutfak_game::{ConfigError, ShakeConfig, SlicingConfig, YawConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All tunables for a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenSettings {
    pub time: TimeConfig,
    pub camera: YawConfig,
    pub slicing: SlicingConfig,
    pub shake: ShakeConfig,
    pub session: SessionSettings,
}

impl KitchenSettings {
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mutfak"))
    }

    fn settings_path() -> Option<PathBuf> {
        if let Ok(path) = env::var("MUTFAK_SETTINGS") {
            return Some(PathBuf::from(path));
        }
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::settings_path() else {
            anyhow::bail!("Could not determine config directory");
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        self.slicing.validate()?;
        self.shake.validate()?;
        self.session.validate()
    }
}

/// Direction of a scripted camera turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    Left,
    Right,
}

/// How the headless session plays itself
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Simulated frames per second
    pub frame_rate: f32,
    /// Give up if the minigame has not finished after this many frames
    pub max_frames: u32,
    /// Camera turns played before slicing starts
    pub turns: Vec<Turn>,
    /// Frames the slice button stays released between strokes
    pub release_frames: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            max_frames: 20_000,
            turns: vec![Turn::Right, Turn::Left, Turn::Left, Turn::Right],
            release_frames: 6,
        }
    }
}

impl SessionSettings {
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate > 0.0 && self.frame_rate.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::NotPositive {
                field: "session.frame_rate",
                value: self.frame_rate,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mutfak_game::{ClampSpace, SourceCut};

    #[test]
    fn test_defaults_are_valid() {
        assert!(KitchenSettings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = KitchenSettings::parse(
            r#"
            [camera]
            clamp = true
            clamp_angle = 45.0
            clamp_space = "relative_to_start"

            [slicing]
            slice_speed = 3.0

            [slicing.source_cut]
            kind = "shrink"
            axis = [1.0, 0.0, 0.0]
            width = 0.1

            [session]
            turns = ["left"]
            "#,
        )
        .unwrap();

        assert!(settings.camera.clamp);
        assert_eq!(settings.camera.clamp_space, ClampSpace::RelativeToStart);
        assert_eq!(settings.camera.turn_angle, 90.0);
        assert_eq!(settings.slicing.slice_speed, 3.0);
        assert!(matches!(
            settings.slicing.source_cut,
            SourceCut::Shrink { width, .. } if (width - 0.1).abs() < 1e-6
        ));
        assert_eq!(settings.session.turns, vec![Turn::Left]);
        assert_eq!(settings.session.frame_rate, 60.0);
        assert_eq!(settings.shake.duration, 0.15);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let settings = KitchenSettings::parse("[shake]\nduration = -1.0\n").unwrap();
        assert!(settings.validate().is_err());

        let settings = KitchenSettings::parse("[session]\nframe_rate = 0.0\n").unwrap();
        assert!(settings.validate().is_err());
    }
}
