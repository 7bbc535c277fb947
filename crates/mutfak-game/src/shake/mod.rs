//! Camera shake feedback
//!
//! A short, restartable jitter around a recorded rest position.

mod config;
mod effect;

pub use config::ShakeConfig;
pub use effect::{random_in_unit_sphere, CameraShake, ShakeTask};
