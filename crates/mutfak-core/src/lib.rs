//! Mutfak Core - Core types and utilities for the kitchen prototype
//!
//! This crate provides the foundational types used by every behaviour:
//! - Mathematical primitives (re-exported from glam)
//! - Transform for scene node poses
//! - Frame time with clamping, scaling and pause
//! - Interpolation helpers (move towards, critically damped smoothing)

pub mod math;
pub mod time;
pub mod types;

pub use glam::{EulerRot, Quat, Vec3};
pub use math::{
    delta_angle, move_towards, reached, smooth_damp, smooth_damp_angle, wrap_degrees,
    REACH_EPSILON,
};
pub use time::{GameTime, TimeConfig};
pub use types::Transform;
