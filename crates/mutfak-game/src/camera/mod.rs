//! Camera yaw controller
//!
//! Turns the kitchen camera in fixed steps with smoothed tracking.

mod config;
mod controller;

pub use config::{ClampSpace, YawConfig};
pub use controller::YawController;
