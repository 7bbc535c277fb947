//! Camera controller that turns in fixed steps and tracks smoothly

use glam::{EulerRot, Quat};
use mutfak_core::{delta_angle, smooth_damp_angle, wrap_degrees};
use mutfak_scene::{NodeId, Scene};
use tracing::debug;

use crate::behaviour::{Behaviour, FrameContext};
use crate::events::KitchenEvent;
use crate::input::InputAction;

use super::{ClampSpace, YawConfig};

/// Yaw controller for the kitchen camera.
///
/// Each turn press moves the target yaw by `turn_angle`; the rendered yaw
/// follows with critically damped smoothing. Pitch and roll are kept from
/// the camera's starting orientation. Angles are in degrees.
pub struct YawController {
    pub config: YawConfig,
    camera: Option<NodeId>,
    target_yaw: f32,
    current_yaw: f32,
    yaw_velocity: f32,
    start_yaw: f32,
    /// Radians, captured at construction
    pitch: f32,
    /// Radians, captured at construction
    roll: f32,
}

impl YawController {
    /// Attach to a camera node, reading its current orientation. A missing
    /// or dead camera starts at zero yaw and the controller only tracks state.
    pub fn new(config: YawConfig, camera: Option<NodeId>, scene: &Scene) -> Self {
        let rotation = camera
            .and_then(|id| scene.transform(id))
            .map(|t| t.rotation)
            .unwrap_or(Quat::IDENTITY);
        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
        let start_yaw = yaw.to_degrees();

        Self {
            config,
            camera,
            target_yaw: start_yaw,
            current_yaw: start_yaw,
            yaw_velocity: 0.0,
            start_yaw,
            pitch,
            roll,
        }
    }

    /// Yaw the camera is heading toward
    pub fn target_yaw(&self) -> f32 {
        self.target_yaw
    }

    /// Yaw currently rendered
    pub fn current_yaw(&self) -> f32 {
        self.current_yaw
    }

    /// Yaw the camera had when the controller attached
    pub fn start_yaw(&self) -> f32 {
        self.start_yaw
    }

    /// Signed shortest angle still to travel
    pub fn remaining(&self) -> f32 {
        delta_angle(self.current_yaw, self.target_yaw)
    }

    /// Orientation for the current yaw
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.current_yaw.to_radians(),
            self.pitch,
            self.roll,
        )
    }

    fn clamped(&self, yaw: f32) -> f32 {
        if !self.config.clamp {
            return yaw;
        }
        let limit = self.config.clamp_angle;
        match self.config.clamp_space {
            ClampSpace::Absolute => yaw.clamp(-limit, limit),
            ClampSpace::RelativeToStart => {
                let offset = wrap_degrees(yaw - self.start_yaw);
                self.start_yaw + offset.clamp(-limit, limit)
            }
        }
    }
}

impl Behaviour for YawController {
    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        let mut turned = false;
        if ctx.input.is_just_pressed(InputAction::TurnRight) {
            self.target_yaw += self.config.turn_angle;
            turned = true;
        }
        if ctx.input.is_just_pressed(InputAction::TurnLeft) {
            self.target_yaw -= self.config.turn_angle;
            turned = true;
        }
        if turned {
            self.target_yaw = self.clamped(self.target_yaw);
            debug!("Camera target yaw now {:.1}", self.target_yaw);
            ctx.emit(KitchenEvent::CameraTurned {
                target_yaw: self.target_yaw,
            });
        }

        self.current_yaw = smooth_damp_angle(
            self.current_yaw,
            self.target_yaw,
            &mut self.yaw_velocity,
            self.config.smooth_time(),
            ctx.dt,
        );

        let rotation = self.rotation();
        if let Some(transform) = self.camera.and_then(|id| ctx.scene.transform_mut(id)) {
            transform.rotation = rotation;
        }
    }
}
