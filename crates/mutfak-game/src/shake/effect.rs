//! Shake effect and the task that plays it

use glam::Vec3;
use mutfak_scene::{NodeId, Scene, Task, TaskHandle, TaskRunner, TaskStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::behaviour::FrameContext;
use crate::events::KitchenEvent;

use super::ShakeConfig;

/// Uniform sample inside the unit sphere (rejection sampling)
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0f32..=1.0),
            rng.gen_range(-1.0f32..=1.0),
            rng.gen_range(-1.0f32..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}

/// Shakes one node. At most one shake per effect is live; starting a new one
/// cancels the previous and puts the node back at rest first.
pub struct CameraShake {
    pub config: ShakeConfig,
    target: Option<NodeId>,
    active: Option<TaskHandle>,
    rng: StdRng,
}

impl CameraShake {
    pub fn new(config: ShakeConfig, target: Option<NodeId>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            target,
            active: None,
            rng,
        }
    }

    /// Start (or restart) the shake. Returns `false` when there is no live
    /// node to shake.
    pub fn shake(&mut self, scene: &mut Scene, tasks: &mut TaskRunner) -> bool {
        if let Some(handle) = self.active.take() {
            tasks.cancel(handle, scene);
        }

        let Some(node) = self.target else {
            return false;
        };
        let Some(rest) = scene.position(node) else {
            return false;
        };

        let task = ShakeTask {
            node,
            rest,
            elapsed: 0.0,
            duration: self.config.duration,
            magnitude: self.config.magnitude,
            rng: StdRng::seed_from_u64(self.rng.gen()),
        };
        self.active = Some(tasks.spawn(task));
        trace!("Shaking {} around {:?}", node, rest);
        true
    }

    /// [`shake`](Self::shake) from inside a behaviour, announcing it.
    pub fn trigger(&mut self, ctx: &mut FrameContext<'_>) -> bool {
        let started = self.shake(ctx.scene, ctx.tasks);
        if started {
            ctx.emit(KitchenEvent::ShakeStarted);
        }
        started
    }

    pub fn is_shaking(&self, tasks: &TaskRunner) -> bool {
        self.active.is_some_and(|handle| tasks.is_running(handle))
    }
}

/// One playing shake. Time-based, so the length does not depend on frame rate
/// and a frozen clock holds the current offset.
pub struct ShakeTask {
    node: NodeId,
    rest: Vec3,
    elapsed: f32,
    duration: f32,
    magnitude: f32,
    rng: StdRng,
}

impl Task for ShakeTask {
    fn step(&mut self, scene: &mut Scene, dt: f32) -> TaskStatus {
        let Some(transform) = scene.transform_mut(self.node) else {
            return TaskStatus::Finished;
        };

        if self.elapsed >= self.duration {
            transform.position = self.rest;
            return TaskStatus::Finished;
        }
        if dt <= 0.0 {
            return TaskStatus::Running;
        }

        transform.position = self.rest + random_in_unit_sphere(&mut self.rng) * self.magnitude;
        self.elapsed += dt;
        TaskStatus::Running
    }

    fn cancel(&mut self, scene: &mut Scene) {
        if let Some(transform) = scene.transform_mut(self.node) {
            transform.position = self.rest;
        }
    }
}
