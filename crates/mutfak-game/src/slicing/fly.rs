use glam::{Quat, Vec3};
use mutfak_core::{move_towards, reached, REACH_EPSILON};
use mutfak_scene::{NodeId, Scene, Task, TaskStatus};

/// Carries a spawned slice to its stack slot at constant speed.
///
/// With an end rotation the slice turns in step with the distance covered,
/// not with elapsed time, so it lands exactly as it finishes turning.
pub struct FlyToStack {
    node: NodeId,
    target: Vec3,
    speed: f32,
    start_rotation: Quat,
    end_rotation: Option<Quat>,
    total_distance: f32,
}

impl FlyToStack {
    pub fn new(
        node: NodeId,
        from: Vec3,
        start_rotation: Quat,
        target: Vec3,
        speed: f32,
        end_rotation: Option<Quat>,
    ) -> Self {
        Self {
            node,
            target,
            speed,
            start_rotation,
            end_rotation,
            total_distance: from.distance(target),
        }
    }

    fn progress(&self, position: Vec3) -> f32 {
        if self.total_distance <= f32::EPSILON {
            return 1.0;
        }
        (1.0 - position.distance(self.target) / self.total_distance).clamp(0.0, 1.0)
    }
}

impl Task for FlyToStack {
    fn step(&mut self, scene: &mut Scene, dt: f32) -> TaskStatus {
        let Some(position) = scene.position(self.node) else {
            return TaskStatus::Finished;
        };

        let position = move_towards(position, self.target, self.speed * dt);
        let progress = self.progress(position);
        let landed = reached(position, self.target, REACH_EPSILON);

        let Some(transform) = scene.transform_mut(self.node) else {
            return TaskStatus::Finished;
        };

        if landed {
            transform.position = self.target;
            if let Some(end) = self.end_rotation {
                transform.rotation = end;
            }
            return TaskStatus::Finished;
        }

        transform.position = position;
        if let Some(end) = self.end_rotation {
            transform.rotation = self.start_rotation.slerp(end, progress);
        }
        TaskStatus::Running
    }
}
