//! The per-frame loop that drives every behaviour and task

use mutfak_core::{GameTime, TimeConfig};
use mutfak_scene::{Scene, TaskRunner};
use tracing::{debug, trace};

use crate::behaviour::{Behaviour, FrameContext, Schedule};
use crate::events::KitchenEvent;
use crate::input::{InputAction, InputState};

/// Owns the scene and runs one frame at a time: behaviours first, in the
/// order they were added, then every task with the same delta.
pub struct Stage {
    pub time: GameTime,
    pub scene: Scene,
    pub tasks: TaskRunner,
    schedule: Schedule,
    events: Vec<KitchenEvent>,
}

impl Stage {
    pub fn new(config: TimeConfig, scene: Scene) -> Self {
        Self {
            time: GameTime::new(config),
            scene,
            tasks: TaskRunner::new(),
            schedule: Schedule::new(),
            events: Vec::new(),
        }
    }

    pub fn add_behaviour<B: Behaviour + 'static>(&mut self, behaviour: B) {
        self.schedule.add(behaviour);
    }

    pub fn behaviour_count(&self) -> usize {
        self.schedule.len()
    }

    /// Run one frame. Events from the previous frame that were not drained
    /// are discarded. A fresh `Pause` press freezes or unfreezes the clock
    /// before this frame's delta is taken.
    pub fn frame(&mut self, input: &InputState, raw_delta: f32) {
        if input.is_just_pressed(InputAction::Pause) {
            self.time.toggle_pause();
            debug!("Kitchen {}", if self.time.paused { "paused" } else { "resumed" });
        }
        self.time.update(raw_delta);
        let dt = self.time.delta_time;
        self.events.clear();

        let mut ctx = FrameContext {
            scene: &mut self.scene,
            tasks: &mut self.tasks,
            input,
            events: &mut self.events,
            dt,
        };
        self.schedule.run_all(&mut ctx);

        self.tasks.step_all(&mut self.scene, dt);
        trace!(
            "Frame {} dt={:.4} tasks={} events={}",
            self.time.frame_count,
            dt,
            self.tasks.len(),
            self.events.len()
        );
    }

    /// Events produced by the last frame
    pub fn events(&self) -> &[KitchenEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<KitchenEvent> {
        std::mem::take(&mut self.events)
    }
}
