//! Per-frame behaviours and the context they run in

use mutfak_scene::{Scene, TaskRunner};

use crate::events::KitchenEvent;
use crate::input::InputState;

/// Everything a behaviour may read or touch during one frame.
pub struct FrameContext<'a> {
    pub scene: &'a mut Scene,
    pub tasks: &'a mut TaskRunner,
    pub input: &'a InputState,
    pub events: &'a mut Vec<KitchenEvent>,
    /// Seconds since the previous frame
    pub dt: f32,
}

impl FrameContext<'_> {
    pub fn emit(&mut self, event: KitchenEvent) {
        self.events.push(event);
    }
}

/// Logic attached to the scene that runs every frame.
pub trait Behaviour: Send {
    fn update(&mut self, ctx: &mut FrameContext<'_>);
}

/// Closures can be used as behaviours.
impl<F: FnMut(&mut FrameContext<'_>) + Send> Behaviour for F {
    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        (self)(ctx);
    }
}

/// An ordered list of behaviours to run each frame.
#[derive(Default)]
pub struct Schedule {
    behaviours: Vec<Box<dyn Behaviour>>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a behaviour to the end of the schedule.
    pub fn add<B: Behaviour + 'static>(&mut self, behaviour: B) {
        self.behaviours.push(Box::new(behaviour));
    }

    /// Run all behaviours in order.
    pub fn run_all(&mut self, ctx: &mut FrameContext<'_>) {
        for behaviour in &mut self.behaviours {
            behaviour.update(ctx);
        }
    }

    pub fn len(&self) -> usize {
        self.behaviours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviours.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_schedule_runs_in_order() {
        let mut scene = Scene::new();
        let mut tasks = TaskRunner::new();
        let input = InputState::new();
        let mut events = Vec::new();
        let log = Arc::new(Mutex::new(Vec::<u32>::new()));

        let mut schedule = Schedule::new();
        for i in 1..=3 {
            let log = log.clone();
            schedule.add(move |_: &mut FrameContext<'_>| log.lock().unwrap().push(i));
        }
        assert_eq!(schedule.len(), 3);

        let mut ctx = FrameContext {
            scene: &mut scene,
            tasks: &mut tasks,
            input: &input,
            events: &mut events,
            dt: 0.016,
        };
        schedule.run_all(&mut ctx);
        assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_closures_can_emit_events() {
        let mut scene = Scene::new();
        let mut tasks = TaskRunner::new();
        let input = InputState::new();
        let mut events = Vec::new();

        let mut behaviour = |ctx: &mut FrameContext<'_>| ctx.emit(KitchenEvent::SliceStarted);
        behaviour.update(&mut FrameContext {
            scene: &mut scene,
            tasks: &mut tasks,
            input: &input,
            events: &mut events,
            dt: 0.016,
        });
        assert_eq!(events, vec![KitchenEvent::SliceStarted]);
    }
}
