//! Resumable tasks advanced once per frame
//!
//! A task holds its own progress and is stepped by the runner until it
//! reports [`TaskStatus::Finished`] or is cancelled.

use std::fmt;

use tracing::trace;

use crate::scene::Scene;

/// Outcome of one step of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Finished,
}

/// A unit of work that spans several frames.
pub trait Task: Send {
    /// Advance by one frame.
    fn step(&mut self, scene: &mut Scene, dt: f32) -> TaskStatus;

    /// Called once when the task is cancelled before it finished.
    fn cancel(&mut self, _scene: &mut Scene) {}
}

/// Handle to a spawned task. Handles are never reused, so a handle to a task
/// that already finished simply stops resolving.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskHandle({})", self.0)
    }
}

/// Runs every live task once per frame, in spawn order.
#[derive(Default)]
pub struct TaskRunner {
    tasks: Vec<(TaskHandle, Box<dyn Task>)>,
    next_id: u64,
}

impl TaskRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a task. It takes its first step on the next [`step_all`](Self::step_all).
    pub fn spawn<T: Task + 'static>(&mut self, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push((handle, Box::new(task)));
        trace!("Spawned {:?}", handle);
        handle
    }

    /// Cancel a live task, running its cancel hook. Returns `false` if the
    /// task already finished or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle, scene: &mut Scene) -> bool {
        let Some(pos) = self.tasks.iter().position(|(h, _)| *h == handle) else {
            return false;
        };
        let (_, mut task) = self.tasks.remove(pos);
        task.cancel(scene);
        trace!("Cancelled {:?}", handle);
        true
    }

    pub fn is_running(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|(h, _)| *h == handle)
    }

    /// Step every task once and drop the ones that finished.
    pub fn step_all(&mut self, scene: &mut Scene, dt: f32) {
        self.tasks
            .retain_mut(|(_, task)| task.step(scene, dt) == TaskStatus::Running);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
