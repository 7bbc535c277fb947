//! Mutfak Scene - the runtime the kitchen behaviours live in
//!
//! A flat scene of named nodes addressed by generational handles, spawnable
//! templates, and a runner for resumable tasks that advance once per frame.

mod error;
mod node;
mod scene;
mod task;

pub use error::SceneError;
pub use node::NodeId;
pub use scene::{Node, Scene, Template, TemplateId};
pub use task::{Task, TaskHandle, TaskRunner, TaskStatus};
