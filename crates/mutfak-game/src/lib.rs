//! Mutfak Game - kitchen gameplay behaviours
//!
//! Provides the camera yaw controller, camera shake, the slicing minigame,
//! action-based input, and the stage that runs them once per frame.

pub mod behaviour;
pub mod camera;
pub mod error;
pub mod events;
pub mod input;
pub mod shake;
pub mod slicing;
pub mod stage;

pub use behaviour::{Behaviour, FrameContext, Schedule};
pub use camera::{ClampSpace, YawConfig, YawController};
pub use error::ConfigError;
pub use events::KitchenEvent;
pub use input::{InputAction, InputBinding, InputBindings, InputHandler, InputState};
pub use shake::{CameraShake, ShakeConfig};
pub use slicing::{
    FlyRotation, SlicingConfig, SlicingMinigame, SlicingRefs, SlicingRevision, SlicingState,
    SourceCut, MAX_CUTS, MAX_SLICES,
};
pub use stage::Stage;
