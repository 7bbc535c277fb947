//! Notifications the kitchen behaviours emit during a frame

use mutfak_scene::NodeId;

/// Something observable that happened this frame
#[derive(Debug, Clone, PartialEq)]
pub enum KitchenEvent {
    /// A turn input moved the camera's target yaw (degrees)
    CameraTurned { target_yaw: f32 },
    /// The knife started moving toward the board
    SliceStarted,
    /// The hold was released before the knife reached the board
    SliceCancelled,
    /// A stroke reached the board
    Cut { count: u32 },
    /// A slice was spawned and is flying to its stack slot
    SliceSpawned { node: NodeId, index: u32 },
    /// The last of the source object was cut away
    SourceRemoved,
    /// The minigame reached its end state
    Finished,
    /// A camera shake was (re)started
    ShakeStarted,
}
