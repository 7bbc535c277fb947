//! Slicing minigame
//!
//! Hold the slice input to push the knife onto the board. Every stroke that
//! lands cuts the sucuk: the first [`MAX_SLICES`] cuts each spawn a slice that
//! flies onto the plate stack, the [`MAX_CUTS`]-th removes what is left and
//! ends the game.

mod config;
mod fly;
mod minigame;

pub use config::{
    FlyRotation, SlicingConfig, SlicingRevision, SourceCut, MAX_CUTS, MAX_SLICES,
};
pub use fly::FlyToStack;
pub use minigame::{SlicingMinigame, SlicingRefs, SlicingState};
