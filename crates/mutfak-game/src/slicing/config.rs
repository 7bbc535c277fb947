//! Slicing minigame configuration

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{direction, non_negative, positive, ConfigError};

/// Cuts that produce a slice
pub const MAX_SLICES: u32 = 5;
/// Total cuts; the last one removes the source object
pub const MAX_CUTS: u32 = MAX_SLICES + 1;

/// What a cut does to the source object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceCut {
    /// Reduce the scale along `axis` by `width` per cut (never below zero)
    Shrink { axis: Vec3, width: f32 },
    /// Move the source by `distance` along the world-space `direction`
    Advance { direction: Vec3, distance: f32 },
}

impl SourceCut {
    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            SourceCut::Shrink { axis, width } => {
                direction("slicing.source_cut.axis", axis)?;
                non_negative("slicing.source_cut.width", width)
            }
            SourceCut::Advance {
                direction: dir,
                distance,
            } => {
                direction("slicing.source_cut.direction", dir)?;
                non_negative("slicing.source_cut.distance", distance)
            }
        }
    }
}

/// Rotation a slice turns through while it flies to the plate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlyRotation {
    pub axis: Vec3,
    pub degrees: f32,
}

impl FlyRotation {
    /// Orientation a slice ends with on the stack. A zero axis means no turn.
    pub fn end_rotation(&self) -> Quat {
        match self.axis.try_normalize() {
            Some(axis) => Quat::from_axis_angle(axis, self.degrees.to_radians()),
            None => Quat::IDENTITY,
        }
    }
}

/// Slicing minigame configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicingConfig {
    /// Knife speed toward the board (units per second)
    pub slice_speed: f32,
    /// Knife speed back to the high anchor (units per second)
    pub reset_speed: f32,
    /// Speed of a slice flying to the plate (units per second)
    pub fly_speed: f32,
    /// Gap between stacked slices
    pub stack_spacing: f32,
    /// Direction the stack grows in from the plate
    pub stack_direction: Vec3,
    pub source_cut: SourceCut,
    /// When set, slices spawn unrotated and turn to this while flying
    pub fly_rotation: Option<FlyRotation>,
    /// Whether the final, slice-less cut still shakes the camera
    pub shake_on_final_cut: bool,
}

impl Default for SlicingConfig {
    fn default() -> Self {
        SlicingRevision::default().config()
    }
}

impl SlicingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("slicing.slice_speed", self.slice_speed)?;
        positive("slicing.reset_speed", self.reset_speed)?;
        positive("slicing.fly_speed", self.fly_speed)?;
        non_negative("slicing.stack_spacing", self.stack_spacing)?;
        direction("slicing.stack_direction", self.stack_direction)?;
        self.source_cut.validate()?;
        if let Some(rotation) = &self.fly_rotation {
            direction("slicing.fly_rotation.axis", rotation.axis)?;
        }
        Ok(())
    }

    /// Rest position of slice `index` (zero-based) on a plate at `plate`
    pub fn stack_slot(&self, plate: Vec3, index: u32) -> Vec3 {
        plate + self.stack_direction.normalize_or_zero() * index as f32 * self.stack_spacing
    }
}

/// The three shipped tunings of the minigame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlicingRevision {
    /// The sucuk gets shorter with every cut; every cut shakes
    Shrinking,
    /// The sucuk slides forward under the knife
    Advancing,
    /// Advancing, with slices turning flat as they fly
    #[default]
    AdvancingRotated,
}

impl SlicingRevision {
    pub fn config(self) -> SlicingConfig {
        let base = SlicingConfig {
            slice_speed: 1.5,
            reset_speed: 2.5,
            fly_speed: 2.0,
            stack_spacing: 0.02,
            stack_direction: Vec3::Y,
            source_cut: SourceCut::Advance {
                direction: Vec3::X,
                distance: 0.03,
            },
            fly_rotation: None,
            shake_on_final_cut: false,
        };

        match self {
            SlicingRevision::Shrinking => SlicingConfig {
                source_cut: SourceCut::Shrink {
                    axis: Vec3::X,
                    width: 0.15,
                },
                shake_on_final_cut: true,
                ..base
            },
            SlicingRevision::Advancing => base,
            SlicingRevision::AdvancingRotated => SlicingConfig {
                fly_rotation: Some(FlyRotation {
                    axis: Vec3::X,
                    degrees: 90.0,
                }),
                ..base
            },
        }
    }
}
