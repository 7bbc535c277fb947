//! The slicing state machine

use glam::{Quat, Vec3};
use mutfak_core::{move_towards, reached, REACH_EPSILON};
use mutfak_scene::{NodeId, Scene, TemplateId};
use tracing::{debug, info, warn};

use crate::behaviour::{Behaviour, FrameContext};
use crate::events::KitchenEvent;
use crate::input::InputAction;
use crate::shake::CameraShake;

use super::fly::FlyToStack;
use super::{SlicingConfig, SourceCut, MAX_CUTS, MAX_SLICES};

/// Where the minigame is in its stroke cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlicingState {
    /// Knife up, waiting for the hold
    Idle,
    /// Knife travelling down to the board
    Slicing,
    /// Knife travelling back up
    Resetting,
    /// Out of sucuk; nothing moves any more
    Finished,
}

/// Scene objects the minigame works with. Any of them may be missing; only
/// the behaviour that depends on a missing one is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlicingRefs {
    pub knife: Option<NodeId>,
    /// The sucuk being cut
    pub source: Option<NodeId>,
    /// Knife rest position
    pub high_anchor: Option<NodeId>,
    /// Knife position when a cut lands
    pub board_anchor: Option<NodeId>,
    /// Bottom of the slice stack
    pub plate: Option<NodeId>,
    pub slice_template: Option<TemplateId>,
}

pub struct SlicingMinigame {
    pub config: SlicingConfig,
    refs: SlicingRefs,
    shake: Option<CameraShake>,
    state: SlicingState,
    cuts: u32,
    slices_spawned: u32,
}

impl SlicingMinigame {
    pub fn new(config: SlicingConfig, refs: SlicingRefs, shake: Option<CameraShake>) -> Self {
        Self {
            config,
            refs,
            shake,
            state: SlicingState::Idle,
            cuts: 0,
            slices_spawned: 0,
        }
    }

    pub fn state(&self) -> SlicingState {
        self.state
    }

    /// Strokes that reached the board
    pub fn cuts(&self) -> u32 {
        self.cuts
    }

    pub fn slices_spawned(&self) -> u32 {
        self.slices_spawned
    }

    pub fn is_finished(&self) -> bool {
        self.state == SlicingState::Finished
    }

    pub fn refs(&self) -> &SlicingRefs {
        &self.refs
    }

    pub fn shake(&self) -> Option<&CameraShake> {
        self.shake.as_ref()
    }

    fn enter(&mut self, state: SlicingState) {
        debug!("Slicing {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Move the knife toward an anchor. Returns `true` once it is there,
    /// snapped exactly onto the anchor.
    fn step_knife(&self, scene: &mut Scene, anchor: Option<NodeId>, max_step: f32) -> bool {
        let (Some(knife), Some(anchor)) = (self.refs.knife, anchor) else {
            return false;
        };
        let Some(target) = scene.position(anchor) else {
            return false;
        };
        let Some(transform) = scene.transform_mut(knife) else {
            return false;
        };

        let position = move_towards(transform.position, target, max_step);
        if reached(position, target, REACH_EPSILON) {
            transform.position = target;
            true
        } else {
            transform.position = position;
            false
        }
    }

    fn cut(&mut self, ctx: &mut FrameContext<'_>) {
        self.cuts += 1;
        debug!("Cut {} of {}", self.cuts, MAX_CUTS);
        ctx.emit(KitchenEvent::Cut { count: self.cuts });

        if self.cuts <= MAX_SLICES {
            self.cut_source(ctx.scene);
            self.spawn_slice(ctx);
            self.trigger_shake(ctx);
            return;
        }

        if let Some(source) = self.refs.source {
            ctx.scene.set_active(source, false);
        }
        ctx.emit(KitchenEvent::SourceRemoved);
        if self.config.shake_on_final_cut {
            self.trigger_shake(ctx);
        }
        self.enter(SlicingState::Finished);
        ctx.emit(KitchenEvent::Finished);
        info!("Slicing finished after {} cuts", self.cuts);
    }

    fn cut_source(&self, scene: &mut Scene) {
        let Some(transform) = self.refs.source.and_then(|id| scene.transform_mut(id)) else {
            return;
        };
        match self.config.source_cut {
            SourceCut::Shrink { axis, width } => {
                let shrink = axis.normalize_or_zero().abs() * width;
                transform.scale = (transform.scale - shrink).max(Vec3::ZERO);
            }
            SourceCut::Advance {
                direction,
                distance,
            } => {
                transform.translate(direction.normalize_or_zero() * distance);
            }
        }
    }

    fn spawn_slice(&mut self, ctx: &mut FrameContext<'_>) {
        let index = self.cuts - 1;
        let Some(template) = self.refs.slice_template else {
            return;
        };
        let Some(source) = self.refs.source.and_then(|id| ctx.scene.transform(id)).copied()
        else {
            return;
        };

        let end_rotation = self.config.fly_rotation.map(|r| r.end_rotation());
        let start_rotation = if end_rotation.is_some() {
            Quat::IDENTITY
        } else {
            source.rotation
        };

        let node = match ctx.scene.instantiate(template, source.position, start_rotation) {
            Ok(node) => node,
            Err(e) => {
                warn!("Could not spawn slice {}: {}", index, e);
                return;
            }
        };
        self.slices_spawned += 1;
        ctx.emit(KitchenEvent::SliceSpawned { node, index });

        let Some(plate) = self.refs.plate.and_then(|id| ctx.scene.position(id)) else {
            return;
        };
        let target = self.config.stack_slot(plate, index);
        ctx.tasks.spawn(FlyToStack::new(
            node,
            source.position,
            start_rotation,
            target,
            self.config.fly_speed,
            end_rotation,
        ));
    }

    fn trigger_shake(&mut self, ctx: &mut FrameContext<'_>) {
        if let Some(shake) = self.shake.as_mut() {
            shake.trigger(ctx);
        }
    }
}

impl Behaviour for SlicingMinigame {
    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        let hold = ctx.input.is_held(InputAction::Slice);

        match self.state {
            SlicingState::Idle => {
                if hold {
                    self.enter(SlicingState::Slicing);
                    ctx.emit(KitchenEvent::SliceStarted);
                }
            }
            SlicingState::Slicing => {
                if !hold {
                    self.enter(SlicingState::Resetting);
                    ctx.emit(KitchenEvent::SliceCancelled);
                    return;
                }
                let step = self.config.slice_speed * ctx.dt;
                if self.step_knife(ctx.scene, self.refs.board_anchor, step) {
                    self.cut(ctx);
                    if self.state != SlicingState::Finished {
                        self.enter(SlicingState::Resetting);
                    }
                }
            }
            SlicingState::Resetting => {
                let step = self.config.reset_speed * ctx.dt;
                if self.step_knife(ctx.scene, self.refs.high_anchor, step) {
                    if self.cuts >= MAX_CUTS {
                        self.enter(SlicingState::Finished);
                    } else if hold {
                        self.enter(SlicingState::Slicing);
                        ctx.emit(KitchenEvent::SliceStarted);
                    } else {
                        self.enter(SlicingState::Idle);
                    }
                }
            }
            SlicingState::Finished => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mutfak_core::Transform;
    use mutfak_scene::{TaskRunner, Template};

    use crate::input::InputState;
    use crate::shake::ShakeConfig;
    use crate::slicing::{FlyRotation, SlicingRevision};

    const DT: f32 = 1.0 / 60.0;
    const HIGH: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    const BOARD: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    const PLATE: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const SOURCE: Vec3 = Vec3::new(0.0, 0.0, 0.2);

    struct Kitchen {
        scene: Scene,
        tasks: TaskRunner,
        minigame: SlicingMinigame,
        knife: NodeId,
        source: NodeId,
        camera: NodeId,
        events: Vec<KitchenEvent>,
    }

    impl Kitchen {
        fn new(config: SlicingConfig) -> Self {
            let mut scene = Scene::new();
            let knife = scene.spawn("knife", Transform::from_position(HIGH));
            let source = scene.spawn("sucuk", Transform::from_position(SOURCE));
            let camera = scene.spawn("camera", Transform::from_position(Vec3::new(0.0, 2.0, 3.0)));
            let refs = SlicingRefs {
                knife: Some(knife),
                source: Some(source),
                high_anchor: Some(scene.spawn("high", Transform::from_position(HIGH))),
                board_anchor: Some(scene.spawn("board", Transform::from_position(BOARD))),
                plate: Some(scene.spawn("plate", Transform::from_position(PLATE))),
                slice_template: Some(scene.register_template(Template::new("slice"))),
            };
            let shake = CameraShake::new(
                ShakeConfig {
                    seed: Some(3),
                    ..Default::default()
                },
                Some(camera),
            );

            Self {
                scene,
                tasks: TaskRunner::new(),
                minigame: SlicingMinigame::new(config, refs, Some(shake)),
                knife,
                source,
                camera,
                events: Vec::new(),
            }
        }

        fn frame(&mut self, hold: bool) -> Vec<KitchenEvent> {
            let mut input = InputState::new();
            if hold {
                input.press(InputAction::Slice);
            }
            let mut events = Vec::new();
            self.minigame.update(&mut FrameContext {
                scene: &mut self.scene,
                tasks: &mut self.tasks,
                input: &input,
                events: &mut events,
                dt: DT,
            });
            self.tasks.step_all(&mut self.scene, DT);
            self.events.extend(events.iter().cloned());
            events
        }

        /// Hold until a stroke lands.
        fn stroke(&mut self) {
            for _ in 0..1000 {
                let events = self.frame(true);
                if events.iter().any(|e| matches!(e, KitchenEvent::Cut { .. })) {
                    return;
                }
            }
            panic!("stroke never reached the board");
        }

        /// Release until the knife is back up.
        fn settle(&mut self) {
            for _ in 0..1000 {
                self.frame(false);
                if self.minigame.state() != SlicingState::Resetting {
                    return;
                }
            }
            panic!("knife never came back up");
        }

        fn knife_position(&self) -> Vec3 {
            self.scene.position(self.knife).unwrap()
        }

        fn count(&self, pred: impl Fn(&KitchenEvent) -> bool) -> usize {
            self.events.iter().filter(|e| pred(e)).count()
        }

        fn slice_nodes(&self) -> Vec<NodeId> {
            self.scene
                .iter()
                .filter(|(_, node)| node.name == "slice")
                .map(|(id, _)| id)
                .collect()
        }
    }

    fn config() -> SlicingConfig {
        SlicingConfig {
            slice_speed: 2.0,
            reset_speed: 4.0,
            fly_speed: 3.0,
            stack_spacing: 0.05,
            ..SlicingRevision::AdvancingRotated.config()
        }
    }

    #[test]
    fn test_hold_starts_slicing() {
        let mut kitchen = Kitchen::new(config());
        kitchen.frame(false);
        assert_eq!(kitchen.minigame.state(), SlicingState::Idle);

        let events = kitchen.frame(true);
        assert_eq!(events, vec![KitchenEvent::SliceStarted]);
        assert_eq!(kitchen.minigame.state(), SlicingState::Slicing);

        kitchen.frame(true);
        assert!(kitchen.knife_position().y < HIGH.y);
    }

    #[test]
    fn test_release_mid_slice_resets_without_cut() {
        let mut kitchen = Kitchen::new(config());
        for _ in 0..10 {
            kitchen.frame(true);
        }
        assert_eq!(kitchen.minigame.state(), SlicingState::Slicing);

        let events = kitchen.frame(false);
        assert_eq!(events, vec![KitchenEvent::SliceCancelled]);
        assert_eq!(kitchen.minigame.state(), SlicingState::Resetting);
        assert_eq!(kitchen.minigame.cuts(), 0);

        kitchen.settle();
        assert_eq!(kitchen.minigame.state(), SlicingState::Idle);
        assert_eq!(kitchen.knife_position(), HIGH);
        assert_eq!(kitchen.minigame.cuts(), 0);
        assert!(kitchen.slice_nodes().is_empty());
    }

    #[test]
    fn test_knife_snaps_onto_board() {
        let mut kitchen = Kitchen::new(config());
        kitchen.stroke();
        assert_eq!(kitchen.knife_position(), BOARD);
        assert_eq!(kitchen.minigame.state(), SlicingState::Resetting);
    }

    #[test]
    fn test_max_slices_strokes() {
        let mut kitchen = Kitchen::new(config());
        for _ in 0..MAX_SLICES {
            kitchen.stroke();
            kitchen.settle();
        }

        assert_eq!(kitchen.minigame.cuts(), MAX_SLICES);
        assert!(matches!(
            kitchen.minigame.state(),
            SlicingState::Resetting | SlicingState::Idle
        ));
        assert_eq!(kitchen.minigame.slices_spawned(), MAX_SLICES);
        assert_eq!(kitchen.slice_nodes().len(), MAX_SLICES as usize);
        assert!(kitchen.scene.is_active(kitchen.source));
        assert_eq!(
            kitchen.count(|e| matches!(e, KitchenEvent::ShakeStarted)),
            MAX_SLICES as usize
        );
    }

    #[test]
    fn test_held_input_chains_strokes() {
        let mut kitchen = Kitchen::new(config());
        kitchen.stroke();

        let mut restarted = false;
        for _ in 0..100 {
            let events = kitchen.frame(true);
            if events.contains(&KitchenEvent::SliceStarted) {
                restarted = true;
                break;
            }
        }
        assert!(restarted);
        assert_eq!(kitchen.knife_position(), HIGH);
        assert_eq!(kitchen.minigame.state(), SlicingState::Slicing);
    }

    #[test]
    fn test_final_cut_removes_source_and_finishes() {
        let mut kitchen = Kitchen::new(config());
        for _ in 0..MAX_CUTS {
            kitchen.stroke();
        }

        assert_eq!(kitchen.minigame.cuts(), MAX_CUTS);
        assert_eq!(kitchen.minigame.state(), SlicingState::Finished);
        assert!(kitchen.minigame.is_finished());
        assert!(!kitchen.scene.is_active(kitchen.source));
        assert!(kitchen.scene.is_alive(kitchen.source));
        assert_eq!(kitchen.minigame.slices_spawned(), MAX_SLICES);
        assert_eq!(kitchen.count(|e| *e == KitchenEvent::SourceRemoved), 1);
        assert_eq!(kitchen.count(|e| *e == KitchenEvent::Finished), 1);
        // No shake on the final cut in this revision
        assert_eq!(
            kitchen.count(|e| matches!(e, KitchenEvent::ShakeStarted)),
            MAX_SLICES as usize
        );

        let knife = kitchen.knife_position();
        for hold in [true, false, true, true, false] {
            for _ in 0..30 {
                assert!(kitchen.frame(hold).is_empty());
            }
        }
        assert_eq!(kitchen.minigame.state(), SlicingState::Finished);
        assert_eq!(kitchen.minigame.cuts(), MAX_CUTS);
        assert_eq!(kitchen.knife_position(), knife);
    }

    #[test]
    fn test_final_cut_shake_is_configurable() {
        let mut kitchen = Kitchen::new(SlicingConfig {
            shake_on_final_cut: true,
            ..config()
        });
        for _ in 0..MAX_CUTS {
            kitchen.stroke();
        }
        assert_eq!(
            kitchen.count(|e| matches!(e, KitchenEvent::ShakeStarted)),
            MAX_CUTS as usize
        );
    }

    #[test]
    fn test_slices_land_on_stack_slots() {
        let config = config();
        let end = config.fly_rotation.unwrap().end_rotation();
        let mut kitchen = Kitchen::new(config.clone());
        for _ in 0..MAX_SLICES {
            kitchen.stroke();
            kitchen.settle();
        }
        for _ in 0..600 {
            kitchen.frame(false);
        }
        assert!(kitchen.tasks.is_empty());

        let spawned: Vec<(NodeId, u32)> = kitchen
            .events
            .iter()
            .filter_map(|e| match e {
                KitchenEvent::SliceSpawned { node, index } => Some((*node, *index)),
                _ => None,
            })
            .collect();
        assert_eq!(spawned.len(), MAX_SLICES as usize);

        for (i, (node, index)) in spawned.into_iter().enumerate() {
            assert_eq!(index, i as u32);
            let transform = kitchen.scene.transform(node).unwrap();
            let expected = PLATE + Vec3::Y * index as f32 * config.stack_spacing;
            assert!((transform.position - expected).length() < REACH_EPSILON);
            assert_eq!(transform.rotation, end);
        }
    }

    #[test]
    fn test_advancing_moves_source_forward() {
        let mut kitchen = Kitchen::new(config());
        kitchen.stroke();
        kitchen.stroke();

        let SourceCut::Advance {
            direction,
            distance,
        } = config().source_cut
        else {
            panic!("expected an advancing revision");
        };
        let expected = SOURCE + direction.normalize() * distance * 2.0;
        let position = kitchen.scene.position(kitchen.source).unwrap();
        assert!((position - expected).length() < 1e-5);
    }

    #[test]
    fn test_shrinking_scales_source_down() {
        let mut kitchen = Kitchen::new(SlicingConfig {
            slice_speed: 2.0,
            reset_speed: 4.0,
            ..SlicingRevision::Shrinking.config()
        });
        let tilt = Quat::from_rotation_y(0.3);
        kitchen.scene.transform_mut(kitchen.source).unwrap().rotation = tilt;
        for _ in 0..3 {
            kitchen.stroke();
        }
        let scale = kitchen.scene.transform(kitchen.source).unwrap().scale;
        assert!((scale.x - (1.0 - 3.0 * 0.15)).abs() < 1e-5);
        assert_eq!(scale.y, 1.0);
        assert_eq!(scale.z, 1.0);

        // Unrotated revision: slices keep the source orientation
        for slice in kitchen.slice_nodes() {
            assert_eq!(kitchen.scene.transform(slice).unwrap().rotation, tilt);
        }
    }

    #[test]
    fn test_zero_vectors_in_config_do_not_corrupt_transforms() {
        let mut kitchen = Kitchen::new(SlicingConfig {
            source_cut: SourceCut::Advance {
                direction: Vec3::ZERO,
                distance: 0.03,
            },
            fly_rotation: Some(FlyRotation {
                axis: Vec3::ZERO,
                degrees: 90.0,
            }),
            ..config()
        });
        for _ in 0..2 {
            kitchen.stroke();
        }
        for _ in 0..300 {
            kitchen.frame(false);
        }

        assert_eq!(kitchen.scene.position(kitchen.source), Some(SOURCE));
        assert_eq!(kitchen.slice_nodes().len(), 2);
        for slice in kitchen.slice_nodes() {
            let transform = kitchen.scene.transform(slice).unwrap();
            assert!(transform.position.is_finite());
            assert_eq!(transform.rotation, Quat::IDENTITY);
        }

        let mut kitchen = Kitchen::new(SlicingConfig {
            source_cut: SourceCut::Shrink {
                axis: Vec3::ZERO,
                width: 0.15,
            },
            ..config()
        });
        kitchen.stroke();
        assert_eq!(kitchen.scene.transform(kitchen.source).unwrap().scale, Vec3::ONE);
    }

    #[test]
    fn test_missing_template_still_counts_cuts() {
        let mut kitchen = Kitchen::new(config());
        kitchen.minigame.refs.slice_template = None;
        for _ in 0..MAX_CUTS {
            kitchen.stroke();
        }
        assert_eq!(kitchen.minigame.state(), SlicingState::Finished);
        assert_eq!(kitchen.minigame.slices_spawned(), 0);
        assert!(kitchen.slice_nodes().is_empty());
    }

    #[test]
    fn test_missing_knife_never_cuts() {
        let mut kitchen = Kitchen::new(config());
        kitchen.minigame.refs.knife = None;
        for _ in 0..300 {
            kitchen.frame(true);
        }
        assert_eq!(kitchen.minigame.state(), SlicingState::Slicing);
        assert_eq!(kitchen.minigame.cuts(), 0);
    }

    #[test]
    fn test_missing_plate_leaves_slice_in_place() {
        let mut kitchen = Kitchen::new(config());
        kitchen.minigame.refs.plate = None;
        kitchen.stroke();
        assert_eq!(kitchen.minigame.slices_spawned(), 1);
        assert!(kitchen.tasks.len() <= 1);
        let slice = kitchen.slice_nodes()[0];
        let source = kitchen.scene.position(kitchen.source).unwrap();
        assert_eq!(kitchen.scene.position(slice), Some(source));
    }

    #[test]
    fn test_shake_returns_camera_to_rest() {
        let mut kitchen = Kitchen::new(config());
        let rest = kitchen.scene.position(kitchen.camera).unwrap();
        kitchen.stroke();
        kitchen.stroke();
        for _ in 0..120 {
            kitchen.frame(false);
        }
        assert_eq!(kitchen.scene.position(kitchen.camera), Some(rest));
        assert!(!kitchen.minigame.shake().unwrap().is_shaking(&kitchen.tasks));
    }
}
