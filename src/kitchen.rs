//! Kitchen scene assembly and the scripted headless session

use anyhow::{bail, Context, Result};
use glam::{EulerRot, Quat, Vec3};
use mutfak_core::Transform;
use mutfak_game::{
    CameraShake, InputHandler, KitchenEvent, SlicingMinigame, SlicingRefs, Stage,
    YawController,
};
use mutfak_scene::{NodeId, Scene, Template};
use tracing::{debug, info};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::settings::{KitchenSettings, SessionSettings, Turn};

const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.6, 1.2);
const CAMERA_PITCH_DEGREES: f32 = -35.0;
const KNIFE_HIGH: Vec3 = Vec3::new(0.0, 0.6, 0.0);
const KNIFE_BOARD: Vec3 = Vec3::new(0.0, 0.06, 0.0);
const SUCUK_POSITION: Vec3 = Vec3::new(-0.1, 0.04, 0.0);
const PLATE_POSITION: Vec3 = Vec3::new(0.45, 0.02, 0.1);
const SLICE_SCALE: Vec3 = Vec3::new(0.01, 0.05, 0.05);

/// Frames to let the camera settle after each scripted turn
const TURN_SETTLE_FRAMES: u32 = 30;
/// Frames allowed for slices and shakes to finish after the last cut
const WIND_DOWN_FRAMES: u32 = 600;

/// Outcome of a finished session
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub frames: u64,
    pub seconds: f64,
    pub cuts: u32,
    pub slices_on_plate: usize,
    pub camera_yaw: f32,
}

/// The assembled kitchen: a stage with the camera and slicing behaviours
pub struct Kitchen {
    stage: Stage,
    input: InputHandler,
    camera: NodeId,
    frame_delta: f32,
}

impl Kitchen {
    pub fn build(settings: &KitchenSettings) -> Result<Self> {
        settings.validate().context("Invalid settings")?;

        let mut scene = Scene::new();

        let camera_rotation =
            Quat::from_euler(EulerRot::YXZ, 0.0, CAMERA_PITCH_DEGREES.to_radians(), 0.0);
        let camera = scene.spawn(
            "camera",
            Transform::from_position_rotation(CAMERA_POSITION, camera_rotation),
        );

        let refs = SlicingRefs {
            knife: Some(scene.spawn("knife", Transform::from_position(KNIFE_HIGH))),
            source: Some(scene.spawn(
                "sucuk",
                Transform::from_position(SUCUK_POSITION).with_scale(Vec3::new(1.0, 0.08, 0.08)),
            )),
            high_anchor: Some(scene.spawn("knife_high", Transform::from_position(KNIFE_HIGH))),
            board_anchor: Some(scene.spawn("knife_board", Transform::from_position(KNIFE_BOARD))),
            plate: Some(scene.spawn("plate", Transform::from_position(PLATE_POSITION))),
            slice_template: Some(
                scene.register_template(Template::new("sucuk_slice").with_scale(SLICE_SCALE)),
            ),
        };

        let camera_controller = YawController::new(settings.camera.clone(), Some(camera), &scene);
        let shake = CameraShake::new(settings.shake.clone(), Some(camera));
        let minigame = SlicingMinigame::new(settings.slicing.clone(), refs, Some(shake));

        let mut stage = Stage::new(settings.time.clone(), scene);
        stage.add_behaviour(camera_controller);
        stage.add_behaviour(minigame);
        debug!(
            "Kitchen built with {} nodes and {} behaviours",
            stage.scene.node_count(),
            stage.behaviour_count()
        );

        Ok(Self {
            stage,
            input: InputHandler::new(),
            camera,
            frame_delta: settings.session.frame_delta(),
        })
    }

    /// Advance one frame and return what happened in it.
    fn step(&mut self) -> Vec<KitchenEvent> {
        self.stage.frame(&self.input.state, self.frame_delta);
        self.input.end_frame();
        let events = self.stage.drain_events();
        for event in &events {
            log_event(event);
        }
        events
    }

    fn turn(&mut self, turn: Turn) {
        let key = match turn {
            Turn::Left => KeyCode::KeyQ,
            Turn::Right => KeyCode::KeyE,
        };
        self.input
            .handle_keyboard(PhysicalKey::Code(key), ElementState::Pressed);
        self.step();
        self.input
            .handle_keyboard(PhysicalKey::Code(key), ElementState::Released);
        for _ in 0..TURN_SETTLE_FRAMES {
            self.step();
        }
    }

    fn set_slice_held(&mut self, held: bool) {
        let state = if held {
            ElementState::Pressed
        } else {
            ElementState::Released
        };
        self.input.handle_mouse_button(MouseButton::Left, state);
    }

    /// Play the scripted session until the minigame finishes.
    pub fn run(&mut self, session: &SessionSettings) -> Result<SessionSummary> {
        for turn in &session.turns {
            self.turn(*turn);
        }

        let mut cuts = 0;
        let mut finished = false;
        self.set_slice_held(true);

        while !finished {
            if self.stage.time.frame_count >= session.max_frames as u64 {
                bail!(
                    "Slicing did not finish within {} frames ({} cuts)",
                    session.max_frames,
                    cuts
                );
            }

            let events = self.step();
            for event in &events {
                match event {
                    KitchenEvent::Cut { count } => cuts = *count,
                    KitchenEvent::Finished => finished = true,
                    _ => {}
                }
            }

            let landed = events
                .iter()
                .any(|e| matches!(e, KitchenEvent::Cut { .. }));
            if landed && !finished {
                self.set_slice_held(false);
                for _ in 0..session.release_frames {
                    self.step();
                }
                self.set_slice_held(true);
            }
        }
        self.set_slice_held(false);

        for _ in 0..WIND_DOWN_FRAMES {
            if self.stage.tasks.is_empty() {
                break;
            }
            self.step();
        }

        let camera_yaw = self
            .stage
            .scene
            .transform(self.camera)
            .map(|t| t.rotation.to_euler(EulerRot::YXZ).0.to_degrees())
            .context("Camera node disappeared")?;
        let slices_on_plate = self
            .stage
            .scene
            .iter()
            .filter(|(_, node)| node.name == "sucuk_slice")
            .count();

        Ok(SessionSummary {
            frames: self.stage.time.frame_count,
            seconds: self.stage.time.total_time,
            cuts,
            slices_on_plate,
            camera_yaw,
        })
    }
}

fn log_event(event: &KitchenEvent) {
    match event {
        KitchenEvent::CameraTurned { target_yaw } => {
            info!("Camera turning to {:.0} degrees", target_yaw)
        }
        KitchenEvent::Cut { count } => info!("Cut {}", count),
        KitchenEvent::SliceSpawned { node, index } => {
            info!("Slice {} ({}) flying to the plate", index, node)
        }
        KitchenEvent::SourceRemoved => info!("Sucuk used up"),
        KitchenEvent::Finished => info!("Slicing finished"),
        other => debug!("{:?}", other),
    }
}
