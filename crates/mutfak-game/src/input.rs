//! Input system with action-based mapping
//!
//! Raw keyboard and mouse events are mapped to kitchen actions. Behaviours
//! only ever look at actions: turning is edge-triggered (`just_pressed`),
//! slicing is level-triggered (`held`).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Actions the kitchen behaviours respond to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Turn the camera left (Q by default)
    TurnLeft,
    /// Turn the camera right (E by default)
    TurnRight,
    /// Hold to push the knife down (left mouse button by default)
    Slice,
    /// Freeze or unfreeze frame time (Escape by default)
    Pause,
}

/// Current state of all actions for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that went down this frame
    pub just_pressed: HashSet<InputAction>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Mark an action as pressed. Only the first press of a hold fires
    /// `just_pressed`.
    pub fn press(&mut self, action: InputAction) {
        if self.held.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub fn release(&mut self, action: InputAction) {
        self.held.remove(&action);
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
    }
}

/// A physical key or mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    Key(KeyCode),
    /// 0 = left, 1 = right, 2 = middle
    Mouse(u32),
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

/// Maps physical inputs to actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<InputBinding, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        bindings.bind(KeyCode::KeyQ, InputAction::TurnLeft);
        bindings.bind(KeyCode::KeyE, InputAction::TurnRight);
        bindings.bind(KeyCode::ArrowLeft, InputAction::TurnLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::TurnRight);

        bindings.bind_mouse(0, InputAction::Slice);
        bindings.bind(KeyCode::Space, InputAction::Slice);

        bindings.bind(KeyCode::Escape, InputAction::Pause);

        bindings
    }
}

impl InputBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(InputBinding::Key(key), action);
    }

    pub fn bind_mouse(&mut self, button: u32, action: InputAction) {
        self.bindings.insert(InputBinding::Mouse(button), action);
    }

    pub fn get_action(&self, binding: &InputBinding) -> Option<InputAction> {
        self.bindings.get(binding).copied()
    }

    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.get_action(&InputBinding::Key(key))
    }
}

/// Turns raw window events into [`InputState`]
#[derive(Debug, Default)]
pub struct InputHandler {
    pub state: InputState,
    pub bindings: InputBindings,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        if let PhysicalKey::Code(key_code) = physical_key {
            if let Some(action) = self.bindings.get_key_action(key_code) {
                self.apply(action, element_state);
            }
        }
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let button_id = match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(id) => id as u32,
        };

        if let Some(action) = self.bindings.get_action(&InputBinding::Mouse(button_id)) {
            self.apply(action, state);
        }
    }

    fn apply(&mut self, action: InputAction, element_state: ElementState) {
        match element_state {
            ElementState::Pressed => self.state.press(action),
            ElementState::Released => self.state.release(action),
        }
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.state.clear_frame();
    }
}
