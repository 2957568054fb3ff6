//! # Input Manager
//!
//! Collects window and device input between frames and turns it into a
//! [`ProcessedInputState`] once per frame. Only the keys and buttons the
//! camera controller reads are tracked.

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{MouseInput, ProcessedInputState, RawInputState};

const KEY_CODES: [KeyCode; 6] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::Space,
    KeyCode::ShiftLeft,
];

const MOUSE_BUTTONS: [MouseButton; 1] = [MouseButton::Left];

/// Manages the state of all input devices and processes input events.
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,
    /// Current state of mouse inputs
    pub mouse_inputs: MouseInput,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a new InputManager with every tracked key and button released.
    pub fn new() -> Self {
        let released = |count: usize| vec![false; count];
        let keyboard_inputs_old: HashMap<_, _> =
            KEY_CODES.into_iter().zip(released(KEY_CODES.len())).collect();
        let mouse_button_inputs_old: HashMap<_, _> = MOUSE_BUTTONS
            .into_iter()
            .zip(released(MOUSE_BUTTONS.len()))
            .collect();

        Self {
            keyboard_inputs_new: keyboard_inputs_old.clone(),
            keyboard_inputs_old,
            mouse_inputs: MouseInput {
                mouse_button_inputs_new: mouse_button_inputs_old.clone(),
                mouse_button_inputs_old,
                mouse_delta: None,
            },
        }
    }

    /// Processes a window event and updates internal input state.
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => self.set_key(*key, *state == ElementState::Pressed),
            WindowEvent::MouseInput { button, state, .. } => {
                self.set_mouse_button(*button, *state == ElementState::Pressed)
            }
            _ => {}
        }
    }

    /// Records a key as pressed or released. Untracked keys are ignored.
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            *key_state = pressed;
        }
    }

    /// Records a mouse button as pressed or released. Untracked buttons are ignored.
    pub fn set_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if let Some(button_state) = self.mouse_inputs.mouse_button_inputs_new.get_mut(&button) {
            *button_state = pressed;
        }
    }

    /// Adds raw mouse motion to this frame's delta.
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (x, y) = self.mouse_inputs.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_inputs.mouse_delta = Some((x + delta.0, y + delta.1));
    }

    /// Builds the processed input state from the previous and current raw states.
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                (*key, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        let mouse_button_states = self
            .mouse_inputs
            .mouse_button_inputs_new
            .iter()
            .map(|(button, &new_state)| {
                let old_state = self
                    .mouse_inputs
                    .mouse_button_inputs_old
                    .get(button)
                    .copied()
                    .unwrap_or(false);
                (*button, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: self.mouse_inputs.mouse_delta,
        }
    }

    /// Returns this frame's processed input and starts the next frame.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.advance_frame();
        processed_input
    }

    /// Releases every key and button, for when the window loses focus.
    pub fn reset_inputs(&mut self) {
        self.keyboard_inputs_new.values_mut().for_each(|s| *s = false);
        self.mouse_inputs
            .mouse_button_inputs_new
            .values_mut()
            .for_each(|s| *s = false);
        self.mouse_inputs.mouse_delta = None;
    }

    fn advance_frame(&mut self) {
        self.keyboard_inputs_old.clone_from(&self.keyboard_inputs_new);
        self.mouse_inputs
            .mouse_button_inputs_old
            .clone_from(&self.mouse_inputs.mouse_button_inputs_new);
        self.mouse_inputs.mouse_delta = None;
    }
}
