use std::collections::HashSet;
use winit::{event::MouseButton, keyboard::KeyCode};

/// Per-frame movement request derived from raw key state
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

pub struct InputState {
    keys_pressed: HashSet<KeyCode>,
    mouse_buttons_pressed: HashSet<MouseButton>,

    // Raw motion accumulated while the look button is held
    mouse_look_delta: (f64, f64),
    mouse_look_button: MouseButton,
}

impl InputState {
    pub fn new() -> InputState {
        Self {
            keys_pressed: HashSet::new(),
            mouse_buttons_pressed: HashSet::new(),
            mouse_look_delta: (0.0, 0.0),
            mouse_look_button: MouseButton::Right,
        }
    }

    pub fn key_pressed(&mut self, code: KeyCode) {
        self.keys_pressed.insert(code);
    }
    pub fn key_released(&mut self, code: &KeyCode) {
        self.keys_pressed.remove(code);
    }
    pub fn is_key_pressed(&self, code: &KeyCode) -> bool {
        self.keys_pressed.contains(code)
    }
    pub fn mouse_button_pressed(&mut self, button: MouseButton) {
        self.mouse_buttons_pressed.insert(button);
    }
    pub fn mouse_button_released(&mut self, button: &MouseButton) {
        self.mouse_buttons_pressed.remove(button);
    }
    pub fn is_mouse_button_pressed(&self, btn: &MouseButton) -> bool {
        self.mouse_buttons_pressed.contains(btn)
    }

    /// Raw device motion. Only counts while the look button is held.
    pub fn mouse_moved(&mut self, delta: (f64, f64)) {
        if self.is_mouse_button_pressed(&self.mouse_look_button) {
            self.mouse_look_delta.0 += delta.0;
            self.mouse_look_delta.1 += delta.1;
        }
    }

    pub fn take_mouse_delta(&mut self) -> (f32, f32) {
        let res = self.mouse_look_delta;
        self.mouse_look_delta = (0.0, 0.0);
        (res.0 as f32, res.1 as f32)
    }

    pub fn movement_intent(&self) -> MovementIntent {
        MovementIntent {
            forward: self.is_key_pressed(&KeyCode::KeyW),
            back: self.is_key_pressed(&KeyCode::KeyS),
            left: self.is_key_pressed(&KeyCode::KeyA),
            right: self.is_key_pressed(&KeyCode::KeyD),
            jump: self.is_key_pressed(&KeyCode::Space),
        }
    }
}

#[cfg(test)]
mod tests {
    use winit::{event::MouseButton, keyboard::KeyCode};

    use super::{InputState, MovementIntent};

    #[test]
    fn keys_map_to_intent() {
        let mut input = InputState::new();
        input.key_pressed(KeyCode::KeyW);
        input.key_pressed(KeyCode::Space);
        input.key_pressed(KeyCode::KeyD);
        input.key_released(&KeyCode::KeyD);
        assert_eq!(
            input.movement_intent(),
            MovementIntent {
                forward: true,
                jump: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn mouse_delta_only_while_look_button_held() {
        let mut input = InputState::new();
        input.mouse_moved((5.0, 5.0));
        assert_eq!(input.take_mouse_delta(), (0.0, 0.0));

        input.mouse_button_pressed(MouseButton::Right);
        input.mouse_moved((3.0, -1.0));
        input.mouse_moved((2.0, 4.0));
        assert_eq!(input.take_mouse_delta(), (5.0, 3.0));
        // Consumed
        assert_eq!(input.take_mouse_delta(), (0.0, 0.0));

        input.mouse_button_released(&MouseButton::Right);
        input.mouse_moved((1.0, 1.0));
        assert_eq!(input.take_mouse_delta(), (0.0, 0.0));
    }
}
