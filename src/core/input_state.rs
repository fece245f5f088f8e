use std::collections::HashSet;

use glam::Vec2;

use super::controller::{Button, Controller};
use super::input_queue::InputEvent;

/// Held buttons and cursor tracking, fed by drained input events
#[derive(Debug, Clone)]
pub struct InputState {
    held: HashSet<Button>,
    held_vec: Vec<Button>,
    /// Buttons that went down since the last `end_frame`
    pressed_this_frame: Vec<Button>,
    last_cursor: Vec2,
    first_move: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            held_vec: Vec::new(),
            pressed_this_frame: Vec::new(),
            last_cursor: Vec2::ZERO,
            first_move: true,
        }
    }

    /// Apply one event. Cursor moves return the delta they produced, with y
    /// flipped so that moving the mouse up is positive.
    pub fn apply(&mut self, event: &InputEvent) -> Option<Vec2> {
        match *event {
            InputEvent::Key { button, pressed } | InputEvent::MouseButton { button, pressed } => {
                self.set_button(button, pressed);
                None
            }
            InputEvent::CursorMoved { x, y } => Some(self.move_cursor(Vec2::new(x, y))),
            InputEvent::Scroll { .. } => None,
            InputEvent::CursorEntered => {
                self.first_move = true;
                None
            }
            InputEvent::Focus { focused } => {
                if !focused {
                    self.release_all();
                }
                self.first_move = true;
                None
            }
        }
    }

    /// Forget every held button; releases that happen while unfocused are
    /// never delivered
    fn release_all(&mut self) {
        self.held.clear();
        self.held_vec.clear();
        self.pressed_this_frame.clear();
    }

    fn set_button(&mut self, button: Button, pressed: bool) {
        if pressed {
            if self.held.insert(button) {
                self.held_vec.push(button);
                self.pressed_this_frame.push(button);
            }
        } else if self.held.remove(&button) {
            self.held_vec.retain(|&b| b != button);
        }
    }

    fn move_cursor(&mut self, position: Vec2) -> Vec2 {
        if self.first_move {
            self.last_cursor = position;
            self.first_move = false;
        }

        let delta = Vec2::new(position.x - self.last_cursor.x, self.last_cursor.y - position.y);
        self.last_cursor = position;
        delta
    }

    /// Whether `button` went down since the last `end_frame`
    pub fn was_pressed(&self, button: Button) -> bool {
        self.pressed_this_frame.contains(&button)
    }

    /// Clear per-frame press edges
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
    }

    pub fn last_cursor(&self) -> Vec2 {
        self.last_cursor
    }

    pub fn is_first_move(&self) -> bool {
        self.first_move
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for InputState {
    fn is_down(&self, button: Button) -> bool {
        self.held.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.held_vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    #[test]
    fn first_cursor_event_has_zero_delta() {
        let mut state = InputState::new();
        let delta = state.apply(&cursor(320.0, 240.0));

        assert_eq!(delta, Some(Vec2::ZERO));
        assert!(!state.is_first_move());
        assert_eq!(state.last_cursor(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn cursor_delta_flips_y() {
        let mut state = InputState::new();
        state.apply(&cursor(100.0, 100.0));
        let delta = state.apply(&cursor(110.0, 90.0));

        assert_eq!(delta, Some(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn cursor_entered_rearms_first_move() {
        let mut state = InputState::new();
        state.apply(&cursor(10.0, 10.0));
        state.apply(&InputEvent::CursorEntered);
        assert!(state.is_first_move());

        assert_eq!(state.apply(&cursor(610.0, 10.0)), Some(Vec2::ZERO));
        assert_eq!(state.last_cursor(), Vec2::new(610.0, 10.0));
    }

    #[test]
    fn focus_loss_releases_held_buttons() {
        let mut state = InputState::new();
        state.apply(&InputEvent::Key { button: Button::AltLeft, pressed: true });
        state.apply(&InputEvent::MouseButton { button: Button::MouseLeft, pressed: true });

        state.apply(&InputEvent::Focus { focused: false });
        assert!(!state.is_down(Button::AltLeft));
        assert!(state.get_down_keys().is_empty());
        assert!(!state.was_pressed(Button::MouseLeft));
        assert!(state.is_first_move());
    }

    #[test]
    fn held_buttons_track_press_and_release() {
        let mut state = InputState::new();
        state.apply(&InputEvent::Key { button: Button::AltLeft, pressed: true });
        state.apply(&InputEvent::MouseButton { button: Button::MouseLeft, pressed: true });
        assert!(state.is_down(Button::AltLeft));
        assert!(state.is_down(Button::MouseLeft));
        assert_eq!(state.get_down_keys(), &[Button::AltLeft, Button::MouseLeft]);

        state.apply(&InputEvent::Key { button: Button::AltLeft, pressed: false });
        assert!(!state.is_down(Button::AltLeft));
        assert_eq!(state.get_down_keys(), &[Button::MouseLeft]);
    }

    #[test]
    fn key_repeat_is_one_press() {
        let mut state = InputState::new();
        state.apply(&InputEvent::Key { button: Button::KeyP, pressed: true });
        state.apply(&InputEvent::Key { button: Button::KeyP, pressed: true });
        assert!(state.was_pressed(Button::KeyP));
        assert_eq!(state.get_down_keys().len(), 1);

        state.end_frame();
        assert!(!state.was_pressed(Button::KeyP));
        assert!(state.is_down(Button::KeyP));
    }
}
