/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Camera modifier, held together with a mouse button
    AltLeft,
    /// Reset camera to its startup state
    KeyF,
    /// Toggle perspective / orthographic projection
    KeyP,
    Escape,
    MouseLeft,
    MouseMiddle,
    MouseRight,
}

impl Button {
    pub const fn is_mouse(self) -> bool {
        matches!(self, Button::MouseLeft | Button::MouseMiddle | Button::MouseRight)
    }
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_button_hash() {
        let mut set = HashSet::new();
        set.insert(Button::AltLeft);
        set.insert(Button::MouseLeft);
        set.insert(Button::AltLeft);

        assert!(set.contains(&Button::AltLeft));
        assert!(!set.contains(&Button::MouseMiddle));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_mouse_buttons_flagged() {
        assert!(Button::MouseLeft.is_mouse());
        assert!(Button::MouseMiddle.is_mouse());
        assert!(Button::MouseRight.is_mouse());
        assert!(!Button::AltLeft.is_mouse());
        assert!(!Button::KeyF.is_mouse());
    }

    struct MockController {
        pressed: Vec<Button>,
    }

    impl Controller for MockController {
        fn is_down(&self, button: Button) -> bool {
            self.pressed.contains(&button)
        }

        fn get_down_keys(&self) -> &[Button] {
            &self.pressed
        }
    }

    #[test]
    fn test_controller_is_down() {
        let controller = MockController {
            pressed: vec![Button::AltLeft, Button::MouseMiddle],
        };

        assert!(controller.is_down(Button::AltLeft));
        assert!(controller.is_down(Button::MouseMiddle));
        assert!(!controller.is_down(Button::MouseLeft));
        assert_eq!(controller.get_down_keys().len(), 2);
    }
}
