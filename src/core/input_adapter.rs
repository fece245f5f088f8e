use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::Button;
use super::input_queue::InputEvent;

/// Scroll lines per physical pixel for touchpads reporting pixel deltas
const PIXEL_SCROLL_SCALE: f32 = 0.01;

/// Adapter that bridges Winit events to platform-agnostic input events
#[derive(Debug, Clone, Copy, Default)]
pub struct WinitController;

impl WinitController {
    pub fn new() -> Self {
        Self
    }

    /// Translate a Winit WindowEvent, or None if the viewer ignores it
    pub fn translate(&self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(keycode) = event.physical_key else {
                    return None;
                };
                Self::keycode_to_button(keycode).map(|button| InputEvent::Key {
                    button,
                    pressed: event.state == ElementState::Pressed,
                })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                Self::mouse_button_to_button(*button).map(|button| InputEvent::MouseButton {
                    button,
                    pressed: *state == ElementState::Pressed,
                })
            }
            WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Scroll {
                delta: Self::scroll_amount(*delta),
            }),
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::CursorMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),
            WindowEvent::CursorEntered { .. } => Some(InputEvent::CursorEntered),
            WindowEvent::Focused(focused) => Some(InputEvent::Focus { focused: *focused }),
            _ => None,
        }
    }

    /// Vertical scroll in wheel lines
    pub fn scroll_amount(delta: MouseScrollDelta) -> f32 {
        match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * PIXEL_SCROLL_SCALE,
        }
    }

    /// Map Winit KeyCode to Button
    pub fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::AltLeft => Some(Button::AltLeft),
            KeyCode::KeyF => Some(Button::KeyF),
            KeyCode::KeyP => Some(Button::KeyP),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    /// Map Winit MouseButton to Button
    pub fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Middle => Some(Button::MouseMiddle),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}
