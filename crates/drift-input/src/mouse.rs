//! Mouse tracker: pointer motion, buttons, and wheel for one frame.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels treated as one wheel line for touchpads reporting pixel deltas.
const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    held: bool,
    went_down: bool,
}

fn slot(button: MouseButton) -> Option<usize> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        _ => None,
    }
}

/// Accumulated pointer motion, wheel lines, and button state.
///
/// Motion comes from raw device deltas so it keeps working while the cursor
/// is grabbed by the window.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    delta: Vec2,
    scroll: f32,
    buttons: [ButtonFrame; 3],
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `DeviceEvent::MouseMotion`.
    pub fn on_motion(&mut self, dx: f64, dy: f64) {
        self.delta += Vec2::new(dx as f32, dy as f32);
    }

    /// `WindowEvent::MouseInput`. Buttons other than left/right/middle are ignored.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(i) = slot(button) else {
            return;
        };
        let b = &mut self.buttons[i];
        match state {
            ElementState::Pressed => {
                b.went_down |= !b.held;
                b.held = true;
            }
            ElementState::Released => b.held = false,
        }
    }

    /// `WindowEvent::MouseWheel`. Positive is away from the user.
    pub fn on_wheel(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
    }

    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    #[must_use]
    pub fn is_held(&self, button: MouseButton) -> bool {
        slot(button).is_some_and(|i| self.buttons[i].held)
    }

    #[must_use]
    pub fn went_down(&self, button: MouseButton) -> bool {
        slot(button).is_some_and(|i| self.buttons[i].went_down)
    }

    /// Clears motion, wheel, and button edges.
    pub fn end_frame(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
        for b in &mut self.buttons {
            b.went_down = false;
        }
    }
}
