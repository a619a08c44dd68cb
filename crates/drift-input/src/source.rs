//! What the simulation reads from input each frame.

use glam::Vec2;
use rustc_hash::FxHashSet;

use crate::binding::Control;

/// Per-frame view of the player's input.
///
/// `just_pressed` distinguishes the frame a control went down from frames it
/// is merely held, for controls that must not repeat while held.
pub trait InputSource {
    /// Whether `control` is currently held.
    fn is_active(&self, control: Control) -> bool;
    /// Whether `control` went down this frame.
    fn just_pressed(&self, control: Control) -> bool;
    /// Pointer motion since the previous frame, in pixels.
    fn pointer_delta(&self) -> Vec2;
    /// Wheel lines scrolled this frame; positive is away from the user.
    fn scroll_delta(&self) -> f32;
    /// Whether a text console currently owns the keyboard and wheel.
    fn console_open(&self) -> bool;
}

/// Plain snapshot implementing [`InputSource`].
///
/// Built from winit state by [`ControlMap::snapshot`](crate::ControlMap::snapshot),
/// or directly with the builder methods for scripted flights and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub held: FxHashSet<Control>,
    pub pressed: FxHashSet<Control>,
    pub pointer: Vec2,
    pub scroll: f32,
    pub console: bool,
}

impl FrameInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `control` as held.
    #[must_use]
    pub fn hold(mut self, control: Control) -> Self {
        self.held.insert(control);
        self
    }

    /// Marks `control` as held and pressed this frame.
    #[must_use]
    pub fn press(mut self, control: Control) -> Self {
        self.held.insert(control);
        self.pressed.insert(control);
        self
    }

    #[must_use]
    pub fn with_pointer(mut self, dx: f32, dy: f32) -> Self {
        self.pointer = Vec2::new(dx, dy);
        self
    }

    #[must_use]
    pub fn with_scroll(mut self, lines: f32) -> Self {
        self.scroll = lines;
        self
    }

    #[must_use]
    pub fn with_console(mut self, open: bool) -> Self {
        self.console = open;
        self
    }
}

impl InputSource for FrameInput {
    fn is_active(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    fn just_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }

    fn pointer_delta(&self) -> Vec2 {
        self.pointer
    }

    fn scroll_delta(&self) -> f32 {
        self.scroll
    }

    fn console_open(&self) -> bool {
        self.console
    }
}
