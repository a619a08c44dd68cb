//! Flight controls and the physical inputs they can be bound to.
//!
//! Bindings are written as plain strings in config files: winit key code names
//! (`"KeyW"`, `"ControlLeft"`, `"F3"`) or `"MouseLeft"` / `"MouseRight"` /
//! `"MouseMiddle"`.

use std::fmt;

use serde::{Deserialize, Serialize};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Discrete intents the simulation reads each frame.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Control {
    Forward,
    Backward,
    Left,
    Right,
    Ascend,
    Descend,
    RollLeft,
    RollRight,
    /// Cycles Follow -> Vanity -> Free.
    CameraMode,
    Fire,
    /// Grabs whatever the camera is looking at.
    Grab,
    /// Toggles physics debug drawing.
    PhysicsDebug,
}

impl Control {
    pub const ALL: [Control; 12] = [
        Control::Forward,
        Control::Backward,
        Control::Left,
        Control::Right,
        Control::Ascend,
        Control::Descend,
        Control::RollLeft,
        Control::RollRight,
        Control::CameraMode,
        Control::Fire,
        Control::Grab,
        Control::PhysicsDebug,
    ];

    /// Name used as the key in config keybinding tables.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Control::Forward => "Forward",
            Control::Backward => "Backward",
            Control::Left => "Left",
            Control::Right => "Right",
            Control::Ascend => "Ascend",
            Control::Descend => "Descend",
            Control::RollLeft => "RollLeft",
            Control::RollRight => "RollRight",
            Control::CameraMode => "CameraMode",
            Control::Fire => "Fire",
            Control::Grab => "Grab",
            Control::PhysicsDebug => "PhysicsDebug",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Control> {
        Control::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Serde-friendly subset of [`MouseButton`].
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum MouseButtonBinding {
    Left,
    Right,
    Middle,
}

impl MouseButtonBinding {
    #[must_use]
    pub fn to_winit(self) -> MouseButton {
        match self {
            Self::Left => MouseButton::Left,
            Self::Right => MouseButton::Right,
            Self::Middle => MouseButton::Middle,
        }
    }
}

/// A physical input a [`Control`] can be bound to.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Binding {
    Key(KeyCode),
    Mouse(MouseButtonBinding),
}

impl Binding {
    /// Parses a binding name such as `"KeyW"` or `"MouseLeft"`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Binding> {
        let mouse = match name {
            "MouseLeft" => Some(MouseButtonBinding::Left),
            "MouseRight" => Some(MouseButtonBinding::Right),
            "MouseMiddle" => Some(MouseButtonBinding::Middle),
            _ => None,
        };
        mouse
            .map(Binding::Mouse)
            .or_else(|| key_from_name(name).map(Binding::Key))
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Key(code) => write!(f, "{code:?}"),
            Binding::Mouse(MouseButtonBinding::Left) => f.write_str("MouseLeft"),
            Binding::Mouse(MouseButtonBinding::Right) => f.write_str("MouseRight"),
            Binding::Mouse(MouseButtonBinding::Middle) => f.write_str("MouseMiddle"),
        }
    }
}

impl TryFrom<String> for Binding {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Binding::parse(&name).ok_or_else(|| format!("unknown binding: {name}"))
    }
}

impl From<Binding> for String {
    fn from(binding: Binding) -> Self {
        binding.to_string()
    }
}

/// Key codes accepted in config files, named as winit's `Debug` output.
fn key_from_name(name: &str) -> Option<KeyCode> {
    const KEYS: &[KeyCode] = &[
        KeyCode::KeyA,
        KeyCode::KeyB,
        KeyCode::KeyC,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyH,
        KeyCode::KeyI,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::KeyM,
        KeyCode::KeyN,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::KeyQ,
        KeyCode::KeyR,
        KeyCode::KeyS,
        KeyCode::KeyT,
        KeyCode::KeyU,
        KeyCode::KeyV,
        KeyCode::KeyW,
        KeyCode::KeyX,
        KeyCode::KeyY,
        KeyCode::KeyZ,
        KeyCode::Digit0,
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
        KeyCode::F1,
        KeyCode::F2,
        KeyCode::F3,
        KeyCode::F4,
        KeyCode::F5,
        KeyCode::F6,
        KeyCode::F7,
        KeyCode::F8,
        KeyCode::F9,
        KeyCode::F10,
        KeyCode::F11,
        KeyCode::F12,
        KeyCode::Space,
        KeyCode::Enter,
        KeyCode::Escape,
        KeyCode::Tab,
        KeyCode::Backquote,
        KeyCode::ShiftLeft,
        KeyCode::ShiftRight,
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
        KeyCode::AltLeft,
        KeyCode::AltRight,
        KeyCode::ArrowUp,
        KeyCode::ArrowDown,
        KeyCode::ArrowLeft,
        KeyCode::ArrowRight,
    ];
    KEYS.iter().copied().find(|code| format!("{code:?}") == name)
}
