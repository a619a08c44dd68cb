//! Control bindings and the per-frame resolver that turns tracker state into
//! a [`FrameInput`].

use std::collections::BTreeMap;

use drift_config::InputConfig;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::binding::{Binding, Control, MouseButtonBinding};
use crate::error::InputError;
use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;
use crate::source::FrameInput;

/// Which bindings drive which [`Control`], plus pointer tuning.
///
/// A control with several bindings is active when any of them is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlMap {
    pub bindings: BTreeMap<Control, Vec<Binding>>,
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
}

impl Default for ControlMap {
    fn default() -> Self {
        use Binding::{Key, Mouse};

        let bindings = BTreeMap::from([
            (Control::Forward, vec![Key(KeyCode::KeyW)]),
            (Control::Backward, vec![Key(KeyCode::KeyS)]),
            (Control::Left, vec![Key(KeyCode::KeyA)]),
            (Control::Right, vec![Key(KeyCode::KeyD)]),
            (Control::Ascend, vec![Key(KeyCode::Space)]),
            (Control::Descend, vec![Key(KeyCode::ControlLeft)]),
            (Control::RollLeft, vec![Key(KeyCode::KeyQ)]),
            (Control::RollRight, vec![Key(KeyCode::KeyE)]),
            (Control::CameraMode, vec![Key(KeyCode::KeyC)]),
            (Control::Fire, vec![Mouse(MouseButtonBinding::Left)]),
            (Control::Grab, vec![Mouse(MouseButtonBinding::Left)]),
            (Control::PhysicsDebug, vec![Key(KeyCode::F3)]),
        ]);

        Self {
            bindings,
            mouse_sensitivity: 1.0,
            invert_y: false,
        }
    }
}

impl ControlMap {
    /// Default layout with the overrides and pointer settings from `config`.
    ///
    /// # Errors
    /// Fails on an unknown control name or binding name; nothing is applied
    /// in that case.
    pub fn from_config(config: &InputConfig) -> Result<Self, InputError> {
        let mut map = Self {
            mouse_sensitivity: config.mouse_sensitivity,
            invert_y: config.invert_y,
            ..Self::default()
        };

        let mut overrides = Vec::with_capacity(config.keybindings.len());
        for (control_name, binding_name) in &config.keybindings {
            let control = Control::from_name(control_name)
                .ok_or_else(|| InputError::UnknownControl(control_name.clone()))?;
            let binding =
                Binding::parse(binding_name).ok_or_else(|| InputError::UnknownBinding {
                    control: control_name.clone(),
                    binding: binding_name.clone(),
                })?;
            overrides.push((control, binding));
        }

        for (control, binding) in overrides {
            tracing::debug!(control = control.name(), %binding, "rebinding control");
            map.bindings.insert(control, vec![binding]);
        }
        Ok(map)
    }

    /// Bindings for `control`; empty when unbound.
    #[must_use]
    pub fn bindings_for(&self, control: Control) -> &[Binding] {
        self.bindings.get(&control).map_or(&[], Vec::as_slice)
    }

    /// Resolves tracker state into this frame's [`FrameInput`].
    #[must_use]
    pub fn snapshot(
        &self,
        keyboard: &KeyboardState,
        mouse: &MouseState,
        console_open: bool,
    ) -> FrameInput {
        let mut frame = FrameInput::new().with_console(console_open);

        for (&control, bindings) in &self.bindings {
            for binding in bindings {
                let (held, pressed) = match *binding {
                    Binding::Key(code) => (keyboard.is_held(code), keyboard.went_down(code)),
                    Binding::Mouse(button) => (
                        mouse.is_held(button.to_winit()),
                        mouse.went_down(button.to_winit()),
                    ),
                };
                if held {
                    frame.held.insert(control);
                }
                if pressed {
                    frame.pressed.insert(control);
                }
            }
        }

        let mut pointer = mouse.delta() * self.mouse_sensitivity;
        if self.invert_y {
            pointer.y = -pointer.y;
        }
        frame.pointer = pointer;
        frame.scroll = mouse.scroll();
        frame
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_ron(&self) -> Result<String, InputError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// # Errors
    /// Returns an error if the RON string is malformed.
    pub fn from_ron(s: &str) -> Result<Self, InputError> {
        Ok(ron::from_str(s)?)
    }
}
