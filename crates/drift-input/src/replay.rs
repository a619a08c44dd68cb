//! Replays intended controls through the device trackers.
//!
//! Headless runs describe each frame as the controls a pilot wants. The
//! replay turns that into key and button transitions on the bound devices,
//! then resolves the devices back through the [`ControlMap`], so rebinding
//! and pointer tuning apply exactly as they would for a live keyboard.

use rustc_hash::FxHashMap;
use winit::event::{ElementState, MouseScrollDelta};

use crate::binding::Binding;
use crate::control_map::ControlMap;
use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;
use crate::source::{FrameInput, InputSource};

fn element(down: bool) -> ElementState {
    if down {
        ElementState::Pressed
    } else {
        ElementState::Released
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputReplay {
    map: ControlMap,
    keyboard: KeyboardState,
    mouse: MouseState,
}

impl InputReplay {
    #[must_use]
    pub fn new(map: ControlMap) -> Self {
        Self {
            map,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
        }
    }

    #[must_use]
    pub fn map(&self) -> &ControlMap {
        &self.map
    }

    /// Plays `intent` on the devices and returns what the control map reads
    /// back. A binding shared by several controls is down while any of them
    /// is wanted. Only the first binding of each control is driven.
    pub fn frame(&mut self, intent: &FrameInput) -> FrameInput {
        self.keyboard.end_frame();
        self.mouse.end_frame();

        let mut wanted: FxHashMap<Binding, bool> = FxHashMap::default();
        for (&control, bindings) in &self.map.bindings {
            if let Some(&binding) = bindings.first() {
                *wanted.entry(binding).or_default() |= intent.is_active(control);
            }
        }

        for (binding, down) in wanted {
            match binding {
                Binding::Key(code) => {
                    if self.keyboard.is_held(code) != down {
                        self.keyboard.process_key(code, element(down), false);
                    }
                }
                Binding::Mouse(button) => {
                    let button = button.to_winit();
                    if self.mouse.is_held(button) != down {
                        self.mouse.on_button(button, element(down));
                    }
                }
            }
        }

        let pointer = intent.pointer_delta();
        if pointer != glam::Vec2::ZERO {
            self.mouse
                .on_motion(f64::from(pointer.x), f64::from(pointer.y));
        }
        let scroll = intent.scroll_delta();
        if scroll != 0.0 {
            self.mouse
                .on_wheel(MouseScrollDelta::LineDelta(0.0, scroll));
        }

        self.map
            .snapshot(&self.keyboard, &self.mouse, intent.console_open())
    }
}

#[cfg(test)]
mod tests {
    use drift_config::InputConfig;
    use glam::Vec2;

    use super::*;
    use crate::binding::Control;

    #[test]
    fn test_held_control_goes_down_once() {
        let mut replay = InputReplay::new(ControlMap::default());
        let intent = FrameInput::new().hold(Control::Forward);

        let first = replay.frame(&intent);
        assert!(first.is_active(Control::Forward));
        assert!(first.just_pressed(Control::Forward));

        let second = replay.frame(&intent);
        assert!(second.is_active(Control::Forward));
        assert!(!second.just_pressed(Control::Forward));

        let released = replay.frame(&FrameInput::new());
        assert!(!released.is_active(Control::Forward));
    }

    #[test]
    fn test_press_release_press_fires_twice() {
        let mut replay = InputReplay::new(ControlMap::default());
        let fire = FrameInput::new().press(Control::Fire);
        assert!(replay.frame(&fire).just_pressed(Control::Fire));
        assert!(!replay.frame(&FrameInput::new()).is_active(Control::Fire));
        assert!(replay.frame(&fire).just_pressed(Control::Fire));
    }

    #[test]
    fn test_shared_button_stays_down_for_either_control() {
        // Fire and Grab share the left button by default.
        let mut replay = InputReplay::new(ControlMap::default());
        let frame = replay.frame(&FrameInput::new().hold(Control::Fire));
        assert!(frame.is_active(Control::Fire));
        assert!(frame.is_active(Control::Grab));
    }

    #[test]
    fn test_rebound_control_still_resolves() {
        let mut config = InputConfig::default();
        config
            .keybindings
            .insert("CameraMode".to_string(), "KeyV".to_string());
        let mut replay = InputReplay::new(ControlMap::from_config(&config).unwrap());
        assert_eq!(
            replay.map().bindings_for(Control::CameraMode),
            &[Binding::Key(winit::keyboard::KeyCode::KeyV)]
        );
        let frame = replay.frame(&FrameInput::new().press(Control::CameraMode));
        assert!(frame.just_pressed(Control::CameraMode));
    }

    #[test]
    fn test_pointer_tuning_applies() {
        let config = InputConfig {
            mouse_sensitivity: 2.0,
            invert_y: true,
            ..InputConfig::default()
        };
        let mut replay = InputReplay::new(ControlMap::from_config(&config).unwrap());
        let frame = replay.frame(&FrameInput::new().with_pointer(1.5, 1.0).with_scroll(-1.0));
        assert_eq!(frame.pointer_delta(), Vec2::new(3.0, -2.0));
        assert_eq!(frame.scroll_delta(), -1.0);

        let idle = replay.frame(&FrameInput::new());
        assert_eq!(idle.pointer_delta(), Vec2::ZERO);
        assert_eq!(idle.scroll_delta(), 0.0);
    }

    #[test]
    fn test_console_flag_passes_through() {
        let mut replay = InputReplay::new(ControlMap::default());
        assert!(replay.frame(&FrameInput::new().with_console(true)).console_open());
    }
}
