//! Keyboard tracker fed from winit key events.
//!
//! Keys are tracked by physical [`KeyCode`] so the default flight layout
//! stays put on non-QWERTY keyboards. Keys without a known code are ignored.

use rustc_hash::FxHashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Held keys plus the keys that went down or up since the last [`end_frame`].
///
/// [`end_frame`]: KeyboardState::end_frame
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: FxHashSet<KeyCode>,
    went_down: FxHashSet<KeyCode>,
    went_up: FxHashSet<KeyCode>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a winit key event. OS key repeat is dropped.
    pub fn process_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            self.process_key(code, event.state, event.repeat);
        }
    }

    /// Feeds a key transition without a winit event (tests, scripted input).
    pub fn process_key(&mut self, code: KeyCode, state: ElementState, repeat: bool) {
        if repeat {
            return;
        }
        match state {
            ElementState::Pressed => {
                if self.held.insert(code) {
                    self.went_down.insert(code);
                }
            }
            ElementState::Released => {
                if self.held.remove(&code) {
                    self.went_up.insert(code);
                }
            }
        }
    }

    #[must_use]
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    /// True only during the frame the key went down.
    #[must_use]
    pub fn went_down(&self, code: KeyCode) -> bool {
        self.went_down.contains(&code)
    }

    /// True only during the frame the key went up.
    #[must_use]
    pub fn went_up(&self, code: KeyCode) -> bool {
        self.went_up.contains(&code)
    }

    /// Drops all held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.went_up.extend(self.held.drain());
    }

    /// Clears per-frame transitions. Call once the frame has been simulated.
    pub fn end_frame(&mut self) {
        self.went_down.clear();
        self.went_up.clear();
    }
}
