//! Input for the flight sandbox: winit keyboard/mouse trackers, rebindable
//! controls, and the per-frame [`InputSource`] the simulation reads.
//! [`InputReplay`] drives the same trackers from scripted intents.

pub mod binding;
pub mod control_map;
pub mod edge;
pub mod error;
pub mod keyboard;
pub mod mouse;
pub mod replay;
pub mod source;

pub use binding::{Binding, Control, MouseButtonBinding};
pub use control_map::ControlMap;
pub use edge::EdgeTrigger;
pub use error::InputError;
pub use keyboard::KeyboardState;
pub use mouse::MouseState;
pub use replay::InputReplay;
pub use source::{FrameInput, InputSource};
