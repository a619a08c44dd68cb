//! Space backdrop: the wrap-around debris field and the skybox.

pub mod debris;
pub mod skybox;

pub use debris::{DebrisField, Particle};
pub use skybox::{SKYBOX_SCALE, Skybox};
