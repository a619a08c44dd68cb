//! The simulation core: one world, one frame at a time.
//!
//! [`SimWorld`] owns the physics world, the camera and every live entity and
//! runs the frame phases in a fixed order. [`FrameLoop`] drives it from a
//! clock and keeps frame statistics.

pub mod builder;
pub mod frame_loop;
pub mod scene_entity;
pub mod world;

pub use frame_loop::{FrameLoop, MAX_FRAME_TIME};
pub use scene_entity::SceneEntity;
pub use world::{FrameReport, SceneReport, SimWorld, WorldClocks};
