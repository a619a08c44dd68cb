//! Entity model for the flight sandbox.
//!
//! Every object in a scene carries an [`Entity`] (tag, location, orientation,
//! model) and implements [`EntityBehavior`]. Entities never own their rigid
//! bodies; they hold handles into the [`PhysicsWorld`](drift_physics::PhysicsWorld)
//! and read or write through it.

pub mod behavior;
pub mod draw;
pub mod dynamic;
pub mod entity;
pub mod light;
pub mod model;
pub mod spawn;
pub mod static_entity;

pub use behavior::{CameraView, EntityBehavior, FrameContext};
pub use draw::{DrawCall, DrawLog, DrawSink};
pub use drift_physics::{EntityId, Transform};
pub use dynamic::DynamicEntity;
pub use entity::Entity;
pub use light::Light;
pub use model::{ModelHandle, ModelProvider, ModelRegistry};
pub use spawn::{EntityIds, SpawnQueue};
pub use static_entity::StaticEntity;
