//! The per-frame capability every entity implements, and what it may
//! touch while updating.

use drift_input::InputSource;
use drift_physics::{PhysicsWorld, Transform};
use glam::{Quat, Vec3};

use crate::draw::DrawSink;
use crate::entity::Entity;
use crate::model::ModelProvider;
use crate::spawn::{EntityIds, SpawnQueue};

/// What entities may know about the camera during their update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub location: Vec3,
    pub rotation: Quat,
    /// Orbiting the followed entity; ship mouse look is suspended.
    pub vanity: bool,
    pub draw_distance: f32,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            vanity: false,
            draw_distance: 3_000_000.0,
        }
    }
}

/// Everything an entity may touch during one update.
pub struct FrameContext<'a> {
    pub physics: &'a mut PhysicsWorld,
    pub input: &'a dyn InputSource,
    /// New entities go here; they join the live collection after the pass.
    pub spawns: &'a mut SpawnQueue,
    pub ids: &'a mut EntityIds,
    pub models: &'a mut dyn ModelProvider,
    pub camera: CameraView,
    /// Transform of the entity the camera follows, if any.
    pub followed: Option<Transform>,
}

/// Per-kind behaviour of a scene object.
pub trait EntityBehavior {
    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    fn update(&mut self, ctx: &mut FrameContext<'_>);

    fn draw(&self, sink: &mut dyn DrawSink);

    /// Releases physics and model resources. Called once, before the entity
    /// is dropped.
    fn cleanup(&mut self, _physics: &mut PhysicsWorld, models: &mut dyn ModelProvider) {
        if let Some(model) = self.entity_mut().model.take() {
            models.release(model);
        }
    }
}
