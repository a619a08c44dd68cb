//! Scenery without a rigid body.

use crate::behavior::{EntityBehavior, FrameContext};
use crate::draw::DrawSink;
use crate::entity::Entity;

/// Scenery with no body and no per-frame behaviour.
#[derive(Debug, Clone)]
pub struct StaticEntity {
    entity: Entity,
    scale: f32,
}

impl StaticEntity {
    pub fn new(entity: Entity, scale: f32) -> Self {
        Self { entity, scale }
    }
}

impl EntityBehavior for StaticEntity {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn update(&mut self, _ctx: &mut FrameContext<'_>) {}

    fn draw(&self, sink: &mut dyn DrawSink) {
        if let Some(model) = self.entity.model {
            sink.draw_model(model, self.entity.transform(), self.scale);
        }
    }
}
