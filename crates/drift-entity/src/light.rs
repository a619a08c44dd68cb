//! Light sources, drawn as glowing bodies when they have a model.

use glam::Vec3;

use crate::behavior::{EntityBehavior, FrameContext};
use crate::draw::DrawSink;
use crate::entity::Entity;

/// Number of fixed-function light slots.
pub const LIGHT_SLOTS: u8 = 8;

/// Point light, optionally drawn as a glowing body (a sun).
#[derive(Debug, Clone)]
pub struct Light {
    entity: Entity,
    pub index: u8,
    pub size: f32,
    pub color: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
}

impl Light {
    /// A light in slot `index`. Out-of-range slots fall back to slot 0.
    pub fn new(entity: Entity, index: u8, size: f32) -> Self {
        let index = if index < LIGHT_SLOTS {
            index
        } else {
            tracing::warn!(index, "light slot out of range, using slot 0");
            0
        };
        Self {
            entity,
            index,
            size,
            color: [1.0; 3],
            ambient: [0.0; 3],
            diffuse: [1.0; 3],
        }
    }

    pub fn with_colors(mut self, color: [f32; 3], ambient: [f32; 3], diffuse: [f32; 3]) -> Self {
        self.color = color;
        self.ambient = ambient;
        self.diffuse = diffuse;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.entity.location
    }
}

impl EntityBehavior for Light {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn update(&mut self, _ctx: &mut FrameContext<'_>) {}

    fn draw(&self, sink: &mut dyn DrawSink) {
        sink.set_light(self.index, self.entity.location, self.ambient, self.diffuse);
        if let Some(model) = self.entity.model {
            sink.draw_model(model, self.entity.transform(), self.size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCall, DrawLog};

    #[test]
    fn test_out_of_range_slot_falls_back() {
        assert_eq!(Light::new(Entity::new("sun"), 9, 1.0).index, 0);
        assert_eq!(Light::new(Entity::new("sun"), 7, 1.0).index, 7);
    }

    #[test]
    fn test_draw_positions_light() {
        let mut entity = Entity::new("sun");
        entity.location = Vec3::new(0.0, 500.0, 0.0);
        let light = Light::new(entity, 2, 50.0);
        let mut log = DrawLog::default();
        light.draw(&mut log);
        assert_eq!(
            log.calls,
            vec![DrawCall::Light {
                index: 2,
                position: Vec3::new(0.0, 500.0, 0.0)
            }]
        );
    }
}
