//! Skybox backdrop that follows the camera.

use drift_entity::{CameraView, DrawSink, Entity, EntityBehavior, FrameContext, ModelHandle};

/// Fraction of the draw distance the skybox model is scaled to.
pub const SKYBOX_SCALE: f32 = 0.8;

/// Backdrop model that stays centred on the camera.
#[derive(Debug, Clone)]
pub struct Skybox {
    entity: Entity,
    draw_distance: f32,
}

impl Skybox {
    pub fn new(model: Option<ModelHandle>) -> Self {
        let mut entity = Entity::new("skybox");
        entity.model = model;
        Self {
            entity,
            draw_distance: CameraView::default().draw_distance,
        }
    }

    /// Moves to the camera and picks up its draw distance.
    pub fn follow(&mut self, view: &CameraView) {
        self.entity.location = view.location;
        self.draw_distance = view.draw_distance;
    }

    pub fn scale(&self) -> f32 {
        SKYBOX_SCALE * self.draw_distance
    }
}

impl EntityBehavior for Skybox {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.follow(&ctx.camera);
    }

    fn draw(&self, sink: &mut dyn DrawSink) {
        if let Some(model) = self.entity.model {
            sink.draw_model(model, self.entity.transform(), self.scale());
        }
    }
}

#[cfg(test)]
mod tests {
    use drift_entity::{DrawCall, DrawLog};
    use glam::Vec3;

    use super::*;

    #[test]
    fn test_follows_camera_and_scales_with_draw_distance() {
        let mut sky = Skybox::new(Some(ModelHandle(3)));
        let view = CameraView {
            location: Vec3::new(10.0, -4.0, 9_000.0),
            draw_distance: 1_000.0,
            ..CameraView::default()
        };
        sky.follow(&view);

        let mut log = DrawLog::default();
        sky.draw(&mut log);
        match log.calls.as_slice() {
            [DrawCall::Model { model, transform, scale }] => {
                assert_eq!(*model, ModelHandle(3));
                assert_eq!(transform.position, view.location);
                assert_eq!(*scale, 800.0);
            }
            other => panic!("unexpected draw calls: {other:?}"),
        }
    }

    #[test]
    fn test_no_model_draws_nothing() {
        let sky = Skybox::new(None);
        let mut log = DrawLog::default();
        sky.draw(&mut log);
        assert!(log.calls.is_empty());
    }
}
