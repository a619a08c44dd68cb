//! Body-backed entities: saucers, planets, projectiles.

use drift_physics::{BodyDesc, BodyHandle, EntityId, PhysicsWorld};

use crate::behavior::{EntityBehavior, FrameContext};
use crate::draw::DrawSink;
use crate::entity::Entity;
use crate::model::{ModelHandle, ModelProvider};

/// Entity driven by a rigid body.
///
/// The body lives in the [`PhysicsWorld`]; this holds only its handle and
/// copies the body transform into [`Entity`] at the start of every update.
#[derive(Debug)]
pub struct DynamicEntity {
    entity: Entity,
    id: EntityId,
    body: BodyHandle,
    scale: f32,
}

impl DynamicEntity {
    /// Creates the body described by `desc` and an entity bound to it.
    pub fn spawn(
        physics: &mut PhysicsWorld,
        id: EntityId,
        tag: impl Into<String>,
        desc: &BodyDesc,
        model: Option<ModelHandle>,
    ) -> Self {
        let body = physics.add_body(desc, Some(id));
        let entity = Entity::new(tag)
            .with_transform(desc.transform)
            .with_model(model);
        Self {
            entity,
            id,
            body,
            scale: 1.0,
        }
    }

    /// Uniform draw scale, e.g. a planet's radius.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Copies the body transform into the entity. `false` if the body is gone.
    pub fn sync(&mut self, physics: &PhysicsWorld) -> bool {
        match physics.body_transform(self.body) {
            Some(transform) => {
                self.entity.set_transform(transform);
                true
            }
            None => false,
        }
    }
}

impl EntityBehavior for DynamicEntity {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.sync(ctx.physics);
    }

    fn draw(&self, sink: &mut dyn DrawSink) {
        if let Some(model) = self.entity.model {
            sink.draw_model(model, self.entity.transform(), self.scale);
        }
    }

    fn cleanup(&mut self, physics: &mut PhysicsWorld, models: &mut dyn ModelProvider) {
        if !physics.remove_body(self.body) {
            tracing::debug!(id = ?self.id, "body already removed");
        }
        if let Some(model) = self.entity.model.take() {
            models.release(model);
        }
    }
}

#[cfg(test)]
mod tests {
    use drift_config::PhysicsConfig;
    use drift_physics::{ManualClock, NullDrawer, Transform};
    use glam::{Quat, Vec3};

    use super::*;
    use crate::draw::{DrawCall, DrawLog};
    use crate::model::ModelRegistry;

    fn physics() -> (PhysicsWorld, ManualClock) {
        let clock = ManualClock::new();
        let world = PhysicsWorld::init(
            &PhysicsConfig::default(),
            Box::new(clock.clone()),
            Box::new(NullDrawer),
        );
        (world, clock)
    }

    fn desc(position: Vec3) -> BodyDesc {
        BodyDesc::ball(
            Transform {
                position,
                rotation: Quat::IDENTITY,
            },
            1.0,
            10.0,
            0.5,
        )
    }

    #[test]
    fn test_sync_pulls_body_transform() {
        let (mut physics, clock) = physics();
        let mut e = DynamicEntity::spawn(&mut physics, EntityId(1), "saucer", &desc(Vec3::ZERO), None);
        physics.apply_central_impulse(e.body(), Vec3::new(0.0, 100.0, 0.0));
        clock.advance_micros(16_700);
        physics.update();

        assert_eq!(e.entity().location, Vec3::ZERO);
        assert!(e.sync(&physics));
        assert!(e.entity().location.y > 0.0);
    }

    #[test]
    fn test_cleanup_removes_body_and_releases_model() {
        let (mut physics, _clock) = physics();
        let mut models = ModelRegistry::with_models(["saucer"]);
        let model = models.resolve("saucer");
        let mut e = DynamicEntity::spawn(&mut physics, EntityId(2), "saucer", &desc(Vec3::ONE), model);

        e.cleanup(&mut physics, &mut models);
        assert_eq!(physics.body_count(), 0);
        assert_eq!(models.users(model.unwrap()), 0);
        assert!(!e.sync(&physics));
    }

    #[test]
    fn test_draw_uses_scale() {
        let (mut physics, _clock) = physics();
        let e = DynamicEntity::spawn(
            &mut physics,
            EntityId(3),
            "Earth",
            &desc(Vec3::new(0.0, 0.0, 40.0)),
            Some(ModelHandle(0)),
        )
        .with_scale(25.0);
        let mut log = DrawLog::default();
        e.draw(&mut log);
        assert!(matches!(
            log.calls.as_slice(),
            [DrawCall::Model { scale, .. }] if *scale == 25.0
        ));
    }
}
