//! Six-degrees-of-freedom ship driven by impulses on its rigid body.
//!
//! Each held thrust control applies its own impulse along a ship-local axis,
//! so forward+left yields a larger net impulse than either alone. Mouse look
//! and roll overwrite the body's orientation after the solver has run.

use drift_config::PlayerConfig;
use drift_entity::{
    DrawSink, DynamicEntity, Entity, EntityBehavior, EntityId, FrameContext, ModelHandle,
    ModelProvider,
};
use drift_input::{Control, EdgeTrigger};
use drift_physics::{BodyDesc, BodyHandle, PhysicsWorld, Transform};
use glam::Vec3;

/// Tag given to the player's entity.
pub const PLAYER_TAG: &str = "dynamicPlayer";
/// Tag given to fired projectiles.
pub const PROJECTILE_TAG: &str = "laserBullet";

/// The player's ship.
#[derive(Debug)]
pub struct ShipController {
    ship: DynamicEntity,
    config: PlayerConfig,
    trigger: EdgeTrigger,
}

impl ShipController {
    /// Creates the ship body from `desc` and binds the controller to it.
    pub fn spawn(
        physics: &mut PhysicsWorld,
        id: EntityId,
        desc: &BodyDesc,
        model: Option<ModelHandle>,
        config: PlayerConfig,
    ) -> Self {
        Self {
            ship: DynamicEntity::spawn(physics, id, PLAYER_TAG, desc, model),
            config,
            trigger: EdgeTrigger::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.ship.id()
    }

    pub fn body(&self) -> BodyHandle {
        self.ship.body()
    }

    pub fn transform(&self) -> Transform {
        self.ship.entity().transform()
    }

    /// Refreshes the entity from its body.
    pub fn sync(&mut self, physics: &PhysicsWorld) -> bool {
        self.ship.sync(physics)
    }

    fn thrust(&self, ctx: &mut FrameContext<'_>) {
        let [x, y, z] = self.config.thrust;
        let thrusters = [
            (Control::Forward, Vec3::new(0.0, 0.0, z)),
            (Control::Backward, Vec3::new(0.0, 0.0, -z)),
            (Control::Left, Vec3::new(x, 0.0, 0.0)),
            (Control::Right, Vec3::new(-x, 0.0, 0.0)),
            (Control::Ascend, Vec3::new(0.0, -y, 0.0)),
            (Control::Descend, Vec3::new(0.0, y, 0.0)),
        ];

        let entity = self.ship.entity();
        for (control, local) in thrusters {
            if ctx.input.is_active(control) {
                ctx.physics
                    .apply_central_impulse(self.ship.body(), entity.to_world(local));
            }
        }
    }

    fn look(&mut self, ctx: &mut FrameContext<'_>) {
        let delta = ctx.input.pointer_delta();
        let roll = self.config.roll_step_degrees;
        let entity = self.ship.entity_mut();

        entity.rotate_x(delta.y);
        entity.rotate_y(delta.x);
        if ctx.input.is_active(Control::RollRight) {
            entity.rotate_z(-roll);
        }
        if ctx.input.is_active(Control::RollLeft) {
            entity.rotate_z(roll);
        }

        let rotation = entity.rotation;
        ctx.physics.set_body_rotation(self.ship.body(), rotation);
    }

    fn fire(&mut self, ctx: &mut FrameContext<'_>) {
        let held = ctx.input.is_active(Control::Fire);
        if !self.trigger.fire(held, !ctx.input.console_open()) {
            return;
        }

        let entity = self.ship.entity();
        let model = ctx.models.resolve(&self.config.projectile_model);
        if model.is_none() {
            tracing::debug!(model = %self.config.projectile_model, "projectile model not found");
        }
        let desc = BodyDesc::ball(
            entity.transform(),
            self.config.projectile_radius,
            self.config.projectile_mass,
            self.config.projectile_restitution,
        )
        .with_ccd();

        let id = ctx.ids.allocate();
        let projectile = DynamicEntity::spawn(ctx.physics, id, PROJECTILE_TAG, &desc, model);
        let impulse = entity.to_world(Vec3::new(0.0, 0.0, self.config.projectile_speed));
        ctx.physics.apply_central_impulse(projectile.body(), impulse);

        tracing::trace!(?id, "projectile fired");
        ctx.spawns.push(projectile);
    }
}

impl EntityBehavior for ShipController {
    fn entity(&self) -> &Entity {
        self.ship.entity()
    }

    fn entity_mut(&mut self) -> &mut Entity {
        self.ship.entity_mut()
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.ship.update(ctx);
        self.thrust(ctx);
        if !ctx.camera.vanity {
            self.look(ctx);
        }
        self.fire(ctx);
    }

    fn draw(&self, sink: &mut dyn DrawSink) {
        self.ship.draw(sink);
    }

    fn cleanup(&mut self, physics: &mut PhysicsWorld, models: &mut dyn ModelProvider) {
        self.ship.cleanup(physics, models);
    }
}
