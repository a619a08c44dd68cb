//! Turns validated scene descriptors into live entities.

use drift_config::{DebrisConfig, PlayerConfig};
use drift_entity::{
    DynamicEntity, Entity, EntityIds, Light, ModelHandle, ModelProvider, StaticEntity, Transform,
};
use drift_physics::{BodyDesc, BodyShape, PhysicsWorld};
use drift_player::ShipController;
use drift_scene::{
    BodyDescriptor, Descriptor, Quad, SceneError, ShapeDescriptor, Triple, resolve_model,
};
use drift_space::DebrisField;
use glam::{Quat, Vec3};

use crate::scene_entity::SceneEntity;

/// What building an entity may touch.
pub struct BuildContext<'a> {
    pub physics: &'a mut PhysicsWorld,
    pub ids: &'a mut EntityIds,
    pub models: &'a mut dyn ModelProvider,
    pub player: &'a PlayerConfig,
    pub debris: &'a DebrisConfig,
    /// Where debris fields start out.
    pub anchor: Vec3,
}

/// Builds one entity. The model is resolved before any body is created, so
/// a failure leaves the physics world untouched.
pub fn build_entity(
    descriptor: &Descriptor,
    ctx: &mut BuildContext<'_>,
) -> Result<SceneEntity, SceneError> {
    let model = match descriptor.model_name() {
        Some(name) => Some(resolve_model(ctx.models, name)?),
        None => None,
    };

    let entity = match descriptor {
        Descriptor::Player(b) => {
            let id = ctx.ids.allocate();
            let ship =
                ShipController::spawn(ctx.physics, id, &body_desc(b), model, ctx.player.clone());
            SceneEntity::Player(ship)
        }
        Descriptor::Saucer(b) => {
            SceneEntity::Dynamic(spawn_dynamic(ctx, "saucer", &body_desc(b), model))
        }
        Descriptor::Planet(p) => {
            let desc = BodyDesc::ball(
                placement(p.location, p.rotation),
                p.size,
                p.mass,
                p.restitution,
            );
            let planet = spawn_dynamic(ctx, &p.name, &desc, model).with_scale(p.size);
            SceneEntity::Dynamic(planet)
        }
        Descriptor::Static(s) => {
            let entity = Entity::new(s.model.as_str())
                .with_transform(placement(s.location, s.rotation))
                .with_model(model);
            SceneEntity::Static(StaticEntity::new(entity, s.scale))
        }
        Descriptor::Sun(s) => {
            let mut entity = Entity::new("sun").with_model(model);
            entity.location = vec3(s.location);
            let light = Light::new(entity, s.light, s.size).with_colors(
                rgb(s.color),
                rgb(s.ambient),
                rgb(s.diffuse),
            );
            SceneEntity::Light(light)
        }
        Descriptor::Debris(d) => {
            let seed = d.seed.unwrap_or(ctx.debris.default_seed);
            SceneEntity::Debris(DebrisField::new(
                ctx.anchor,
                d.count,
                d.range,
                seed,
                ctx.debris,
            ))
        }
    };
    Ok(entity)
}

fn spawn_dynamic(
    ctx: &mut BuildContext<'_>,
    tag: &str,
    desc: &BodyDesc,
    model: Option<ModelHandle>,
) -> DynamicEntity {
    let id = ctx.ids.allocate();
    DynamicEntity::spawn(ctx.physics, id, tag, desc, model)
}

fn vec3((x, y, z): Triple) -> Vec3 {
    Vec3::new(x, y, z)
}

fn rgb((r, g, b): Triple) -> [f32; 3] {
    [r, g, b]
}

fn placement(location: Triple, (x, y, z, w): Quad) -> Transform {
    Transform {
        position: vec3(location),
        rotation: drift_math::renormalize(Quat::from_xyzw(x, y, z, w)),
    }
}

fn body_desc(b: &BodyDescriptor) -> BodyDesc {
    let shape = match b.shape {
        ShapeDescriptor::Ball(radius) => BodyShape::Ball { radius },
        ShapeDescriptor::Box(x, y, z) => BodyShape::Cuboid {
            half_extents: Vec3::new(x, y, z),
        },
    };
    BodyDesc {
        transform: placement(b.location, b.rotation),
        shape,
        mass: b.mass,
        restitution: b.restitution,
        ccd: false,
    }
}
