//! The closed set of entity kinds the world iterates over.

use drift_entity::{DynamicEntity, EntityBehavior, EntityId, Light, StaticEntity};
use drift_player::ShipController;
use drift_space::{DebrisField, Skybox};

/// Every kind of entity that can live in the world besides the camera.
pub enum SceneEntity {
    Static(StaticEntity),
    Dynamic(DynamicEntity),
    Player(ShipController),
    Light(Light),
    Debris(DebrisField),
    Skybox(Skybox),
}

impl SceneEntity {
    pub fn behavior(&self) -> &dyn EntityBehavior {
        match self {
            Self::Static(e) => e,
            Self::Dynamic(e) => e,
            Self::Player(e) => e,
            Self::Light(e) => e,
            Self::Debris(e) => e,
            Self::Skybox(e) => e,
        }
    }

    pub fn behavior_mut(&mut self) -> &mut dyn EntityBehavior {
        match self {
            Self::Static(e) => e,
            Self::Dynamic(e) => e,
            Self::Player(e) => e,
            Self::Light(e) => e,
            Self::Debris(e) => e,
            Self::Skybox(e) => e,
        }
    }

    /// Id of the entity's rigid body owner, for body-backed kinds.
    pub fn id(&self) -> Option<EntityId> {
        match self {
            Self::Dynamic(e) => Some(e.id()),
            Self::Player(e) => Some(e.id()),
            _ => None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.behavior().entity().tag
    }

    pub fn is_skybox(&self) -> bool {
        matches!(self, Self::Skybox(_))
    }
}

impl From<DynamicEntity> for SceneEntity {
    fn from(entity: DynamicEntity) -> Self {
        Self::Dynamic(entity)
    }
}
