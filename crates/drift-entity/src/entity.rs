//! Base spatial state shared by every entity.

use drift_physics::Transform;
use glam::{Quat, Vec3};

use crate::model::ModelHandle;

/// State shared by every scene object.
///
/// `rotation` is kept at unit length: the incremental rotate helpers
/// renormalize after every step.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Type tag, e.g. `"dynamicPlayer"`, `"saucer"`, `"Earth"`.
    pub tag: String,
    pub location: Vec3,
    pub rotation: Quat,
    pub model: Option<ModelHandle>,
}

impl Entity {
    /// An entity at the origin with identity orientation and no model.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            location: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            model: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.location = transform.position;
        self.rotation = drift_math::renormalize(transform.rotation);
        self
    }

    pub fn with_model(mut self, model: Option<ModelHandle>) -> Self {
        self.model = model;
        self
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.location,
            rotation: self.rotation,
        }
    }

    /// Copies location and orientation from a body transform.
    pub fn set_transform(&mut self, transform: Transform) {
        self.location = transform.position;
        self.rotation = transform.rotation;
    }

    /// Pitch around the local X axis.
    pub fn rotate_x(&mut self, degrees: f32) {
        self.rotation = drift_math::renormalize(drift_math::rotate_x(self.rotation, degrees));
    }

    /// Yaw around the local Y axis.
    pub fn rotate_y(&mut self, degrees: f32) {
        self.rotation = drift_math::renormalize(drift_math::rotate_y(self.rotation, degrees));
    }

    /// Roll around the local Z axis.
    pub fn rotate_z(&mut self, degrees: f32) {
        self.rotation = drift_math::renormalize(drift_math::rotate_z(self.rotation, degrees));
    }

    pub fn move_x(&mut self, speed: f32) {
        self.location = drift_math::move_x(self.rotation, self.location, speed);
    }

    pub fn move_y(&mut self, speed: f32) {
        self.location = drift_math::move_y(self.rotation, self.location, speed);
    }

    pub fn move_z(&mut self, speed: f32) {
        self.location = drift_math::move_z(self.rotation, self.location, speed);
    }

    /// Rotates a local-frame vector into world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        drift_math::rotate_vector(local, self.rotation)
    }
}
