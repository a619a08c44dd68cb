//! Body descriptions and the plain transform/ownership types shared with
//! entities.

use glam::{Quat, Vec3};

/// Identifier of the entity that owns a rigid body.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Packs the id into rapier user data. Zero is reserved for "no owner".
    pub(crate) fn to_user_data(self) -> u128 {
        u128::from(self.0) + 1
    }

    pub(crate) fn from_user_data(data: u128) -> Option<Self> {
        data.checked_sub(1)
            .and_then(|raw| u64::try_from(raw).ok())
            .map(EntityId)
    }
}

/// World-space position and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Collision shape of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Ball { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

/// Everything needed to create a rigid body and its single collider.
///
/// A mass of zero (or less) makes the body fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub transform: Transform,
    pub shape: BodyShape,
    pub mass: f32,
    pub restitution: f32,
    /// Continuous collision detection, for small fast bodies.
    pub ccd: bool,
}

impl BodyDesc {
    pub fn ball(transform: Transform, radius: f32, mass: f32, restitution: f32) -> Self {
        Self {
            transform,
            shape: BodyShape::Ball { radius },
            mass,
            restitution,
            ccd: false,
        }
    }

    pub fn with_ccd(mut self) -> Self {
        self.ccd = true;
        self
    }

    pub fn is_fixed(&self) -> bool {
        self.mass <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_data_reserves_zero() {
        assert_eq!(EntityId::from_user_data(0), None);
        assert_eq!(EntityId(0).to_user_data(), 1);
        assert_eq!(EntityId::from_user_data(EntityId(41).to_user_data()), Some(EntityId(41)));
    }

    #[test]
    fn test_zero_mass_is_fixed() {
        let desc = BodyDesc::ball(Transform::default(), 1.0, 0.0, 0.5);
        assert!(desc.is_fixed());
        assert!(!BodyDesc::ball(Transform::default(), 1.0, 2.0, 0.5).is_fixed());
    }
}
