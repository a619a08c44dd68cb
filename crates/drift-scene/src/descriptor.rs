//! Scene descriptors: one per initial entity, with the checks serde
//! cannot express.

use serde::Deserialize;

use crate::error::SceneError;

/// `(x, y, z)`.
pub type Triple = (f32, f32, f32);
/// Quaternion as `(x, y, z, w)`.
pub type Quad = (f32, f32, f32, f32);

fn identity() -> Quad {
    (0.0, 0.0, 0.0, 1.0)
}

fn unit_scale() -> f32 {
    1.0
}

/// Collision shape of a body.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum ShapeDescriptor {
    Ball(f32),
    Box(f32, f32, f32),
}

impl Default for ShapeDescriptor {
    fn default() -> Self {
        Self::Ball(1.0)
    }
}

/// A rigid body with a model: the player or a saucer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodyDescriptor {
    pub location: Triple,
    #[serde(default = "identity")]
    pub rotation: Quad,
    /// Zero makes the body immovable.
    pub mass: f32,
    pub restitution: f32,
    #[serde(default)]
    pub shape: ShapeDescriptor,
    /// Overrides the model the kind normally uses.
    #[serde(default)]
    pub model: Option<String>,
}

/// A spherical body whose model is chosen by name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanetDescriptor {
    pub name: String,
    pub location: Triple,
    #[serde(default = "identity")]
    pub rotation: Quad,
    /// Radius, also the draw scale.
    pub size: f32,
    pub mass: f32,
    pub restitution: f32,
}

/// Scenery without a body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StaticDescriptor {
    pub model: String,
    pub location: Triple,
    #[serde(default = "identity")]
    pub rotation: Quad,
    #[serde(default = "unit_scale")]
    pub scale: f32,
}

/// A light source, optionally drawn as a body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SunDescriptor {
    pub location: Triple,
    pub size: f32,
    /// Light slot, 0 to 7.
    pub light: u8,
    pub color: Triple,
    pub ambient: Triple,
    pub diffuse: Triple,
    #[serde(default)]
    pub model: Option<String>,
}

/// A debris field around the camera.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DebrisDescriptor {
    pub count: usize,
    /// Half-extent of the cube the particles stay in.
    pub range: f32,
    /// Falls back to the configured default seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// One entry of a scene file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum Descriptor {
    Player(BodyDescriptor),
    Planet(PlanetDescriptor),
    Saucer(BodyDescriptor),
    Static(StaticDescriptor),
    Sun(SunDescriptor),
    Debris(DebrisDescriptor),
}

impl Descriptor {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Player(_) => "player",
            Self::Planet(_) => "planet",
            Self::Saucer(_) => "saucer",
            Self::Static(_) => "static",
            Self::Sun(_) => "sun",
            Self::Debris(_) => "debris",
        }
    }

    /// Name of the model this descriptor draws with, if any.
    pub fn model_name(&self) -> Option<&str> {
        match self {
            Self::Player(b) => Some(b.model.as_deref().unwrap_or("wing_x")),
            Self::Saucer(b) => Some(b.model.as_deref().unwrap_or("saucer")),
            Self::Planet(p) => Some(&p.name),
            Self::Static(s) => Some(&s.model),
            Self::Sun(s) => s.model.as_deref(),
            Self::Debris(_) => None,
        }
    }

    /// Checks the values serde cannot. `index` is the descriptor's position
    /// in the scene, used in the error.
    pub fn validate(&self, index: usize) -> Result<(), SceneError> {
        let invalid = |reason: String| SceneError::Invalid {
            index,
            kind: self.kind(),
            reason,
        };

        match self {
            Self::Player(b) | Self::Saucer(b) => {
                check_placement(b.location, b.rotation).map_err(invalid)?;
                check_body(b.mass, b.restitution).map_err(invalid)?;
                check_shape(b.shape).map_err(invalid)?;
            }
            Self::Planet(p) => {
                if p.name.trim().is_empty() {
                    return Err(invalid("name is empty".into()));
                }
                check_placement(p.location, p.rotation).map_err(invalid)?;
                check_body(p.mass, p.restitution).map_err(invalid)?;
                check_positive("size", p.size).map_err(invalid)?;
            }
            Self::Static(s) => {
                check_placement(s.location, s.rotation).map_err(invalid)?;
                check_positive("scale", s.scale).map_err(invalid)?;
            }
            Self::Sun(s) => {
                check_finite("location", &[s.location.0, s.location.1, s.location.2])
                    .map_err(invalid)?;
                check_positive("size", s.size).map_err(invalid)?;
                for (name, c) in [
                    ("color", s.color),
                    ("ambient", s.ambient),
                    ("diffuse", s.diffuse),
                ] {
                    check_finite(name, &[c.0, c.1, c.2]).map_err(invalid)?;
                }
            }
            Self::Debris(d) => {
                if d.count == 0 {
                    return Err(invalid("count must be at least 1".into()));
                }
                check_positive("range", d.range).map_err(invalid)?;
            }
        }
        Ok(())
    }
}

fn check_finite(field: &str, values: &[f32]) -> Result<(), String> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(format!("{field} must be finite"))
    }
}

fn check_positive(field: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{field} must be positive, got {value}"))
    }
}

fn check_placement(location: Triple, rotation: Quad) -> Result<(), String> {
    check_finite("location", &[location.0, location.1, location.2])?;
    let q = [rotation.0, rotation.1, rotation.2, rotation.3];
    check_finite("rotation", &q)?;
    if q.iter().all(|c| *c == 0.0) {
        return Err("rotation is the zero quaternion".into());
    }
    Ok(())
}

fn check_body(mass: f32, restitution: f32) -> Result<(), String> {
    if !mass.is_finite() || mass < 0.0 {
        return Err(format!("mass must be zero or positive, got {mass}"));
    }
    if !restitution.is_finite() || restitution < 0.0 {
        return Err(format!("restitution must be zero or positive, got {restitution}"));
    }
    Ok(())
}

fn check_shape(shape: ShapeDescriptor) -> Result<(), String> {
    match shape {
        ShapeDescriptor::Ball(r) => check_positive("radius", r),
        ShapeDescriptor::Box(x, y, z) => {
            check_positive("half extent", x)?;
            check_positive("half extent", y)?;
            check_positive("half extent", z)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> BodyDescriptor {
        BodyDescriptor {
            location: (0.0, 0.0, 0.0),
            rotation: identity(),
            mass: 10.0,
            restitution: 0.2,
            shape: ShapeDescriptor::default(),
            model: None,
        }
    }

    #[test]
    fn test_default_models() {
        assert_eq!(Descriptor::Player(body()).model_name(), Some("wing_x"));
        assert_eq!(Descriptor::Saucer(body()).model_name(), Some("saucer"));
        let custom = BodyDescriptor {
            model: Some("cobra".into()),
            ..body()
        };
        assert_eq!(Descriptor::Player(custom).model_name(), Some("cobra"));
        let debris = DebrisDescriptor {
            count: 1,
            range: 1.0,
            seed: None,
        };
        assert_eq!(Descriptor::Debris(debris).model_name(), None);
    }

    #[test]
    fn test_zero_mass_is_valid() {
        let fixed = BodyDescriptor {
            mass: 0.0,
            ..body()
        };
        assert!(Descriptor::Saucer(fixed).validate(0).is_ok());
    }

    #[test]
    fn test_rejects_bad_bodies() {
        let cases = [
            BodyDescriptor {
                mass: -1.0,
                ..body()
            },
            BodyDescriptor {
                location: (f32::NAN, 0.0, 0.0),
                ..body()
            },
            BodyDescriptor {
                rotation: (0.0, 0.0, 0.0, 0.0),
                ..body()
            },
            BodyDescriptor {
                shape: ShapeDescriptor::Box(1.0, 0.0, 1.0),
                ..body()
            },
        ];
        for (i, case) in cases.into_iter().enumerate() {
            let err = Descriptor::Player(case).validate(i).unwrap_err();
            match err {
                SceneError::Invalid { index, kind, .. } => {
                    assert_eq!(index, i);
                    assert_eq!(kind, "player");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_rejects_empty_debris() {
        let d = Descriptor::Debris(DebrisDescriptor {
            count: 0,
            range: 100.0,
            seed: None,
        });
        assert!(d.validate(3).unwrap_err().to_string().contains("#3"));
    }

    #[test]
    fn test_sun_needs_positive_size() {
        let sun = SunDescriptor {
            location: (0.0, 100.0, 0.0),
            size: 0.0,
            light: 0,
            color: (1.0, 1.0, 1.0),
            ambient: (0.1, 0.1, 0.1),
            diffuse: (1.0, 1.0, 1.0),
            model: None,
        };
        assert!(Descriptor::Sun(sun).validate(0).is_err());
    }
}
