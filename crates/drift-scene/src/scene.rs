//! Scene file loading and per-descriptor validation.

use std::path::Path;

use drift_entity::{ModelHandle, ModelProvider};
use ron::extensions::Extensions;
use serde::Deserialize;

use crate::descriptor::Descriptor;
use crate::error::SceneError;

/// A parsed scene file.
///
/// ```ron
/// Scene(
///     skybox: Some("skybox"),
///     entities: [
///         Player(location: (0.0, 0.0, 0.0), mass: 10.0, restitution: 0.1),
///         Debris(count: 2000, range: 50000.0),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Scene {
    /// Model drawn around the camera.
    #[serde(default)]
    pub skybox: Option<String>,
    #[serde(default)]
    pub entities: Vec<Descriptor>,
}

impl Scene {
    /// Reads and parses a scene file. Descriptors are not validated yet.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SceneError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_ron_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            descriptors = scene.entities.len(),
            "scene loaded"
        );
        Ok(scene)
    }

    /// Parses scene RON. Descriptor variants may be written without the
    /// inner struct parentheses, e.g. `Player(location: ..)`.
    pub fn from_ron_str(s: &str) -> Result<Self, SceneError> {
        let options =
            ron::Options::default().with_default_extension(Extensions::UNWRAP_VARIANT_NEWTYPES);
        Ok(options.from_str(s)?)
    }

    /// The descriptors that pass validation, paired with their position in
    /// the file. Each failing descriptor is logged and left out.
    pub fn valid_entities(&self) -> Vec<(usize, &Descriptor)> {
        self.entities
            .iter()
            .enumerate()
            .filter(|(index, descriptor)| match descriptor.validate(*index) {
                Ok(()) => true,
                Err(err) => {
                    tracing::error!(%err, "skipping scene descriptor");
                    false
                }
            })
            .collect()
    }

    /// Whether the scene contains a player.
    pub fn has_player(&self) -> bool {
        self.entities
            .iter()
            .any(|d| matches!(d, Descriptor::Player(_)))
    }
}

/// Resolves a descriptor's model by name.
pub fn resolve_model(
    models: &mut dyn ModelProvider,
    name: &str,
) -> Result<ModelHandle, SceneError> {
    models
        .resolve(name)
        .ok_or_else(|| SceneError::UnknownModel(name.to_string()))
}
