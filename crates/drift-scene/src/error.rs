//! Scene error types.

use std::path::PathBuf;

/// Errors raised while loading a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The scene file could not be read.
    #[error("failed to read scene {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scene file is not valid RON for a scene.
    #[error("failed to parse scene: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// A descriptor parsed but holds an unusable value.
    #[error("invalid {kind} descriptor #{index}: {reason}")]
    Invalid {
        index: usize,
        kind: &'static str,
        reason: String,
    },

    /// A descriptor names a model the provider does not know.
    #[error("unknown model `{0}`")]
    UnknownModel(String),
}
