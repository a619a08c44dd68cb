//! Input error types.

use thiserror::Error;

/// Errors from applying user keybinding overrides.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("unknown control '{0}'")]
    UnknownControl(String),

    #[error("unknown binding '{binding}' for control '{control}'")]
    UnknownBinding { control: String, binding: String },

    #[error("failed to parse control map: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize control map: {0}")]
    Serialize(#[from] ron::Error),
}
