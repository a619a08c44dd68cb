//! Configuration system for Drift.
//!
//! Runtime-tunable settings for physics stepping, ship handling, the camera,
//! debris fields, and input, persisted as RON. CLI arguments (clap) override
//! whatever was loaded from disk.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebrisConfig, DebugConfig, InputConfig, PhysicsConfig, PlayerConfig,
    default_config_dir,
};
pub use error::ConfigError;
