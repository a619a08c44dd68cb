//! Command-line argument parsing for the Drift sandbox.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Drift command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "drift", about = "Drift space flight sandbox")]
pub struct CliArgs {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scene file to load.
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Number of frames to simulate before exiting.
    #[arg(long, default_value_t = 600)]
    pub frames: u32,

    /// Seed for debris fields that do not carry their own.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with physics debug drawing enabled.
    #[arg(long)]
    pub physics_debug: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(seed) = args.seed {
            self.debris.default_seed = seed;
        }
        if args.physics_debug {
            self.debug.physics_debug = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            log_level: Some("trace".to_string()),
            seed: Some(7),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.debug.log_level, "trace");
        assert_eq!(config.debris.default_seed, 7);
        // Non-overridden fields retain defaults
        assert!(!config.debug.physics_debug);
        assert_eq!(config.camera.max_zoom, 3000.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "drift",
            "--scene",
            "scenes/demo.ron",
            "--frames",
            "30",
            "--physics-debug",
        ]);
        assert_eq!(args.scene, Some(PathBuf::from("scenes/demo.ron")));
        assert_eq!(args.frames, 30);
        assert!(args.physics_debug);
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_cli_frames_default() {
        let args = CliArgs::parse_from(["drift"]);
        assert_eq!(args.frames, 600);
    }
}
