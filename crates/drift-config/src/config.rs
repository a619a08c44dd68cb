//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Rigid-body stepping.
    pub physics: PhysicsConfig,
    /// Player ship handling and weapons.
    pub player: PlayerConfig,
    /// Camera zoom, offsets, and interaction.
    pub camera: CameraConfig,
    /// Procedural debris fields.
    pub debris: DebrisConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Physics world stepping configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Length of one integration substep in seconds.
    pub fixed_timestep: f32,
    /// Upper bound on substeps taken by a single update.
    pub max_substeps: u32,
    /// World gravity. Free space by default.
    pub gravity: [f32; 3],
}

/// Player ship configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Impulse per frame for strafe (x), ascend/descend (y), and thrust (z).
    pub thrust: [f32; 3],
    /// Degrees rolled per frame while a roll control is held.
    pub roll_step_degrees: f32,
    /// Forward impulse applied to a freshly fired projectile.
    pub projectile_speed: f32,
    /// Projectile mass.
    pub projectile_mass: f32,
    /// Projectile restitution.
    pub projectile_restitution: f32,
    /// Radius of the projectile collider.
    pub projectile_radius: f32,
    /// Logical model name resolved for projectiles.
    pub projectile_model: String,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Zoom distance the camera starts at.
    pub initial_zoom: f32,
    /// Lower zoom bound while following.
    pub min_zoom: f32,
    /// Upper zoom bound.
    pub max_zoom: f32,
    /// Horizontal offset from the followed entity (Follow mode only).
    pub x_offset: f32,
    /// Vertical offset from the followed entity (Follow mode only).
    pub y_offset: f32,
    /// Free-mode movement speed per 10 ms of elapsed time.
    pub free_speed: f32,
    /// Fraction of the current zoom removed per scroll line.
    pub zoom_sensitivity: f32,
    /// Impulse per pixel of pointer motion applied to a grabbed entity.
    pub grab_sensitivity: f32,
    /// Length of the look-at ray and base for the skybox size.
    pub draw_distance: f32,
}

/// Debris field configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebrisConfig {
    /// Base jump distance scaled by noise when chaining particles.
    pub jump_amount: f32,
    /// Noise-to-size multiplier for particles.
    pub size_scale: f32,
    /// Seed used when a scene does not supply one.
    pub default_seed: u64,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Pointer delta multiplier.
    pub mouse_sensitivity: f32,
    /// Invert the vertical pointer axis.
    pub invert_y: bool,
    /// Control binding overrides (control name -> key or mouse button name).
    pub keybindings: HashMap<String, String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Start with physics debug drawing enabled.
    pub physics_debug: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 10,
            gravity: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            thrust: [1000.0, 1000.0, 1000.0],
            roll_step_degrees: 2.0,
            projectile_speed: 100_000.0,
            projectile_mass: 100.0,
            projectile_restitution: 1.0,
            projectile_radius: 0.5,
            projectile_model: "laser_bullet".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_zoom: 12.0,
            min_zoom: 10.0,
            max_zoom: 3000.0,
            x_offset: 0.0,
            y_offset: -2.7,
            free_speed: 10.0,
            zoom_sensitivity: 10.0 / 120.0,
            grab_sensitivity: 250.0,
            draw_distance: 3_000_000.0,
        }
    }
}

impl Default for DebrisConfig {
    fn default() -> Self {
        Self {
            jump_amount: 150_000.0,
            size_scale: 200.0,
            default_seed: 1_337_420,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.0,
            invert_y: false,
            keybindings: HashMap::new(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            physics_debug: false,
        }
    }
}

/// Per-user config directory (`<platform config dir>/drift`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("drift"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = std::fs::read_to_string(config_dir.join(CONFIG_FILE))
            .map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| ConfigError::InvalidValue {
            field,
            reason: reason.to_string(),
        };

        if !(self.physics.fixed_timestep > 0.0) {
            return Err(invalid("physics.fixed_timestep", "must be positive"));
        }
        if self.physics.max_substeps == 0 {
            return Err(invalid("physics.max_substeps", "must be at least 1"));
        }
        if !(self.camera.min_zoom <= self.camera.max_zoom) {
            return Err(invalid("camera.min_zoom", "must not exceed camera.max_zoom"));
        }
        if !(self.camera.draw_distance > 0.0) {
            return Err(invalid("camera.draw_distance", "must be positive"));
        }
        if !(self.player.projectile_mass > 0.0) {
            return Err(invalid("player.projectile_mass", "must be positive"));
        }
        if !(self.debris.jump_amount >= 0.0) {
            return Err(invalid("debris.jump_amount", "must not be negative"));
        }
        Ok(())
    }
}
