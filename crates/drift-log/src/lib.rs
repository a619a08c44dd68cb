//! Logging setup for Drift.
//!
//! Console output stamped with time since start, plus a JSON file in debug
//! builds. `RUST_LOG` wins over the configured level.

use std::fs::File;
use std::path::Path;

use drift_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names a level.
/// The rigid-body solver is chatty at debug, so it is held at warn.
pub const DEFAULT_FILTER: &str = "info,rapier3d=warn";

/// File name of the JSON log written in debug builds.
pub const LOG_FILE: &str = "drift.log";

/// Filter directive for the given config.
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.trim().to_string()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Opens the JSON log file, creating `log_dir` if needed.
fn open_log_file(log_dir: &Path) -> Option<File> {
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE)).ok()
}

/// Installs the global tracing subscriber.
///
/// * `log_dir` - directory for `drift.log` (only used when `debug_build` is set)
/// * `debug_build` - enables the JSON file layer
/// * `config` - supplies `debug.log_level` when `RUST_LOG` is unset
///
/// Calling this twice is harmless; the second call leaves the first subscriber
/// in place.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let file = if debug_build {
        log_dir.and_then(open_log_file)
    } else {
        None
    };

    let result = match file {
        Some(file) => subscriber
            .with(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_timer(fmt::time::uptime())
                    .json(),
            )
            .try_init(),
        None => subscriber.try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_quiets_solver() {
        let filter = EnvFilter::new(DEFAULT_FILTER);
        let rendered = filter.to_string();
        assert!(rendered.contains("rapier3d=warn"));
        assert!(rendered.contains("info"));
    }

    #[test]
    fn test_directive_without_config_is_default() {
        assert_eq!(filter_directive(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_directive_uses_config_level() {
        let mut config = Config::default();
        config.debug.log_level = " debug,drift_physics=trace ".to_string();
        assert_eq!(filter_directive(Some(&config)), "debug,drift_physics=trace");
    }

    #[test]
    fn test_blank_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_subsystem_directives_parse() {
        for directive in ["warn,drift_app=debug", "trace", "info,drift_space=error"] {
            assert!(EnvFilter::try_new(directive).is_ok(), "{directive}");
        }
    }

    #[test]
    fn test_log_file_created_in_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("session");
        assert!(open_log_file(&nested).is_some());
        assert!(nested.join(LOG_FILE).exists());
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logging(None, false, None);
        init_logging(None, false, Some(&Config::default()));
        tracing::info!("logging initialised");
    }
}
