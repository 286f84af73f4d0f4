//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Read `.env` (if present) into the process environment
//! 2. Probe the standard locations for a config file, else start from defaults
//! 3. Apply `TEXTOPS_*` environment overrides
//! 4. Validate
//!
//! ## Environment Variables
//! - `TEXTOPS_MODEL_TYPE`: Registry name of the active model
//! - `TEXTOPS_MODEL_PATH`: Artifact to load at start-up
//! - `TEXTOPS_PERF_WINDOW_SIZE`: Performance monitor window size
//! - `TEXTOPS_PERF_DRIFT_THRESHOLD`: Performance monitor threshold
//! - `TEXTOPS_DATA_WINDOW_SIZE`: Data drift monitor window size
//! - `TEXTOPS_DATA_DRIFT_THRESHOLD`: Data drift monitor threshold
//! - `TEXTOPS_LOG_LEVEL`: Default log level (`RUST_LOG` still wins)
//! - `TEXTOPS_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./textops.toml`, `./textops.json`, `./config.toml`, `./config.json`
//! 2. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use textops_domain::{Config, Result, TextOpsError};

/// Load configuration from the first config file found (or defaults), then
/// apply environment overrides.
///
/// # Errors
/// Returns `TextOpsError::Config` if a file is malformed, an environment
/// variable has an invalid value, or the result fails validation.
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let mut config = match probe_config_paths() {
        Some(path) => read_config(&path)?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };
    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Defaults plus environment overrides, no file lookup.
///
/// # Errors
/// Returns `TextOpsError::Config` for unparsable variables or a config that
/// fails validation.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    config.validate()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. JSON and TOML are
/// detected by file extension. Environment variables are not consulted.
///
/// # Errors
/// Returns `TextOpsError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Validation fails
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TextOpsError::config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TextOpsError::config("No config file found in any of the standard locations")
        })?,
    };

    let config = read_config(&config_path)?;
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config> {
    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| TextOpsError::config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

/// Parse configuration text, choosing the format by `path`'s extension
/// (`.json` when there is none).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TextOpsError::config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TextOpsError::config(format!("Invalid JSON format: {e}"))),
        _ => Err(TextOpsError::config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["textops.toml", "textops.json", "config.toml", "config.json"];

    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter().flat_map(|dir| NAMES.iter().map(move |name| dir.join(name))).find(|p| p.exists())
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(model_type) = env_string("TEXTOPS_MODEL_TYPE") {
        config.model.model_type = model_type;
    }
    if let Some(path) = env_string("TEXTOPS_MODEL_PATH") {
        config.model.artifact_path = Some(PathBuf::from(path));
    }

    let performance = &mut config.monitoring.performance;
    if let Some(size) = env_parse("TEXTOPS_PERF_WINDOW_SIZE")? {
        performance.window_size = size;
    }
    if let Some(threshold) = env_parse("TEXTOPS_PERF_DRIFT_THRESHOLD")? {
        performance.drift_threshold = threshold;
    }

    let data_drift = &mut config.monitoring.data_drift;
    if let Some(size) = env_parse("TEXTOPS_DATA_WINDOW_SIZE")? {
        data_drift.window_size = size;
    }
    if let Some(threshold) = env_parse("TEXTOPS_DATA_DRIFT_THRESHOLD")? {
        data_drift.drift_threshold = threshold;
    }

    if let Some(level) = env_string("TEXTOPS_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("TEXTOPS_LOG_JSON", config.logging.json);
    Ok(())
}

/// Non-empty environment variable
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_string(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| TextOpsError::config(format!("Invalid value for {key} ('{raw}'): {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
