mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration from `CONFIG_PATH` (or `config.yaml`) and applies
/// environment overrides.
///
/// A missing default file falls back to built-in defaults; a file named
/// explicitly through `CONFIG_PATH` must exist.
pub async fn load() -> Result<Config> {
    let explicit = env::var("CONFIG_PATH").ok();
    let config_path = explicit
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(config_str) => parse(&config_str)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
        Err(e) => {
            return Err(Error::config(format!(
                "cannot read configuration file '{}': {}",
                config_path, e
            )));
        }
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok());
    Ok(config)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // An empty document deserializes as unit, not as an all-default mapping.
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

/// Applies `MODEL_PATH`, resolved through `lookup`.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(model_path) = lookup("MODEL_PATH") {
        debug!("MODEL_PATH override: {}", model_path);
        config.model.path = model_path;
    }
}
