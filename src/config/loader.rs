//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ServerConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse TOML without touching the environment.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply `PORT`, `DB_PATH` and `LOG_LEVEL` overrides. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut ServerConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(port) = get("PORT") {
        config.listener.bind_address = bind_address_from_port(&port);
    }
    if let Some(path) = get("DB_PATH") {
        config.database.path = path;
    }
    if let Some(level) = get("LOG_LEVEL") {
        config.observability.log_level = level;
    }
}

/// Accepts ":3000", "3000" or a full "host:port".
fn bind_address_from_port(port: &str) -> String {
    if port.starts_with(':') {
        format!("0.0.0.0{}", port)
    } else if port.chars().all(|c| c.is_ascii_digit()) {
        format!("0.0.0.0:{}", port)
    } else {
        port.to_string()
    }
}
