//! Configuration loading.
//!
//! Startup resolution order: defaults, optional TOML file, `PORT` from the
//! environment, then explicit CLI overrides.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::env::{self, ReadEnv};
use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {var} value '{value}': expected a port number")]
    InvalidPort { var: &'static str, value: String },

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

/// Values supplied on the command line. `None` leaves the lower layer alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Build the startup configuration from every layer and validate the result.
pub fn resolve_config<E: ReadEnv + ?Sized>(
    overrides: &Overrides,
    env: &E,
) -> Result<ProxyConfig, ConfigError> {
    let mut config = match &overrides.config_path {
        Some(path) => read_config_file(path)?,
        None => ProxyConfig::default(),
    };

    if let Ok(raw) = env.var(env::PORT) {
        config.listener.port = raw.trim().parse().map_err(|_| ConfigError::InvalidPort {
            var: env::PORT,
            value: raw.clone(),
        })?;
    }

    if let Some(host) = &overrides.host {
        config.listener.host = host.clone();
    }
    if let Some(port) = overrides.port {
        config.listener.port = port;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: ProxyConfig = toml::from_str(&content)?;
    config.upstream = config.upstream.normalized();
    Ok(config)
}
