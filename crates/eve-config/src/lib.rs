// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # EVE Configuration Store
//!
//! Type-safe configuration loader for the EVE console with support for:
//! - TOML file parsing and writing
//! - Environment variable overrides
//! - CLI argument overrides
//! - Validation with aggregated error reporting
//!
//! ## Usage
//!
//! ```rust,no_run
//! use eve_config::{find_config_file, load_config, FeatureId};
//!
//! let path = find_config_file().expect("config file");
//! let config = load_config(&path).expect("Failed to load config");
//!
//! println!("I2C bus: {}", config.i2c.bus);
//! println!("Face detection: {}", config.features.get(FeatureId::FaceDetection).enabled);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config, save_config,
    CONFIG_FILE_NAME,
};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Unknown feature: '{0}'")]
    UnknownFeature(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::WriteError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EveConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.eve.max_width, 800);
        assert_eq!(config.features.flags(), FeatureFlags::default());
    }
}
