//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent and within the ranges the SDK accepts.

use crate::{ConfigError, ConfigResult, EveConfig};

/// Largest frame width the SDK will scale to
pub const MAX_FRAME_WIDTH: u32 = 4096;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    InvalidI2cAddress { address: u8 },
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidI2cAddress { address } => {
                write!(
                    f,
                    "i2c.device_address = {:#04x} is outside the 7-bit range (0x03-0x77)",
                    address
                )
            }
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - A usable 7-bit I2C device address
/// - Frame width within `1..=MAX_FRAME_WIDTH`
/// - Required paths and file names
/// - A known log level
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &EveConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// Collect all validation errors without failing fast
pub fn collect_errors(config: &EveConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_bus(config, &mut errors);
    validate_sdk(config, &mut errors);
    validate_output(config, &mut errors);
    validate_logging(config, &mut errors);
    errors
}

fn validate_bus(config: &EveConfig, errors: &mut Vec<ConfigValidationError>) {
    // 0x00-0x02 and 0x78-0x7F are reserved on the I2C bus
    if !(0x03..=0x77).contains(&config.i2c.device_address) {
        errors.push(ConfigValidationError::InvalidI2cAddress {
            address: config.i2c.device_address,
        });
    }
}

fn validate_sdk(config: &EveConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.eve.max_width == 0 || config.eve.max_width > MAX_FRAME_WIDTH {
        errors.push(ConfigValidationError::InvalidValue {
            field: "eve.max_width".to_string(),
            reason: format!("must be between 1 and {}", MAX_FRAME_WIDTH),
        });
    }
    if config.eve.eve_path.as_os_str().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "eve.eve_path".to_string(),
        });
    }
    if config.eve.driver_path.as_os_str().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "eve.driver_path".to_string(),
        });
    }
}

fn validate_output(config: &EveConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.output.image_file.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "output.image_file".to_string(),
        });
    }
    if config.output.metadata_file.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "output.metadata_file".to_string(),
        });
    }
    if !config.output.image_file.is_empty()
        && config.output.image_file == config.output.metadata_file
    {
        errors.push(ConfigValidationError::InvalidValue {
            field: "output.metadata_file".to_string(),
            reason: "must differ from output.image_file".to_string(),
        });
    }
}

fn validate_logging(config: &EveConfig, errors: &mut Vec<ConfigValidationError>) {
    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("'{}' is not one of {}", config.logging.level, LOG_LEVELS.join(", ")),
        });
    }
}
