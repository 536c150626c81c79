// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading and saving with override support
//!
//! Loading is layered:
//! 1. TOML file (base values, missing fields take defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)
//!
//! [`load_config`] only performs step 1 so that the stored configuration can
//! be written back without leaking overrides into the file.

use crate::{ConfigError, ConfigResult, EveConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "eve_configuration.toml";

/// Find the EVE configuration file
///
/// Search order:
/// 1. `EVE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./eve_configuration.toml`
/// 3. Parent directories (up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("EVE_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "config file specified by EVE_CONFIG_PATH does not exist: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(cwd.ancestors().skip(1).take(5).map(|dir| dir.join(CONFIG_FILE_NAME)));
    }

    if let Some(found) = search_paths.iter().find(|path| path.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet EVE_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load the configuration stored at `path`
///
/// No overrides are applied and nothing is written.
///
/// # Errors
///
/// `FileNotFound` if the file is missing, `ParseError` for invalid TOML,
/// `IoError` for any other read failure.
pub fn load_config(path: &Path) -> ConfigResult<EveConfig> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()),
        _ => ConfigError::IoError(err),
    })?;

    let config: EveConfig = toml::from_str(&content)?;
    debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Write `config` to `path`, replacing the previous contents
///
/// # Errors
///
/// Returns `ConfigError::WriteError` if serialization or the write fails
pub fn save_config(config: &EveConfig, path: &Path) -> ConfigResult<()> {
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)
        .map_err(|err| ConfigError::WriteError(format!("{}: {}", path.display(), err)))?;
    info!(path = %path.display(), "Configuration saved");
    Ok(())
}

/// Parse an integer that may be written as decimal or `0x`-prefixed hex
fn parse_u8(value: &str) -> Option<u8> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `EVE_I2C_BUS` -> `i2c.bus`
/// - `EVE_I2C_DEVICE_ADDRESS` -> `i2c.device_address` (decimal or hex)
/// - `EVE_I2C_IRQ_PIN` -> `i2c.irq_pin`
/// - `EVE_SDK_PATH` -> `eve.eve_path`
/// - `EVE_DRIVER_PATH` -> `eve.driver_path`
/// - `EVE_MAX_WIDTH` -> `eve.max_width`
/// - `EVE_OUTPUT_DIR` -> `output.directory`
/// - `EVE_LOG_LEVEL` -> `logging.level`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut EveConfig) {
    if let Some(bus) = env::var("EVE_I2C_BUS").ok().as_deref().and_then(parse_u8) {
        config.i2c.bus = bus;
    }
    if let Some(address) = env::var("EVE_I2C_DEVICE_ADDRESS").ok().as_deref().and_then(parse_u8) {
        config.i2c.device_address = address;
    }
    if let Some(pin) = env::var("EVE_I2C_IRQ_PIN").ok().as_deref().and_then(parse_u8) {
        config.i2c.irq_pin = pin;
    }
    if let Ok(value) = env::var("EVE_SDK_PATH") {
        config.eve.eve_path = PathBuf::from(value);
    }
    if let Ok(value) = env::var("EVE_DRIVER_PATH") {
        config.eve.driver_path = PathBuf::from(value);
    }
    if let Ok(value) = env::var("EVE_MAX_WIDTH") {
        if let Ok(width) = value.parse::<u32>() {
            config.eve.max_width = width;
        }
    }
    if let Ok(value) = env::var("EVE_OUTPUT_DIR") {
        config.output.directory = PathBuf::from(value);
    }
    if let Ok(value) = env::var("EVE_LOG_LEVEL") {
        config.logging.level = value.to_lowercase();
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Map of CLI arguments (e.g., `{"i2c_bus": "1", "max_width": "640"}`)
pub fn apply_cli_overrides(config: &mut EveConfig, cli_args: &HashMap<String, String>) {
    if let Some(bus) = cli_args.get("i2c_bus").and_then(|v| parse_u8(v)) {
        config.i2c.bus = bus;
    }
    if let Some(address) = cli_args.get("i2c_device_address").and_then(|v| parse_u8(v)) {
        config.i2c.device_address = address;
    }
    if let Some(value) = cli_args.get("max_width") {
        if let Ok(width) = value.parse::<u32>() {
            config.eve.max_width = width;
        }
    }
    if let Some(value) = cli_args.get("output_dir") {
        config.output.directory = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.to_lowercase();
    }
}
