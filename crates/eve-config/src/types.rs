// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `eve_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ConfigError;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EveConfig {
    pub i2c: I2cConfig,
    pub eve: SdkConfig,
    pub features: FeaturesConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// I2C bus settings used to reach the camera module
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct I2cConfig {
    pub bus: u8,
    pub device_address: u8,
    pub irq_pin: u8,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            bus: 0,
            device_address: 0x30,
            irq_pin: 26,
        }
    }
}

/// EVE SDK settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SdkConfig {
    pub comport: u32,
    pub pipeline_version: u32,
    pub eve_path: PathBuf,
    pub driver_path: PathBuf,
    /// Ask the SDK for JPEG-encoded frames instead of raw RGB
    pub to_jpg: bool,
    /// Copy frames out of the SDK buffers so they can be captured
    pub copy_image: bool,
    pub max_width: u32,
    pub use_metadata_camera: bool,
    pub object_detection: bool,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            comport: 0,
            pipeline_version: 0,
            eve_path: PathBuf::from("/opt/EVE-6.7.21-Source/bin"),
            driver_path: PathBuf::from("/opt/eve-cam/clnx_camDrvEn"),
            to_jpg: true,
            copy_image: true,
            max_width: 800,
            use_metadata_camera: true,
            object_detection: false,
        }
    }
}

/// Where capture results are written
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub image_file: String,
    pub metadata_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            image_file: "image.jpg".to_string(),
            metadata_file: "metadata.txt".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn image_path(&self) -> PathBuf {
        self.directory.join(&self.image_file)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.directory.join(&self.metadata_file)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    pub file_logging: bool,
    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
            log_dir: PathBuf::from("./logs"),
        }
    }
}

// ============================================================================
// FEATURES
// ============================================================================

/// AI features the SDK can be asked to run
///
/// The set is closed; the declaration order is also the settings-menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureId {
    FaceDetection,
    PersonDetection,
    HandLandmarks,
    FaceId,
    FaceIdMulti,
    ObjectDetection,
}

impl FeatureId {
    pub const COUNT: usize = 6;

    pub const ALL: [FeatureId; Self::COUNT] = [
        FeatureId::FaceDetection,
        FeatureId::PersonDetection,
        FeatureId::HandLandmarks,
        FeatureId::FaceId,
        FeatureId::FaceIdMulti,
        FeatureId::ObjectDetection,
    ];

    /// Canonical name as used in the configuration file
    pub fn name(self) -> &'static str {
        match self {
            FeatureId::FaceDetection => "face_detection",
            FeatureId::PersonDetection => "person_detection",
            FeatureId::HandLandmarks => "hand_landmarks",
            FeatureId::FaceId => "face_id",
            FeatureId::FaceIdMulti => "face_id_multi",
            FeatureId::ObjectDetection => "object_detection",
        }
    }

    /// Human-readable label for menus
    pub fn label(self) -> &'static str {
        match self {
            FeatureId::FaceDetection => "Face Detection",
            FeatureId::PersonDetection => "Person Detection",
            FeatureId::HandLandmarks => "Hand Landmarks",
            FeatureId::FaceId => "Face ID",
            FeatureId::FaceIdMulti => "Face ID Multi",
            FeatureId::ObjectDetection => "Object Detection",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Settings-menu key ('1'..='6')
    pub fn menu_key(self) -> char {
        // COUNT < 10 so the digit always exists
        char::from(b'1' + self.index() as u8)
    }

    pub fn from_menu_key(key: char) -> Option<Self> {
        let digit = key.to_digit(10)? as usize;
        if digit == 0 {
            return None;
        }
        Self::ALL.get(digit - 1).copied()
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeatureId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|feature| feature.name() == s)
            .ok_or_else(|| ConfigError::UnknownFeature(s.to_string()))
    }
}

/// Per-feature settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeatureSetting {
    pub enabled: bool,
    /// Inference rate reported by FPGA-backed devices
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ips: Option<u32>,
}

impl FeatureSetting {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled,
            max_ips: None,
        }
    }
}

/// `[features.*]` section
///
/// One field per [`FeatureId`]; a feature missing from the file deserializes
/// as disabled, unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub face_detection: FeatureSetting,
    pub person_detection: FeatureSetting,
    pub hand_landmarks: FeatureSetting,
    pub face_id: FeatureSetting,
    pub face_id_multi: FeatureSetting,
    pub object_detection: FeatureSetting,
}

impl FeaturesConfig {
    pub fn get(&self, feature: FeatureId) -> &FeatureSetting {
        match feature {
            FeatureId::FaceDetection => &self.face_detection,
            FeatureId::PersonDetection => &self.person_detection,
            FeatureId::HandLandmarks => &self.hand_landmarks,
            FeatureId::FaceId => &self.face_id,
            FeatureId::FaceIdMulti => &self.face_id_multi,
            FeatureId::ObjectDetection => &self.object_detection,
        }
    }

    pub fn get_mut(&mut self, feature: FeatureId) -> &mut FeatureSetting {
        match feature {
            FeatureId::FaceDetection => &mut self.face_detection,
            FeatureId::PersonDetection => &mut self.person_detection,
            FeatureId::HandLandmarks => &mut self.hand_landmarks,
            FeatureId::FaceId => &mut self.face_id,
            FeatureId::FaceIdMulti => &mut self.face_id_multi,
            FeatureId::ObjectDetection => &mut self.object_detection,
        }
    }

    /// Snapshot of the enabled flags
    pub fn flags(&self) -> FeatureFlags {
        let mut flags = FeatureFlags::default();
        for feature in FeatureId::ALL {
            flags.set(feature, self.get(feature).enabled);
        }
        flags
    }

    /// Overwrite the enabled flags, leaving every other per-feature field alone
    pub fn set_flags(&mut self, flags: &FeatureFlags) {
        for (feature, enabled) in flags.iter() {
            self.get_mut(feature).enabled = enabled;
        }
    }
}

/// Enabled state of every feature, indexed by [`FeatureId`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeatureFlags([bool; FeatureId::COUNT]);

impl FeatureFlags {
    pub fn all(enabled: bool) -> Self {
        Self([enabled; FeatureId::COUNT])
    }

    pub fn get(&self, feature: FeatureId) -> bool {
        self.0[feature.index()]
    }

    pub fn set(&mut self, feature: FeatureId, enabled: bool) {
        self.0[feature.index()] = enabled;
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, bool)> + '_ {
        FeatureId::ALL.iter().map(move |&feature| (feature, self.get(feature)))
    }

    pub fn enabled_count(&self) -> usize {
        self.0.iter().filter(|enabled| **enabled).count()
    }
}
