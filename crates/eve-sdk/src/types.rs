// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Data exchanged with an EVE backend

use eve_config::FeatureId;

/// Which parts of a frame to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRequest {
    pub image: bool,
    pub metadata: bool,
}

impl CaptureRequest {
    pub const BOTH: Self = Self {
        image: true,
        metadata: true,
    };
    pub const IMAGE_ONLY: Self = Self {
        image: true,
        metadata: false,
    };
    pub const METADATA_ONLY: Self = Self {
        image: false,
        metadata: true,
    };
}

/// Frame pixels as handed out by the SDK
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedImage {
    /// Already JPEG-encoded (SDK `to_jpg` mode)
    Jpeg(Vec<u8>),
    /// Interleaved 8-bit RGB, `width * height * 3` bytes
    Rgb {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
}

/// One capture from the SDK
///
/// Either part may be missing even when it was requested; the SDK only hands
/// out what it has for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureResult {
    pub frame_id: u64,
    pub image: Option<CapturedImage>,
    /// Detection results keyed by feature name
    pub metadata: Option<serde_json::Value>,
}

/// Snapshot shown in the console status line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStatus {
    pub frame_id: u64,
    pub fpga_enabled: bool,
    pub metadata_camera: bool,
    pub ulp_enabled: bool,
}

/// One feature as read back from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureState {
    pub feature: FeatureId,
    pub enabled: bool,
    /// Inference rate the pipeline runs at, when the device reports one
    pub max_ips: Option<u32>,
}

/// Feature state read back from the device after configuration
///
/// Only lists the features the device reports on.
pub type FeatureStateReport = Vec<FeatureState>;
