// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use eve_config::{FeatureFlags, I2cConfig, SdkConfig};

use crate::error::{SdkError, SdkResult};
use crate::types::{CaptureRequest, CaptureResult, DeviceStatus, FeatureStateReport};

/// EVE device abstraction (vendor SDK binding, simulator, test double)
///
/// Implementations wrap the vendor's call layer; the console never looks
/// past this trait.
pub trait EveBackend {
    /// Get backend name/identifier
    fn name(&self) -> &'static str;

    /// Bring up the camera module on the given bus
    ///
    /// # Returns
    /// Ok(()) or `SdkError::Init`
    fn initialize(&mut self, i2c: &I2cConfig, sdk: &SdkConfig) -> SdkResult<()>;

    /// Push the requested feature set to the device
    fn configure_features(&mut self, features: &FeatureFlags) -> SdkResult<()>;

    /// Read back what the device actually enabled
    ///
    /// # Returns
    /// `None` when the device does not report feature state (non-FPGA setups)
    fn device_feature_state(&mut self) -> SdkResult<Option<FeatureStateReport>> {
        Ok(None)
    }

    /// Fetch the current frame and/or its metadata
    ///
    /// # Returns
    /// Capture result or `SdkError::Capture`
    fn capture(&mut self, request: CaptureRequest) -> SdkResult<CaptureResult>;

    /// Current device status
    fn status(&self) -> DeviceStatus;

    /// Switch ultra-low-power mode
    fn set_ulp(&mut self, _enabled: bool) -> SdkResult<()> {
        Err(SdkError::Unsupported(format!("ULP mode on {}", self.name())))
    }

    /// Register the face currently in view
    fn register_face_id(&mut self) -> SdkResult<()>;

    /// Forget all registered faces
    fn clear_face_ids(&mut self) -> SdkResult<()>;

    /// Release the device
    fn shutdown(&mut self) -> SdkResult<()>;
}
