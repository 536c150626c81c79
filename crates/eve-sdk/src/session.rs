// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Initialized-device handle
//!
//! `SdkSession` owns an initialized backend. The backend is shut down exactly
//! once: either through [`SdkSession::close`] or, on every other exit path
//! (early return, `?`, panic unwinding), when the session is dropped.

use eve_config::{FeatureFlags, I2cConfig, SdkConfig};
use tracing::{debug, info, warn};

use crate::error::SdkResult;
use crate::hal::EveBackend;
use crate::types::{CaptureRequest, CaptureResult, DeviceStatus, FeatureStateReport};

pub struct SdkSession<B: EveBackend> {
    backend: B,
    open: bool,
}

impl<B: EveBackend> SdkSession<B> {
    /// Initialize `backend` and take ownership of it
    ///
    /// Nothing is acquired when initialization fails, so no shutdown is issued.
    pub fn open(mut backend: B, i2c: &I2cConfig, sdk: &SdkConfig) -> SdkResult<Self> {
        info!(
            backend = backend.name(),
            bus = i2c.bus,
            address = i2c.device_address,
            "Initializing EVE SDK"
        );
        backend.initialize(i2c, sdk)?;
        info!("EVE SDK initialized");
        Ok(Self {
            backend,
            open: true,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn configure_features(&mut self, features: &FeatureFlags) -> SdkResult<()> {
        debug!(enabled = features.enabled_count(), "Configuring features");
        self.backend.configure_features(features)
    }

    pub fn device_feature_state(&mut self) -> SdkResult<Option<FeatureStateReport>> {
        self.backend.device_feature_state()
    }

    pub fn capture(&mut self, request: CaptureRequest) -> SdkResult<CaptureResult> {
        debug!(image = request.image, metadata = request.metadata, "Capture requested");
        self.backend.capture(request)
    }

    pub fn status(&self) -> DeviceStatus {
        self.backend.status()
    }

    pub fn set_ulp(&mut self, enabled: bool) -> SdkResult<()> {
        self.backend.set_ulp(enabled)
    }

    pub fn register_face_id(&mut self) -> SdkResult<()> {
        self.backend.register_face_id()
    }

    pub fn clear_face_ids(&mut self) -> SdkResult<()> {
        self.backend.clear_face_ids()
    }

    /// Shut the backend down and report the outcome
    pub fn close(mut self) -> SdkResult<()> {
        self.open = false;
        info!(backend = self.backend.name(), "Stopping EVE SDK");
        self.backend.shutdown()
    }
}

impl<B: EveBackend> Drop for SdkSession<B> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        info!(backend = self.backend.name(), "Stopping EVE SDK (session dropped)");
        if let Err(e) = self.backend.shutdown() {
            warn!("Error during SDK shutdown: {}", e);
        }
    }
}
