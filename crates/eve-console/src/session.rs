// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Console session context
//!
//! Everything a dispatcher action touches lives here: the open SDK session,
//! the feature toggles, the stored configuration they reset to and save
//! into, and the capture writer.

use std::path::{Path, PathBuf};

use eve_config::{save_config, EveConfig, FeatureFlags, FeatureId};
use eve_sdk::{DeviceStatus, EveBackend, SdkSession};
use tracing::{debug, info};

use crate::capture::{CaptureKind, CaptureReport, CaptureWriter};
use crate::error::HarnessResult;
use crate::features::FeatureToggles;

pub struct Session<B: EveBackend> {
    sdk: SdkSession<B>,
    toggles: FeatureToggles,
    /// Configuration as stored on disk; the reset baseline
    stored: EveConfig,
    config_path: PathBuf,
    writer: CaptureWriter,
}

impl<B: EveBackend> Session<B> {
    /// Open the SDK and push the stored feature flags to it
    ///
    /// `stored` is the configuration as read from `config_path`; `effective`
    /// is the same configuration with environment and CLI overrides applied,
    /// and supplies the bus, SDK and output settings. Overrides are never
    /// written back on save.
    pub fn start(
        backend: B,
        stored: EveConfig,
        effective: &EveConfig,
        config_path: impl Into<PathBuf>,
    ) -> HarnessResult<Self> {
        let sdk = SdkSession::open(backend, &effective.i2c, &effective.eve)?;
        let mut session = Self {
            sdk,
            toggles: FeatureToggles::new(&stored),
            stored,
            config_path: config_path.into(),
            writer: CaptureWriter::new(&effective.output),
        };
        session.apply_features()?;
        info!(
            enabled = session.toggles.flags().enabled_count(),
            "Feature configuration applied"
        );
        Ok(session)
    }

    pub fn features(&self) -> FeatureFlags {
        self.toggles.flags()
    }

    pub fn stored_config(&self) -> &EveConfig {
        &self.stored
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn writer(&self) -> &CaptureWriter {
        &self.writer
    }

    pub fn backend(&self) -> &B {
        self.sdk.backend()
    }

    pub fn status(&self) -> DeviceStatus {
        self.sdk.status()
    }

    /// True when the in-memory flags differ from the stored ones
    pub fn has_unsaved_changes(&self) -> bool {
        self.toggles.flags() != self.stored.features.flags()
    }

    /// Capture from the device and write what came back
    ///
    /// A device error is returned before any file is touched.
    pub fn capture(&mut self, kind: CaptureKind) -> HarnessResult<CaptureReport> {
        let result = self.sdk.capture(kind.request())?;
        debug!(
            frame_id = result.frame_id,
            image = result.image.is_some(),
            metadata = result.metadata.is_some(),
            "Frame received"
        );
        Ok(self.writer.save(kind, &result))
    }

    /// Flip one feature; returns its value after the device has applied it
    pub fn toggle(&mut self, feature: FeatureId) -> HarnessResult<bool> {
        self.toggles.toggle(feature);
        self.apply_features()?;
        Ok(self.toggles.is_enabled(feature))
    }

    pub fn enable_all(&mut self) -> HarnessResult<()> {
        self.toggles.enable_all();
        self.apply_features()
    }

    pub fn disable_all(&mut self) -> HarnessResult<()> {
        self.toggles.disable_all();
        self.apply_features()
    }

    /// Drop unsaved edits and go back to the stored flags
    pub fn reset_to_defaults(&mut self) -> HarnessResult<()> {
        self.toggles.reset_to_defaults(&self.stored);
        self.apply_features()
    }

    /// Write the current flags to the config file
    ///
    /// On success the saved configuration becomes the new reset baseline.
    pub fn save_settings(&mut self) -> HarnessResult<&Path> {
        let committed = self.toggles.commit(&self.stored);
        save_config(&committed, &self.config_path)?;
        self.stored = committed;
        info!(path = %self.config_path.display(), "Settings saved");
        Ok(&self.config_path)
    }

    pub fn register_face_id(&mut self) -> HarnessResult<()> {
        self.sdk.register_face_id()?;
        Ok(())
    }

    pub fn clear_face_ids(&mut self) -> HarnessResult<()> {
        self.sdk.clear_face_ids()?;
        Ok(())
    }

    /// Switch ULP mode; returns the new state
    pub fn toggle_ulp(&mut self) -> HarnessResult<bool> {
        let enabled = !self.sdk.status().ulp_enabled;
        self.sdk.set_ulp(enabled)?;
        info!(enabled, "ULP mode changed");
        Ok(enabled)
    }

    /// Shut the SDK down
    pub fn shutdown(self) -> HarnessResult<()> {
        self.sdk.close()?;
        Ok(())
    }

    /// Push the flags to the device, then take its readback if it has one
    fn apply_features(&mut self) -> HarnessResult<()> {
        self.sdk.configure_features(&self.toggles.flags())?;
        if let Some(report) = self.sdk.device_feature_state()? {
            self.toggles.sync_from_device(&report);
        }
        Ok(())
    }
}
