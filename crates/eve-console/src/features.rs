// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Feature toggle state machine
//!
//! The operator edits the enabled flag of each feature. A device with
//! readback may also report the rate each pipeline runs at. Edits stay in
//! memory until [`FeatureToggles::commit`] folds them into a configuration,
//! which the caller then persists through the config store.

use eve_config::{ConfigResult, EveConfig, FeatureFlags, FeatureId};
use eve_sdk::FeatureState;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureToggles {
    flags: FeatureFlags,
    /// Last `max_ips` the device reported, by feature index
    reported_ips: [Option<u32>; FeatureId::COUNT],
}

impl FeatureToggles {
    /// Start from the flags recorded in `config`
    pub fn new(config: &EveConfig) -> Self {
        Self {
            flags: config.features.flags(),
            reported_ips: [None; FeatureId::COUNT],
        }
    }

    pub fn flags(&self) -> FeatureFlags {
        self.flags
    }

    pub fn is_enabled(&self, feature: FeatureId) -> bool {
        self.flags.get(feature)
    }

    /// Flip one feature and return its new value
    pub fn toggle(&mut self, feature: FeatureId) -> bool {
        let enabled = !self.flags.get(feature);
        self.flags.set(feature, enabled);
        debug!(feature = feature.name(), enabled, "Feature toggled");
        enabled
    }

    /// Flip a feature given by its configuration name
    ///
    /// # Errors
    /// `ConfigError::UnknownFeature` if `name` is not one of the fixed features
    pub fn toggle_by_name(&mut self, name: &str) -> ConfigResult<bool> {
        let feature: FeatureId = name.parse()?;
        Ok(self.toggle(feature))
    }

    pub fn enable_all(&mut self) {
        self.flags = FeatureFlags::all(true);
    }

    pub fn disable_all(&mut self) {
        self.flags = FeatureFlags::all(false);
    }

    /// Discard in-memory edits and take the flags stored in `config`
    pub fn reset_to_defaults(&mut self, config: &EveConfig) {
        self.flags = config.features.flags();
    }

    /// Rate the device last reported for `feature`
    pub fn reported_ips(&self, feature: FeatureId) -> Option<u32> {
        self.reported_ips[feature.index()]
    }

    /// Copy of `config` with the current flags in its feature section
    ///
    /// Reported rates replace `max_ips`; features the device never reported
    /// on keep theirs. Nothing is written; pass the result to
    /// `eve_config::save_config`.
    pub fn commit(&self, config: &EveConfig) -> EveConfig {
        let mut committed = config.clone();
        committed.features.set_flags(&self.flags);
        for feature in FeatureId::ALL {
            if let Some(ips) = self.reported_ips(feature) {
                committed.features.get_mut(feature).max_ips = Some(ips);
            }
        }
        committed
    }

    /// Take the device's view for every feature it reported on
    pub fn sync_from_device(&mut self, report: &[FeatureState]) {
        for state in report {
            let feature = state.feature;
            if self.flags.get(feature) != state.enabled {
                debug!(
                    feature = feature.name(),
                    enabled = state.enabled,
                    "Device overrode feature state"
                );
            }
            self.flags.set(feature, state.enabled);
            if state.max_ips.is_some() {
                self.reported_ips[feature.index()] = state.max_ips;
            }
        }
    }
}
