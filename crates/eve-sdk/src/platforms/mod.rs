// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Backend implementations
///
/// Each module implements [`crate::hal::EveBackend`]. Vendor bindings live
/// outside this crate and plug in through the same trait.
///
/// Available backends:
/// - Simulated device (feature `simulated`)

#[cfg(feature = "simulated")]
pub mod simulated;

#[cfg(feature = "simulated")]
pub use simulated::SimulatedBackend;
