// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # EVE SDK collaborator
//!
//! Narrow interface to the vendor camera/sensor SDK. The console only talks
//! to an [`EveBackend`] through an [`SdkSession`]; detection, the camera
//! driver and the I2C protocol all stay behind the trait.
//!
//! ```rust
//! use eve_config::{FeatureFlags, I2cConfig, SdkConfig};
//! use eve_sdk::{CaptureRequest, SdkSession, SimulatedBackend};
//!
//! let mut session = SdkSession::open(SimulatedBackend::new(), &I2cConfig::default(), &SdkConfig::default())?;
//! session.configure_features(&FeatureFlags::all(true))?;
//! let frame = session.capture(CaptureRequest::BOTH)?;
//! assert_eq!(frame.frame_id, 1);
//! session.close()?;
//! # Ok::<(), eve_sdk::SdkError>(())
//! ```

pub mod error;
pub mod hal;
pub mod platforms;
pub mod session;
pub mod types;

pub use error::{SdkError, SdkResult};
pub use hal::EveBackend;
pub use session::SdkSession;
pub use types::{
    CaptureRequest, CaptureResult, CapturedImage, DeviceStatus, FeatureState, FeatureStateReport,
};

#[cfg(feature = "simulated")]
pub use platforms::SimulatedBackend;
