// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! SDK error types

use thiserror::Error;

/// Errors reported by an EVE backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    /// Initialization of the device or SDK failed
    #[error("SDK initialization failed: {0}")]
    Init(String),

    /// Frame or metadata capture failed
    #[error("Capture failed: {0}")]
    Capture(String),

    /// Feature configuration was rejected
    #[error("Feature configuration failed: {0}")]
    Configure(String),

    /// Operation attempted before `initialize` or after `shutdown`
    #[error("SDK not initialized")]
    NotInitialized,

    /// The device does not support the operation in its current setup
    #[error("Not available: {0}")]
    Unsupported(String),

    /// Releasing the device failed
    #[error("SDK shutdown failed: {0}")]
    Shutdown(String),
}

/// SDK result type
pub type SdkResult<T> = std::result::Result<T, SdkError>;
