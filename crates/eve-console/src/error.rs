// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Console error types

use std::path::PathBuf;
use thiserror::Error;

use eve_config::ConfigError;
use eve_sdk::SdkError;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error("Unknown command: '{0}'")]
    UnrecognizedCommand(String),

    #[error("Failed to write {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode {}: {message}", .path.display())]
    ImageEncode { path: PathBuf, message: String },

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
