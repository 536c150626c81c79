// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # eve-observability
//!
//! Logging infrastructure shared by the EVE crates.
//!
//! Provides consistent `tracing` setup with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: JSON log files per run with retention (desktop only)

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known EVE crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &["eve-config", "eve-sdk", "eve-console", "eve-observability"];
