// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! EVE Console Library
//!
//! Interactive harness around the EVE SDK: feature toggles, captures and the
//! menu-driven command loop. The `eve-console` binary is a thin CLI wrapper
//! over [`run_console`].

pub mod capture;
pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod features;
pub mod input;
pub mod menu;
pub mod session;

use std::io::Write;
use std::path::PathBuf;

use eve_config::EveConfig;
use eve_sdk::EveBackend;
use tracing::{info, warn};

pub use capture::{CaptureKind, CaptureOutcome, CaptureReport, CaptureWriter, SaveStatus};
pub use dispatcher::{Dispatcher, Flow, MenuState};
pub use error::{HarnessError, HarnessResult};
pub use features::FeatureToggles;
pub use input::{forward_lines, ChannelInput, InputEvent, InputSource};
pub use session::Session;

/// Inputs for one console run
pub struct ConsoleOptions {
    /// Configuration as stored in the config file
    pub stored: EveConfig,
    /// Stored configuration with environment and CLI overrides applied
    pub effective: EveConfig,
    pub config_path: PathBuf,
    /// Save feature edits when the loop ends
    pub save_on_exit: bool,
}

/// Open the SDK, run the command loop, then shut the SDK down
///
/// The SDK is released on every path out of this function; an error in the
/// loop still drops the session, which shuts the device down. A failed
/// shutdown after a normal exit is reported but does not fail the run.
pub fn run_console<B, I, W>(
    backend: B,
    options: ConsoleOptions,
    input: I,
    output: W,
) -> HarnessResult<()>
where
    B: EveBackend,
    I: InputSource,
    W: Write,
{
    let mut session = Session::start(
        backend,
        options.stored,
        &options.effective,
        options.config_path,
    )?;

    let mut dispatcher = Dispatcher::new(input, output);
    dispatcher.run(&mut session)?;

    if options.save_on_exit && session.has_unsaved_changes() {
        match session.save_settings() {
            Ok(path) => info!(path = %path.display(), "Settings saved on exit"),
            Err(e) => warn!("Failed to save settings on exit: {}", e),
        }
    }

    let mut output = dispatcher.into_output();
    match session.shutdown() {
        Ok(()) => info!("✅ EVE console shutdown complete"),
        Err(e) => {
            warn!("SDK shutdown failed: {}", e);
            writeln!(output, "⚠️  SDK cleanup warning: {}", e)?;
        }
    }
    Ok(())
}
