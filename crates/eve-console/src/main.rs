// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use eve_config::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    validate_config, EveConfig,
};
use eve_console::{forward_lines, menu, run_console, ChannelInput, ConsoleOptions, InputEvent};
use eve_observability::{CrateDebugFlags, LoggingGuard};
use eve_sdk::SimulatedBackend;

/// EVE Console - interactive test harness for the EVE camera/sensor SDK
#[derive(Parser, Debug)]
#[command(
    name = "eve-console",
    version,
    author,
    long_about = None,
    after_help = eve_observability::debug_flags_help()
)]
struct Args {
    /// Path to the configuration file (default: search for eve_configuration.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for captured image and metadata files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// I2C bus number
    #[arg(long)]
    i2c_bus: Option<u8>,

    /// Maximum frame width requested from the SDK
    #[arg(long)]
    max_width: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Write JSON logs for this run under DIR
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Enable debug logging for crates (comma-separated, or "all")
    #[arg(long, value_delimiter = ',')]
    debug: Vec<String>,

    /// Save feature settings when the console exits
    #[arg(long, default_value_t = false)]
    save_on_exit: bool,

    /// Simulate an FPGA-backed module (feature readback, ULP mode)
    #[arg(long, default_value_t = false)]
    simulate_fpga: bool,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        if let Some(bus) = self.i2c_bus {
            overrides.insert("i2c_bus".to_string(), bus.to_string());
        }
        if let Some(width) = self.max_width {
            overrides.insert("max_width".to_string(), width.to_string());
        }
        if let Some(dir) = &self.output_dir {
            overrides.insert("output_dir".to_string(), dir.display().to_string());
        }
        if let Some(level) = &self.log_level {
            overrides.insert("log_level".to_string(), level.clone());
        }
        overrides
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => find_config_file()?,
    };
    let stored = load_config(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let mut effective = stored.clone();
    apply_environment_overrides(&mut effective);
    apply_cli_overrides(&mut effective, &args.overrides());
    validate_config(&effective)?;

    let _logging = init_logging(&args, &effective)?;

    menu::banner(&mut io::stdout())?;
    info!(config = %config_path.display(), "🚀 Starting EVE console");

    let backend = SimulatedBackend::new().with_fpga(args.simulate_fpga);
    let options = ConsoleOptions {
        stored,
        effective,
        config_path,
        save_on_exit: args.save_on_exit,
    };
    run_console(backend, options, operator_input(), io::stdout().lock())
        .context("EVE console stopped with an error")?;
    Ok(())
}

/// Stdin lines and Ctrl+C, merged into one event stream
fn operator_input() -> ChannelInput {
    let (tx, rx) = mpsc::channel();

    let interrupt_tx = tx.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = interrupt_tx.send(InputEvent::Interrupted);
    }) {
        warn!("Failed to install Ctrl+C handler: {}", e);
    }

    // Detached: a read blocked on stdin must not hold up exit
    thread::spawn(move || forward_lines(io::stdin().lock(), tx));

    ChannelInput::new(rx)
}

fn init_logging(args: &Args, config: &EveConfig) -> Result<LoggingGuard> {
    let mut debug_flags = CrateDebugFlags::from_crate_names(&args.debug);
    debug_flags.merge_env();
    let level = if args.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    let log_dir = args
        .log_dir
        .clone()
        .or_else(|| config.logging.file_logging.then(|| config.logging.log_dir.clone()));

    #[cfg(feature = "file-logging")]
    {
        if let Some(dir) = log_dir {
            let guard =
                eve_observability::init_logging(&debug_flags, level, Some(dir), None, None)?;
            if let Some(run_dir) = guard.log_dir() {
                info!(dir = %run_dir.display(), "File logging enabled");
            }
            return Ok(guard);
        }
    }

    #[cfg(not(feature = "file-logging"))]
    {
        if log_dir.is_some() {
            eprintln!("File logging unavailable: built without the file-logging feature");
        }
    }

    eve_observability::init_console_logging(&debug_flags, level)
}
