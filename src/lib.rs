//! # EVE - camera/sensor SDK test console
//!
//! Interactive harness for exercising the EVE camera/sensor SDK (face and
//! person detection, hand landmarks, face ID, object detection) on embedded
//! Linux. The operator toggles AI feature flags, triggers frame and metadata
//! captures, and persists settings to the configuration file.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! eve = "0.3"  # Default: interactive console included
//! ```
//!
//! ## Feature Flags
//!
//! - **`console`** (default): feature toggles, capture output and the
//!   command loop
//! - **`file-logging`**: per-run JSON log files
//!
//! ## Usage Examples
//!
//! ### Capture a frame without the console
//!
//! ```rust,no_run
//! use eve::prelude::*;
//!
//! let config = load_config(std::path::Path::new("eve_configuration.toml"))?;
//! let mut session = SdkSession::open(SimulatedBackend::new(), &config.i2c, &config.eve)?;
//! session.configure_features(&config.features.flags())?;
//! let frame = session.capture(CaptureRequest::BOTH)?;
//! println!("frame {}", frame.frame_id);
//! session.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Scripted console run
//!
//! ```rust,no_run
//! use eve::console::{run_console, ConsoleOptions};
//! use eve::prelude::*;
//!
//! let path = find_config_file()?;
//! let stored = load_config(&path)?;
//! let options = ConsoleOptions {
//!     effective: stored.clone(),
//!     stored,
//!     config_path: path,
//!     save_on_exit: false,
//! };
//! run_console(SimulatedBackend::new(), options, "c\nx\n".as_bytes(), std::io::stdout())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: eve-config, eve-observability              │
//! │  (Config store, logging)                                │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Device: eve-sdk                                        │
//! │  (EveBackend trait, SdkSession, simulated device)       │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application: eve-console                               │
//! │  (Feature toggles, dispatcher, capture output)          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use eve_config as config;
pub use eve_observability as observability;

// Re-export device layer
pub use eve_sdk as sdk;

// Re-export application
#[cfg(feature = "console")]
pub use eve_console as console;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::config::{
        find_config_file, load_config, save_config, validate_config, ConfigError, EveConfig,
        FeatureFlags, FeatureId,
    };

    pub use crate::sdk::{
        CaptureRequest, CaptureResult, CapturedImage, EveBackend, SdkError, SdkSession,
    };

    #[cfg(feature = "console")]
    pub use crate::console::{FeatureToggles, HarnessError, Session};

    pub use crate::sdk::SimulatedBackend;
}
