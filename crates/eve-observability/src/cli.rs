//! Per-crate debug flags
//!
//! Crates are named on the command line (`--debug eve-sdk,eve-console`) or
//! through the `EVE_DEBUG` environment variable.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Crates whose logs should be emitted at debug level
///
/// # Example
/// ```rust
/// use eve_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_crate_names(["eve-sdk"]);
/// assert!(flags.is_enabled("eve-sdk"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Build flags from a list of crate names (`all` enables every known crate)
    pub fn from_crate_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::default();
        for name in names {
            flags.enable(name.as_ref());
        }
        flags
    }

    /// Enable one crate, or all known crates for `all`
    pub fn enable(&mut self, crate_name: &str) {
        let crate_name = crate_name.trim();
        if crate_name.is_empty() {
            return;
        }
        if crate_name == "all" {
            self.enabled_crates
                .extend(KNOWN_CRATES.iter().map(|name| name.to_string()));
        } else {
            self.enabled_crates.insert(crate_name.to_string());
        }
    }

    /// Merge names from the `EVE_DEBUG` environment variable (comma-separated)
    pub fn merge_env(&mut self) {
        if let Ok(env_var) = env::var("EVE_DEBUG") {
            for crate_name in env_var.split(',') {
                self.enable(crate_name);
            }
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Get log level for a crate
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create an `EnvFilter` directive string
    ///
    /// Tracing targets use the crate's module path, so `eve-sdk` becomes
    /// `eve_sdk=debug`. `default_level` applies to everything else.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .iter()
            .map(|name| format!("{}=debug", name.replace('-', "_")))
            .collect();
        filters.push(default_level.to_string());
        filters.join(",")
    }
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug all                    Enable debug logging for all crates
  --debug {{crate-name}}[,...]     Enable debug logging for specific crates

Available crates:
  {}

Environment Variable:
  EVE_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  EVE_DEBUG=all                             Enable debug for all crates
"#,
        KNOWN_CRATES.join(", ")
    )
}
