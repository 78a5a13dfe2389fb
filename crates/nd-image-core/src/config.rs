//! Loader configuration.
//!
//! The defaults reproduce the timings browsers have been tuned against:
//! a 40ms poll period, an 80ms grace window after a reported failure, and
//! a 1024 square pixel area above which dimensions are trusted immediately.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Period of the shared readiness timer, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 40;

/// Delay before a reported load failure is re-checked, in milliseconds.
pub const DEFAULT_ERROR_GRACE_MS: u32 = 80;

/// Dimensions whose area exceeds this are considered known on sight.
pub const DEFAULT_AREA_THRESHOLD: u64 = 1024;

/// Tunables for a [`crate::Loader`].
///
/// Deserializes from a partial object (`{ pollIntervalMs: 20 }`); missing
/// fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoaderConfig {
    /// Period of the shared poll timer in milliseconds.
    pub poll_interval_ms: u32,
    /// Grace delay after an error notification in milliseconds.
    pub error_grace_ms: u32,
    /// Area (width × height) above which a probe resolves without a change.
    pub area_threshold: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            error_grace_ms: DEFAULT_ERROR_GRACE_MS,
            area_threshold: DEFAULT_AREA_THRESHOLD,
        }
    }
}

impl LoaderConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the configuration can drive a scheduler.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }
}
