//! Error types for the relay cycler firmware.
//!
//! The control loop itself has no failable operations: digital and analog
//! reads always yield a value and diagnostics are fire-and-forget.  What
//! can fail is bring-up: an invalid configuration or a peripheral that
//! refuses to initialise.  Both are `Copy` so they pass through `anyhow`
//! at the binary boundary without allocation on the error path.

use core::fmt;

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from [`SystemConfig::validate`](crate::config::SystemConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::error::Error for ConfigError {}
