//! Timeout configuration
//!
//! Resolves the effective connect and response-header timeouts of a builder.

use std::time::Duration;

use super::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};

/// Per-builder timeout overrides.
///
/// A zero override means "use the default". `disabled` wins over everything
/// and removes both timeouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Response-header wait override.
    pub timeout: Duration,
    /// Dial override.
    pub connect_timeout: Duration,
    /// Disable both timeouts.
    pub disabled: bool,
}

impl TimeoutConfig {
    /// Set the response-header timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Disable (or re-enable) both timeouts
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Effective response-header timeout, `None` when disabled.
    #[must_use]
    pub fn response_timeout(&self) -> Option<Duration> {
        match self {
            Self { disabled: true, .. } => None,
            Self { timeout, .. } if !timeout.is_zero() => Some(*timeout),
            _ => Some(DEFAULT_TIMEOUT),
        }
    }

    /// Effective dial timeout, `None` when disabled.
    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        match self {
            Self { disabled: true, .. } => None,
            Self {
                connect_timeout, ..
            } if !connect_timeout.is_zero() => Some(*connect_timeout),
            _ => Some(DEFAULT_CONNECT_TIMEOUT),
        }
    }
}
