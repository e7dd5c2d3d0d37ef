//! Effective connect-timeout computation
//!
//! The raw setting comes from configuration and is untrusted: it may be
//! missing, a TOML integer, or an arbitrary string. Absent or unparsable
//! input degrades silently to zero, and the result is always clamped into
//! [`MIN_CONNECT_TIMEOUT_MS`, `MAX_CONNECT_TIMEOUT_MS`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lower bound on the effective connect timeout, in milliseconds.
pub const MIN_CONNECT_TIMEOUT_MS: i64 = 3_000;

/// Upper bound on the effective connect timeout, in milliseconds.
pub const MAX_CONNECT_TIMEOUT_MS: i64 = 30_000;

/// Raw `connect_timeout` setting as it appears in configuration.
///
/// Accepts either a TOML integer or a string holding one, mirroring
/// app-settings files where every value is a string. Anything that does
/// not parse as an integer counts as zero.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TimeoutSetting {
    /// Timeout given as an integer number of milliseconds
    Millis(i64),
    /// Timeout given as a string, parsed leniently
    Text(String),
}

impl TimeoutSetting {
    /// Raw millisecond value before clamping; parse failure is zero.
    #[must_use]
    pub fn raw_millis(&self) -> i64 {
        match self {
            Self::Millis(ms) => *ms,
            Self::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

/// Effective connect timeout after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectTimeout {
    millis: u64,
}

impl ConnectTimeout {
    /// Clamp a raw millisecond value into the permitted range.
    ///
    /// Ceiling first, then floor: `max(min(30000, raw), 3000)`. The floor
    /// is applied last, so every out-of-range-low input (negative, zero,
    /// unparsable) lands on the floor.
    #[must_use]
    pub fn from_millis(raw: i64) -> Self {
        let clamped = raw.min(MAX_CONNECT_TIMEOUT_MS).max(MIN_CONNECT_TIMEOUT_MS);
        #[allow(clippy::cast_sign_loss)] // clamped >= MIN_CONNECT_TIMEOUT_MS > 0
        let millis = clamped as u64;
        Self { millis }
    }

    /// Compute the effective timeout from an optional configured setting.
    ///
    /// A missing setting behaves as zero and therefore clamps to
    /// [`MIN_CONNECT_TIMEOUT_MS`].
    #[must_use]
    pub fn from_setting(setting: Option<&TimeoutSetting>) -> Self {
        Self::from_millis(setting.map_or(0, TimeoutSetting::raw_millis))
    }

    /// Effective timeout in milliseconds.
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.millis
    }

    /// Effective timeout as a [`Duration`].
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_millis(self.millis)
    }
}
