//! Codec configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Maximum token age: 15 minutes.
pub const FRESHNESS_WINDOW_MS: i64 = 15 * 60 * 1000;

/// Cookie `Max-Age` matching [`FRESHNESS_WINDOW_MS`].
pub const COOKIE_MAX_AGE_SECS: u64 = (FRESHNESS_WINDOW_MS / 1000) as u64;

/// [`FRESHNESS_WINDOW_MS`] as a `Duration`.
pub fn freshness_window() -> Duration {
    Duration::from_millis(FRESHNESS_WINDOW_MS as u64)
}

/// How the CBC initialization vector is chosen for each token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IvMode {
    /// Fresh random IV per token, carried in clear as the first 16 bytes of
    /// the decoded token.
    #[default]
    PerToken,
    /// The single process-wide IV from the secret material. The token is the
    /// bare ciphertext, and equal plaintext prefixes encrypt identically.
    Fixed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub iv_mode: IvMode,
}

impl TokenConfig {
    pub fn fixed_iv() -> Self {
        Self {
            iv_mode: IvMode::Fixed,
        }
    }
}
