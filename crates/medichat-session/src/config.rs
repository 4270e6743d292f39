//! TOML-loaded session settings.
//!
//! Front-ends may point at a small TOML file to tune the artificial reply
//! delay; every field has a default matching [`DelayPolicy::default`], so
//! an empty document is a valid configuration.
//!
//! ```toml
//! reply_delay_base_ms = 1000
//! reply_delay_spread_ms = 2000
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::delay::DelayPolicy;

/// Errors produced while loading a session configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read from disk.
    #[error("failed to read config file: {reason}")]
    ReadFailed { reason: String },

    /// The configuration is not valid TOML matching the expected fields.
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },
}

/// Convenience alias for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunable session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Minimum artificial reply delay, in milliseconds.
    pub reply_delay_base_ms: u64,
    /// Width of the uniform random interval added on top of the base, in
    /// milliseconds.
    pub reply_delay_spread_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reply_delay_base_ms: 1000,
            reply_delay_spread_ms: 2000,
        }
    }
}

impl SessionConfig {
    /// Parse `s` as TOML session configuration.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        toml::from_str(s).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })
    }

    /// Read the file at `path` and parse it as TOML session configuration.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            reason: format!("'{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The delay policy this configuration describes.
    pub fn delay_policy(&self) -> DelayPolicy {
        DelayPolicy::new(
            Duration::from_millis(self.reply_delay_base_ms),
            Duration::from_millis(self.reply_delay_spread_ms),
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ConfigError, SessionConfig};
    use crate::delay::DelayPolicy;

    #[test]
    fn full_document_parses() {
        let config = SessionConfig::from_toml_str(
            "reply_delay_base_ms = 50\nreply_delay_spread_ms = 0\n",
        )
        .unwrap();
        assert_eq!(config.reply_delay_base_ms, 50);
        assert_eq!(config.reply_delay_spread_ms, 0);
        assert_eq!(
            config.delay_policy(),
            DelayPolicy::fixed(Duration::from_millis(50))
        );
    }

    /// Every field defaults, so an empty document is valid configuration.
    #[test]
    fn empty_document_uses_defaults() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config.reply_delay_base_ms, 1000);
        assert_eq!(config.reply_delay_spread_ms, 2000);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(
            SessionConfig::from_toml_str("reply_delay_base_ms = \"soon\""),
            Err(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = SessionConfig::from_file(std::path::Path::new("/no/such/medichat.toml"));
        match result {
            Err(ConfigError::ReadFailed { reason }) => {
                assert!(reason.contains("/no/such/medichat.toml"));
            }
            other => panic!("expected ReadFailed, got {:?}", other),
        }
    }
}
