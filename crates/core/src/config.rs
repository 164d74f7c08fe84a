//! Engine configuration via `evtc.toml`
//!
//! Every setting has a default, so an empty file (or no file at all) gives
//! the stock behavior. Unknown keys are rejected at parse time.

use crate::builds::{LogHeader, MarkerProtocol};
use crate::error::{Error, Result};
use crate::types::{Time, SERVER_DELAY_CONSTANT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up next to the logs being parsed.
pub const CONFIG_FILE_NAME: &str = "evtc.toml";

/// Engine configuration loaded from `evtc.toml`.
///
/// # Example
///
/// ```toml
/// server_delay_ms = 10
/// parallel = true
/// marker_protocol = "auto"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Default correlation epsilon, in milliseconds.
    #[serde(default = "default_server_delay_ms")]
    pub server_delay_ms: Time,
    /// Reconstruct groups and build tables on the rayon pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Marker closing behavior: `"auto"`, `"legacy"` or `"modern"`.
    #[serde(default = "default_marker_protocol")]
    pub marker_protocol: String,
    /// Player casts shorter than or equal to this are discarded.
    #[serde(default = "default_min_cast_duration_ms")]
    pub min_cast_duration_ms: Time,
    /// Keep cast ends whose start predates the log.
    #[serde(default = "default_keep_truncated_casts")]
    pub keep_truncated_casts: bool,
}

fn default_server_delay_ms() -> Time {
    SERVER_DELAY_CONSTANT
}

fn default_parallel() -> bool {
    true
}

fn default_marker_protocol() -> String {
    "auto".to_string()
}

fn default_min_cast_duration_ms() -> Time {
    1
}

fn default_keep_truncated_casts() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_delay_ms: default_server_delay_ms(),
            parallel: default_parallel(),
            marker_protocol: default_marker_protocol(),
            min_cast_duration_ms: default_min_cast_duration_ms(),
            keep_truncated_casts: default_keep_truncated_casts(),
        }
    }
}

impl EngineConfig {
    /// Marker protocol to use for a log with the given header.
    ///
    /// # Errors
    ///
    /// Returns an error if `marker_protocol` is not a known value.
    pub fn marker_protocol_for(&self, header: &LogHeader) -> Result<MarkerProtocol> {
        match self.marker_protocol.as_str() {
            "auto" => Ok(header.marker_protocol()),
            "legacy" => Ok(MarkerProtocol::Legacy),
            "modern" => Ok(MarkerProtocol::Modern),
            other => Err(Error::Config(format!(
                "Invalid marker_protocol '{}' in {}. Expected \"auto\", \"legacy\" or \"modern\".",
                other, CONFIG_FILE_NAME
            ))),
        }
    }

    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        self.marker_protocol_for(&LogHeader::new(0))?;
        if self.server_delay_ms <= 0 {
            return Err(Error::Config(format!(
                "server_delay_ms must be positive, got {}",
                self.server_delay_ms
            )));
        }
        if self.min_cast_duration_ms < 0 {
            return Err(Error::Config(format!(
                "min_cast_duration_ms must not be negative, got {}",
                self.min_cast_duration_ms
            )));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# evtc engine configuration
#
# Default epsilon of the correlation helpers, in milliseconds.
server_delay_ms = 10

# Reconstruct per-agent groups and build the event tables in parallel.
parallel = true

# Marker closing behavior: "auto" (from the log's evtc build), "legacy" or "modern".
#   "legacy" = an end closes the most recent marker, a same-id restart extends it
#   "modern" = an end closes every open marker, a same-id restart reopens it
marker_protocol = "auto"

# Player casts lasting this long or less are discarded.
min_cast_duration_ms = 1

# Keep casts whose start happened before the log started.
keep_truncated_casts = true
"#
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            Error::Config(msg) => {
                Error::Config(format!("Failed to load '{}': {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Load the config at `path`, or the defaults when the file is absent.
    pub fn from_file_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
