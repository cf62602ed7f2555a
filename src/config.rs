//! Engine configuration.
//!
//! Loaded from TOML; every section and field is optional.
//!
//! ```toml
//! [ticker]
//! interval_ms = 100
//! mode = "all_held"      # or "last_pressed"
//!
//! [session]
//! prefer = "DualSense"   # bind the first controller whose name contains this
//!
//! [logging]
//! filter = "info"        # used when RUST_LOG is unset
//! ```

use crate::error::{Error, Result};
use crate::ticker::{TickerMode, DEFAULT_TICK_INTERVAL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ticker: TickerConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    pub interval_ms: u64,
    pub mode: TickerMode,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            mode: TickerMode::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub prefer: Option<String>,
}

impl SessionConfig {
    /// Whether a controller called `name` may be bound.
    pub fn accepts(&self, name: &str) -> bool {
        match &self.prefer {
            Some(wanted) => name.to_lowercase().contains(&wanted.to_lowercase()),
            None => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn ticker_interval(&self) -> Duration {
        Duration::from_millis(self.ticker.interval_ms.max(1))
    }
}
