//! Crate error type.
//!
//! The engine itself never fails: unrecognized hardware degrades to fallback labels and redundant
//! edges are absorbed. Errors only come from the edges of the crate (config files, the event
//! channel, snapshot export and backend start-up).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The event loop has stopped and no longer accepts events.
    #[error("engine event loop is closed")]
    Closed,

    #[cfg(feature = "gilrs")]
    #[cfg_attr(docsrs, doc(cfg(feature = "gilrs")))]
    #[error("gamepad backend failed: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, Error>;
