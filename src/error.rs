//! Error types for the r2int crate.
//!
//! Only configuration and file I/O can fail. Lookups outside the plane or the
//! rule space resolve to defaults, and malformed rule lines are reported as
//! [`crate::rulefile::RuleLineError`] diagnostics instead of failing the load.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for r2int operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML decoding errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// TOML encoding errors
    #[error("Config encode error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    /// Worker pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A rule file could not be read or written
    #[error("Rule file {path}: {source}")]
    RuleFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for r2int operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O error with the rule file path it concerns.
    #[must_use]
    pub fn rule_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::RuleFile {
            path: path.into(),
            source,
        }
    }
}
