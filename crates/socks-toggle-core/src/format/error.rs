//! Error type for settings persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, prompting for, or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("failed to read configuration file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file could not be created or written.
    #[error("failed to write to configuration file at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading an answer or writing a question on the terminal failed.
    #[error("failed to prompt for settings: {0}")]
    Prompt(#[source] std::io::Error),
}
