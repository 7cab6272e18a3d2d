//! Storage infrastructure: settings file persistence.
//!
//! The `config` sub-module handles:
//!
//! - Reading `config.conf` when it exists.
//! - Prompting for every setting on first run and writing the answers back.
//! - Overwriting the file on save.
//!
//! The text format itself lives in `socks_toggle_core::format`.

pub mod config;

pub use config::{ConfigStore, DEFAULT_CONFIG_PATH};
