//! # socks-toggle-core
//!
//! Shared, I/O-free building blocks for the `socks-toggle` utility.
//!
//! The utility flips the SOCKS proxy of one macOS network service on or off,
//! checks that traffic actually flows through the proxy before leaving it
//! enabled, and tells the user what happened through a desktop notification.
//! Everything that can be expressed without touching the OS lives here:
//!
//! - **`domain`** – the [`Settings`] record, command-line overrides, the
//!   substring markers used to interpret tool output, and the notification
//!   texts produced at the end of a run.
//!
//! - **`format`** – the `KEY=VALUE` settings file: parsing, rendering and the
//!   [`ConfigError`] type reported by the storage adapter.

pub mod domain;
pub mod format;

pub use domain::notice::{Notice, ToggleReport};
pub use domain::proxy::{probe_reached_internet, socks_proxy_enabled};
pub use domain::settings::{Settings, SettingsOverrides};
pub use format::error::ConfigError;
pub use format::key_value::{parse_settings, render_settings};
