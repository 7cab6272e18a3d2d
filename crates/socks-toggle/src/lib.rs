//! socks-toggle library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # Layers
//!
//! - **`application`** – the toggle use case and the proxy controller.  They
//!   depend only on traits (`NetworkSetup`, `ConnectivityProbe`, `Notifier`,
//!   `SettingsSource`, `VpnCheck`) so every path, including the rollback, can
//!   be exercised with in-memory fakes.
//! - **`infrastructure`** – the macOS-facing adapters behind those traits:
//!   `networksetup`, `curl`, `osascript`, and the `config.conf` store.

/// Application layer: use cases.
pub mod application;

/// Infrastructure layer: OS adapters and settings storage.
pub mod infrastructure;
