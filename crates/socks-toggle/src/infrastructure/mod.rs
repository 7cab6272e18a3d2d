//! Infrastructure layer: macOS-facing adapters.
//!
//! **Dependency rule**: this layer implements the traits declared in
//! `application`, never the other way round.
//!
//! - **`process`** – the [`CommandRunner`](process::CommandRunner) every
//!   adapter shells out through.
//! - **`network`** – `networksetup` for the SOCKS proxy settings and the
//!   `curl` connectivity probe.
//! - **`notification`** – `osascript` desktop notifications.
//! - **`storage`** – the `config.conf` settings store with first-run prompt.
//! - **`vpn`** – the secondary VPN check extension point.

pub mod network;
pub mod notification;
pub mod process;
pub mod storage;
pub mod vpn;
