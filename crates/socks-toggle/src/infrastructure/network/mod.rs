//! Network adapters.
//!
//! - [`NetworksetupCli`] drives `/usr/sbin/networksetup` for the three SOCKS
//!   proxy operations (query, set host/port, set state).
//! - [`CurlProbe`] checks connectivity through the configured SOCKS endpoint.

pub mod networksetup;
pub mod probe;

pub use networksetup::NetworksetupCli;
pub use probe::CurlProbe;
