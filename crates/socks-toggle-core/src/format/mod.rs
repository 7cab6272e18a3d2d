//! The persisted settings file.
//!
//! Plain text, one `KEY=VALUE` pair per line:
//!
//! ```text
//! WIFI_SERVICE=Wi-Fi
//! PROXY_IP=10.64.0.1
//! PROXY_PORT=1080
//! CHECK_MULLVAD=false
//! ```
//!
//! Reading and writing the file itself is the storage adapter's job; this
//! module only converts between text and [`Settings`](crate::Settings).

pub mod error;
pub mod key_value;

pub use error::ConfigError;
pub use key_value::{parse_settings, render_settings};
