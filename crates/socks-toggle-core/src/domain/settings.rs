//! The per-invocation settings record and its command-line overrides.
//!
//! A [`Settings`] value is built once per run: from the persisted file (or the
//! first-run prompt), then patched in memory with [`SettingsOverrides`] taken
//! from the command line.  Overrides are never written back to disk.

/// Default network service name passed to `networksetup`.
pub const DEFAULT_INTERFACE_NAME: &str = "Wi-Fi";
/// Default SOCKS proxy host.
pub const DEFAULT_PROXY_HOST: &str = "10.64.0.1";
/// Default SOCKS proxy port, kept as text.
pub const DEFAULT_PROXY_PORT: &str = "1080";

/// Resolved settings for one toggle run.
///
/// `proxy_port` stays a `String` so whatever the user wrote is handed to the
/// external tools byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Network service to configure (e.g. `Wi-Fi`, `USB 10/100/1000 LAN`).
    pub interface_name: String,
    /// Hostname or IP address of the SOCKS proxy.
    pub proxy_host: String,
    /// Port of the SOCKS proxy.
    pub proxy_port: String,
    /// Whether a secondary VPN check runs before the proxy is enabled.
    pub verify_via_secondary_vpn: bool,
}

impl Default for Settings {
    /// | Field                      | Default      |
    /// |----------------------------|--------------|
    /// | interface_name             | `Wi-Fi`      |
    /// | proxy_host                 | `10.64.0.1`  |
    /// | proxy_port                 | `1080`       |
    /// | verify_via_secondary_vpn   | `false`      |
    fn default() -> Self {
        Self {
            interface_name: DEFAULT_INTERFACE_NAME.to_string(),
            proxy_host: DEFAULT_PROXY_HOST.to_string(),
            proxy_port: DEFAULT_PROXY_PORT.to_string(),
            verify_via_secondary_vpn: false,
        }
    }
}

/// Values supplied explicitly on the command line.
///
/// Only fields that were actually given take effect: `None` and empty strings
/// leave the loaded value alone, and the VPN flag can only switch the check
/// on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub interface_name: Option<String>,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<String>,
    pub verify_via_secondary_vpn: bool,
}

impl SettingsOverrides {
    /// Returns `true` when no override would change anything.
    pub fn is_empty(&self) -> bool {
        given(&self.interface_name).is_none()
            && given(&self.proxy_host).is_none()
            && given(&self.proxy_port).is_none()
            && !self.verify_via_secondary_vpn
    }

    /// Applies the overrides on top of `settings` and returns the result.
    pub fn apply(self, mut settings: Settings) -> Settings {
        if let Some(name) = given(&self.interface_name) {
            settings.interface_name = name.to_string();
        }
        if let Some(host) = given(&self.proxy_host) {
            settings.proxy_host = host.to_string();
        }
        if let Some(port) = given(&self.proxy_port) {
            settings.proxy_port = port.to_string();
        }
        if self.verify_via_secondary_vpn {
            settings.verify_via_secondary_vpn = true;
        }
        settings
    }
}

fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
