//! `KEY=VALUE` parsing and rendering for [`Settings`].

use tracing::{debug, trace};

use crate::domain::settings::Settings;

pub const KEY_INTERFACE_NAME: &str = "WIFI_SERVICE";
pub const KEY_PROXY_HOST: &str = "PROXY_IP";
pub const KEY_PROXY_PORT: &str = "PROXY_PORT";
pub const KEY_VERIFY_VPN: &str = "CHECK_MULLVAD";

const SEPARATOR: char = '=';

/// Parses settings file content.
///
/// Starts from [`Settings::default`] and overwrites each field whose key
/// appears.  A line is split at its first `=`, so values may contain `=`
/// themselves; lines without one are skipped without error, as are unknown
/// keys.  Empty values
/// keep the default so no text field ends up blank.  The boolean is `true`
/// only for the literal text `true`.
pub fn parse_settings(content: &str) -> Settings {
    let mut settings = Settings::default();

    for (index, line) in content.lines().enumerate() {
        let Some((key, value)) = split_pair(line) else {
            trace!(line = index + 1, "skipping malformed settings line");
            continue;
        };

        match key {
            KEY_INTERFACE_NAME => assign(&mut settings.interface_name, value),
            KEY_PROXY_HOST => assign(&mut settings.proxy_host, value),
            KEY_PROXY_PORT => assign(&mut settings.proxy_port, value),
            KEY_VERIFY_VPN => settings.verify_via_secondary_vpn = value == "true",
            other => debug!(key = other, "ignoring unknown settings key"),
        }
    }

    settings
}

/// Renders settings as the four-line file body, in fixed key order.
pub fn render_settings(settings: &Settings) -> String {
    format!(
        "{KEY_INTERFACE_NAME}={}\n{KEY_PROXY_HOST}={}\n{KEY_PROXY_PORT}={}\n{KEY_VERIFY_VPN}={}\n",
        settings.interface_name,
        settings.proxy_host,
        settings.proxy_port,
        settings.verify_via_secondary_vpn
    )
}

/// Splits on the first `=`; later ones belong to the value.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    line.split_once(SEPARATOR)
}

fn assign(field: &mut String, value: &str) {
    if !value.is_empty() {
        *field = value.to_string();
    }
}
