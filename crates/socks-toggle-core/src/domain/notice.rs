//! Notification texts shown at the end of a run.

use super::settings::Settings;

/// Title used for successful toggles.
pub const TITLE_OK: &str = "Network Setup";
/// Title used for every failure notification.
pub const TITLE_ERROR: &str = "Network Setup Error";

/// A desktop notification ready to be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub title: String,
}

impl Notice {
    /// The proxy could not be enabled (set, activate or verify failed).
    pub fn enable_failed(interface_name: &str) -> Self {
        Self {
            message: format!("Failed to enable SOCKS Proxy for: {interface_name}"),
            title: TITLE_ERROR.to_string(),
        }
    }

    /// The status after the toggle equals the status before it.
    pub fn toggle_failed(interface_name: &str) -> Self {
        Self {
            message: format!("Failed to toggle SOCKS Proxy for: {interface_name}"),
            title: TITLE_ERROR.to_string(),
        }
    }

    pub fn enabled(settings: &Settings) -> Self {
        Self {
            message: format!(
                "SOCKS Proxy Enabled for: {}\nProxy IP: {}\nProxy Port: {}",
                settings.interface_name, settings.proxy_host, settings.proxy_port
            ),
            title: TITLE_OK.to_string(),
        }
    }

    pub fn disabled(interface_name: &str) -> Self {
        Self {
            message: format!("SOCKS Proxy Disabled for: {interface_name}"),
            title: TITLE_OK.to_string(),
        }
    }

    /// Returns `true` for notices carrying the error title.
    pub fn is_error(&self) -> bool {
        self.title == TITLE_ERROR
    }
}

/// How the proxy state moved across one toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleReport {
    /// Disabled before, enabled after.
    Enabled,
    /// Enabled before, disabled after.
    Disabled,
    /// Same state before and after.
    Unchanged,
}

impl ToggleReport {
    /// Classifies a pre/post status pair.
    pub fn from_transition(before: bool, after: bool) -> Self {
        match (before, after) {
            (b, a) if b == a => ToggleReport::Unchanged,
            (_, true) => ToggleReport::Enabled,
            (_, false) => ToggleReport::Disabled,
        }
    }

    /// Builds the notification for this report.
    pub fn notice(self, settings: &Settings) -> Notice {
        match self {
            ToggleReport::Enabled => Notice::enabled(settings),
            ToggleReport::Disabled => Notice::disabled(&settings.interface_name),
            ToggleReport::Unchanged => Notice::toggle_failed(&settings.interface_name),
        }
    }
}
