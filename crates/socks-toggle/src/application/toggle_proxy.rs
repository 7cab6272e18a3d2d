//! ToggleProxyUseCase: the top-level flow of one invocation.
//!
//! ```text
//! Idle ─► ConfigResolved ─► StatusChecked ─► Toggled ─► StatusRechecked ─► Reported
//! ```
//!
//! Only a failed settings load or a failed status query aborts the run with an
//! error.  Everything else ends in a notification: a failed enable is
//! reported right away (and skips the re-check), a toggle that left the state
//! unchanged gets the generic failure notice.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use socks_toggle_core::{ConfigError, Notice, Settings, SettingsOverrides, ToggleReport};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::proxy_controller::{EnableOutcome, NetworkError, ProxyController};

/// Where the persisted settings come from.
pub trait SettingsSource {
    /// Loads the persisted settings, prompting and saving on first run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the settings cannot be read or saved.
    fn load(&self) -> Result<Settings, ConfigError>;
}

/// One-shot desktop notification.
///
/// Implementations are best effort and never report failure.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn display(&self, message: &str, title: &str);
}

/// Secondary VPN check consulted before enabling, when the settings ask for
/// it.  This is an extension point; see `infrastructure::vpn`.
pub trait VpnCheck: Send + Sync {
    /// Returns `true` if the VPN is considered connected.
    fn is_connected(&self) -> bool;
}

/// Which of the two status queries failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPhase {
    BeforeToggle,
    AfterToggle,
}

impl fmt::Display for StatusPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusPhase::BeforeToggle => f.write_str("Error getting SOCKS proxy status"),
            StatusPhase::AfterToggle => f.write_str("Error getting new SOCKS proxy status"),
        }
    }
}

/// Fatal errors of a toggle run.
#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("Error loading configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{phase}: {source}")]
    Status {
        phase: StatusPhase,
        #[source]
        source: NetworkError,
    },
}

/// Result of a run that did not hit a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Proxy went from disabled to enabled.
    Enabled,
    /// Proxy went from enabled to disabled.
    Disabled,
    /// Status before and after the toggle is the same.
    Unchanged,
    /// Enabling failed (or was rolled back); the failure was notified.
    EnableFailed(EnableOutcome),
}

impl ToggleOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            ToggleOutcome::EnableFailed(_) => 1,
            _ => 0,
        }
    }
}

impl From<ToggleReport> for ToggleOutcome {
    fn from(report: ToggleReport) -> Self {
        match report {
            ToggleReport::Enabled => ToggleOutcome::Enabled,
            ToggleReport::Disabled => ToggleOutcome::Disabled,
            ToggleReport::Unchanged => ToggleOutcome::Unchanged,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    ConfigResolved,
    StatusChecked,
    Toggled,
    StatusRechecked,
    Reported,
}

/// The toggle use case.
pub struct ToggleProxyUseCase {
    controller: ProxyController,
    notifier: Arc<dyn Notifier>,
    vpn: Arc<dyn VpnCheck>,
}

impl ToggleProxyUseCase {
    pub fn new(
        controller: ProxyController,
        notifier: Arc<dyn Notifier>,
        vpn: Arc<dyn VpnCheck>,
    ) -> Self {
        Self {
            controller,
            notifier,
            vpn,
        }
    }

    /// Loads settings from `source`, applies `overrides`, and toggles.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::Config`] if settings cannot be loaded.  See
    /// [`Self::toggle`] for the rest.
    pub async fn run(
        &self,
        source: &dyn SettingsSource,
        overrides: SettingsOverrides,
    ) -> Result<ToggleOutcome, ToggleError> {
        let settings = overrides.apply(source.load()?);
        trace_step(Step::ConfigResolved);
        debug!(?settings, "resolved settings");
        self.toggle(&settings).await
    }

    /// Flips the proxy state for already-resolved settings.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::Status`] if either status query fails.
    pub async fn toggle(&self, settings: &Settings) -> Result<ToggleOutcome, ToggleError> {
        let service = settings.interface_name.as_str();

        let before = self.status(service, StatusPhase::BeforeToggle).await?;
        trace_step(Step::StatusChecked);

        if before {
            info!("Disabling SOCKS Proxy...");
            self.controller.disable(service).await;
        } else {
            if settings.verify_via_secondary_vpn {
                self.check_vpn();
            }
            info!("Enabling SOCKS Proxy...");
            let outcome = self
                .controller
                .enable(service, &settings.proxy_host, &settings.proxy_port)
                .await;
            if !outcome.is_committed() {
                self.notify(Notice::enable_failed(service)).await;
                return Ok(ToggleOutcome::EnableFailed(outcome));
            }
        }
        trace_step(Step::Toggled);

        let after = self.status(service, StatusPhase::AfterToggle).await?;
        trace_step(Step::StatusRechecked);

        let report = ToggleReport::from_transition(before, after);
        self.notify(report.notice(settings)).await;
        trace_step(Step::Reported);

        Ok(report.into())
    }

    async fn status(&self, service: &str, phase: StatusPhase) -> Result<bool, ToggleError> {
        self.controller
            .get_status(service)
            .await
            .map_err(|source| ToggleError::Status { phase, source })
    }

    fn check_vpn(&self) {
        if self.vpn.is_connected() {
            info!("Mullvad VPN is connected.");
        } else {
            warn!("Mullvad VPN does not appear to be connected; enabling anyway.");
        }
    }

    async fn notify(&self, notice: Notice) {
        if notice.is_error() {
            warn!(message = %notice.message, "reporting failure");
        } else {
            debug!(title = %notice.title, message = %notice.message, "sending notification");
        }
        self.notifier.display(&notice.message, &notice.title).await;
    }
}

fn trace_step(step: Step) {
    debug!(?step, "toggle state");
}

// ── Tests ─────────────────────────────────────────────────────────────────────
