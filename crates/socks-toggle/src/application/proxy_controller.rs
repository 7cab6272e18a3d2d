//! ProxyController: query, enable (with verification) and disable the SOCKS
//! proxy of one network service.
//!
//! The controller depends only on the [`NetworkSetup`] and
//! [`ConnectivityProbe`] traits.  The macOS implementations live in
//! `infrastructure::network`; tests inject recording fakes.
//!
//! # Enabling is a small state machine
//!
//! ```text
//! Configuring ──ok──► Activating ──ok──► Verifying ──probe ok──► Committed
//!      │                   │                 │
//!      └─err─► Failed      └─err─► Failed    └─probe failed─► (state off) ─► RolledBack
//! ```
//!
//! `RolledBack` is the only compensating action in the program: a proxy that
//! cannot reach the internet is switched off again instead of being left
//! enabled.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use socks_toggle_core::socks_proxy_enabled;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type for network-configuration commands.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The command could not be run, exited unsuccessfully, or reported an
    /// error.  Unknown services, a missing tool and permission problems all
    /// end up here.
    #[error("{action} failed for '{service}': {reason}")]
    Command {
        action: &'static str,
        service: String,
        reason: String,
    },
}

/// Desired on/off state of the SOCKS proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyState {
    On,
    Off,
}

impl ProxyState {
    /// The argument `networksetup` expects for this state.
    pub fn as_arg(self) -> &'static str {
        match self {
            ProxyState::On => "on",
            ProxyState::Off => "off",
        }
    }
}

impl fmt::Display for ProxyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// OS network-configuration tool, scoped to the SOCKS proxy settings.
#[async_trait]
pub trait NetworkSetup: Send + Sync {
    /// Returns the raw output of the SOCKS proxy status query for `service`.
    async fn query_socks_proxy(&self, service: &str) -> Result<String, NetworkError>;

    /// Sets the proxy host and port for `service`.
    async fn set_socks_proxy(
        &self,
        service: &str,
        host: &str,
        port: &str,
    ) -> Result<(), NetworkError>;

    /// Turns the SOCKS proxy of `service` on or off.
    async fn set_socks_proxy_state(
        &self,
        service: &str,
        state: ProxyState,
    ) -> Result<(), NetworkError>;
}

/// One-shot check that traffic routed through a SOCKS endpoint reaches the
/// internet.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Returns `true` if a request through `host:port` got any HTTP response.
    async fn reaches_internet(&self, host: &str, port: &str) -> bool;
}

/// Steps of the enable protocol that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableStage {
    /// Writing host and port.
    Configuring,
    /// Turning the proxy state on.
    Activating,
    /// Probing connectivity through the proxy.
    Verifying,
}

impl fmt::Display for EnableStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnableStage::Configuring => "configuring",
            EnableStage::Activating => "activating",
            EnableStage::Verifying => "verifying",
        };
        f.write_str(name)
    }
}

/// Terminal state of [`ProxyController::enable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnableOutcome {
    /// Proxy configured, on, and verified.
    Committed,
    /// Probe failed; the proxy was switched off again.
    RolledBack,
    /// A configuration command failed; nothing after `stage` ran.
    Failed { stage: EnableStage, reason: String },
}

impl EnableOutcome {
    /// `true` only when the proxy was left enabled and working.
    pub fn is_committed(&self) -> bool {
        matches!(self, EnableOutcome::Committed)
    }
}

/// Status, enable and disable operations for a service's SOCKS proxy.
pub struct ProxyController {
    network: Arc<dyn NetworkSetup>,
    probe: Arc<dyn ConnectivityProbe>,
}

impl ProxyController {
    pub fn new(network: Arc<dyn NetworkSetup>, probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self { network, probe }
    }

    /// Reports whether the SOCKS proxy of `service` is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] if the status query cannot be executed.
    pub async fn get_status(&self, service: &str) -> Result<bool, NetworkError> {
        let output = self.network.query_socks_proxy(service).await?;
        let enabled = socks_proxy_enabled(&output);
        debug!(service, enabled, "queried SOCKS proxy status");
        Ok(enabled)
    }

    /// Turns the SOCKS proxy of `service` off.
    ///
    /// Best effort: a failure is logged and otherwise ignored so disabling can
    /// never block the toggle flow.  The follow-up status query shows whether
    /// it worked.
    pub async fn disable(&self, service: &str) {
        if let Err(e) = self
            .network
            .set_socks_proxy_state(service, ProxyState::Off)
            .await
        {
            debug!("ignoring disable failure: {e}");
        }
    }

    /// Configures, activates and verifies the SOCKS proxy of `service`.
    pub async fn enable(&self, service: &str, host: &str, port: &str) -> EnableOutcome {
        let mut stage = EnableStage::Configuring;
        loop {
            debug!(service, %stage, "enable step");
            stage = match stage {
                EnableStage::Configuring => {
                    match self.network.set_socks_proxy(service, host, port).await {
                        Ok(()) => EnableStage::Activating,
                        Err(e) => {
                            warn!("Error: Failed to set SOCKS proxy. {e}");
                            return EnableOutcome::Failed {
                                stage,
                                reason: e.to_string(),
                            };
                        }
                    }
                }
                EnableStage::Activating => {
                    match self
                        .network
                        .set_socks_proxy_state(service, ProxyState::On)
                        .await
                    {
                        Ok(()) => EnableStage::Verifying,
                        Err(e) => {
                            warn!("Error: Failed to enable SOCKS proxy. {e}");
                            return EnableOutcome::Failed {
                                stage,
                                reason: e.to_string(),
                            };
                        }
                    }
                }
                EnableStage::Verifying => {
                    if self.probe.reaches_internet(host, port).await {
                        info!("Successfully connected to the internet through the proxy.");
                        return EnableOutcome::Committed;
                    }
                    warn!("Proxy connection failed.");
                    self.disable(service).await;
                    warn!("Proxy disabled due to connectivity issues.");
                    return EnableOutcome::RolledBack;
                }
            };
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
