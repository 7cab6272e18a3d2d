//! Integration tests for the toggle pipeline.
//!
//! These tests exercise the application layer end-to-end:
//! `ConfigStore` (real file in a temp dir) + `ToggleProxyUseCase` +
//! `ProxyController`, with an in-memory network that behaves like
//! `networksetup` and a scripted connectivity probe.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use socks_toggle::application::proxy_controller::{
    ConnectivityProbe, EnableOutcome, NetworkError, NetworkSetup, ProxyController, ProxyState,
};
use socks_toggle::application::toggle_proxy::{
    Notifier, StatusPhase, ToggleError, ToggleOutcome, ToggleProxyUseCase,
};
use socks_toggle::infrastructure::storage::ConfigStore;
use socks_toggle::infrastructure::vpn::AssumeConnected;
use socks_toggle_core::{Settings, SettingsOverrides};
use uuid::Uuid;

// ── Test doubles ──────────────────────────────────────────────────────────────

/// Behaves like `networksetup` for a set of known services.
struct FakeNetworksetup {
    services: Vec<String>,
    enabled: Mutex<bool>,
    configured: Mutex<Option<(String, String)>>,
    /// When set, `-setsocksfirewallproxystate` silently does nothing.
    ignore_state_changes: bool,
    /// When set, the status query itself fails (e.g. the tool is missing).
    query_fails: bool,
}

impl FakeNetworksetup {
    fn new(enabled: bool) -> Self {
        Self {
            services: vec!["Wi-Fi".to_string(), "Ethernet".to_string()],
            enabled: Mutex::new(enabled),
            configured: Mutex::new(None),
            ignore_state_changes: false,
            query_fails: false,
        }
    }

    fn known(&self, service: &str, action: &'static str) -> Result<(), NetworkError> {
        if self.services.iter().any(|s| s == service) {
            Ok(())
        } else {
            Err(NetworkError::Command {
                action,
                service: service.to_string(),
                reason: format!("{service} is not a recognized network service."),
            })
        }
    }

    fn is_enabled(&self) -> bool {
        *self.enabled.lock().unwrap()
    }
}

#[async_trait]
impl NetworkSetup for FakeNetworksetup {
    async fn query_socks_proxy(&self, service: &str) -> Result<String, NetworkError> {
        if self.query_fails {
            return Err(NetworkError::Command {
                action: "query SOCKS proxy",
                service: service.to_string(),
                reason: "failed to run /usr/sbin/networksetup".to_string(),
            });
        }
        self.known(service, "query SOCKS proxy")?;
        let flag = if self.is_enabled() { "Yes" } else { "No" };
        let (server, port) = self
            .configured
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_default();
        Ok(format!(
            "Enabled: {flag}\nServer: {server}\nPort: {port}\nAuthenticated Proxy Enabled: 0\n"
        ))
    }

    async fn set_socks_proxy(
        &self,
        service: &str,
        host: &str,
        port: &str,
    ) -> Result<(), NetworkError> {
        self.known(service, "set SOCKS proxy")?;
        *self.configured.lock().unwrap() = Some((host.to_string(), port.to_string()));
        Ok(())
    }

    async fn set_socks_proxy_state(
        &self,
        service: &str,
        state: ProxyState,
    ) -> Result<(), NetworkError> {
        self.known(service, "set SOCKS proxy state")?;
        if !self.ignore_state_changes {
            *self.enabled.lock().unwrap() = state == ProxyState::On;
        }
        Ok(())
    }
}

struct ScriptedProbe(bool);

#[async_trait]
impl ConnectivityProbe for ScriptedProbe {
    async fn reaches_internet(&self, _host: &str, _port: &str) -> bool {
        self.0
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    fn notices(&self) -> Vec<(String, String)> {
        self.notices.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn display(&self, message: &str, title: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((message.to_string(), title.to_string()));
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

struct TempConfig {
    dir: PathBuf,
    store: ConfigStore,
}

impl TempConfig {
    fn with_settings(settings: &Settings) -> Self {
        let dir = std::env::temp_dir().join(format!("socks_toggle_it_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let store = ConfigStore::new(dir.join("config.conf"));
        store.save(settings).unwrap();
        Self { dir, store }
    }

    fn content(&self) -> String {
        std::fs::read_to_string(self.store.path()).unwrap()
    }
}

impl Drop for TempConfig {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

fn use_case(
    network: Arc<FakeNetworksetup>,
    reachable: bool,
) -> (ToggleProxyUseCase, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = ProxyController::new(
        network as Arc<dyn NetworkSetup>,
        Arc::new(ScriptedProbe(reachable)),
    );
    let use_case = ToggleProxyUseCase::new(
        controller,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        Arc::new(AssumeConnected),
    );
    (use_case, notifier)
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_enabled_proxy_toggles_to_disabled() {
    // Arrange
    let config = TempConfig::with_settings(&Settings::default());
    let network = Arc::new(FakeNetworksetup::new(true));
    let (uc, notifier) = use_case(Arc::clone(&network), true);

    // Act
    let outcome = uc
        .run(&config.store, SettingsOverrides::default())
        .await
        .unwrap();

    // Assert
    assert_eq!(outcome, ToggleOutcome::Disabled);
    assert_eq!(outcome.exit_code(), 0);
    assert!(!network.is_enabled());
    assert_eq!(
        notifier.notices(),
        vec![(
            "SOCKS Proxy Disabled for: Wi-Fi".to_string(),
            "Network Setup".to_string()
        )]
    );
}

#[tokio::test]
async fn test_disabled_proxy_toggles_to_enabled_with_configured_endpoint() {
    let settings = Settings {
        interface_name: "Ethernet".to_string(),
        proxy_host: "10.8.0.1".to_string(),
        proxy_port: "1081".to_string(),
        verify_via_secondary_vpn: true,
    };
    let config = TempConfig::with_settings(&settings);
    let network = Arc::new(FakeNetworksetup::new(false));
    let (uc, notifier) = use_case(Arc::clone(&network), true);

    let outcome = uc
        .run(&config.store, SettingsOverrides::default())
        .await
        .unwrap();

    assert_eq!(outcome, ToggleOutcome::Enabled);
    assert!(network.is_enabled());
    assert_eq!(
        *network.configured.lock().unwrap(),
        Some(("10.8.0.1".to_string(), "1081".to_string()))
    );
    assert_eq!(
        notifier.notices(),
        vec![(
            "SOCKS Proxy Enabled for: Ethernet\nProxy IP: 10.8.0.1\nProxy Port: 1081".to_string(),
            "Network Setup".to_string()
        )]
    );
}

#[tokio::test]
async fn test_probe_failure_rolls_back_and_exits_non_zero() {
    let config = TempConfig::with_settings(&Settings::default());
    let network = Arc::new(FakeNetworksetup::new(false));
    let (uc, notifier) = use_case(Arc::clone(&network), false);

    let outcome = uc
        .run(&config.store, SettingsOverrides::default())
        .await
        .unwrap();

    assert_eq!(outcome, ToggleOutcome::EnableFailed(EnableOutcome::RolledBack));
    assert_eq!(outcome.exit_code(), 1);
    assert!(!network.is_enabled(), "proxy must be re-disabled");
    let notices = notifier.notices();
    assert_eq!(notices.len(), 1, "failure notice only, no success notice");
    assert_eq!(notices[0].0, "Failed to enable SOCKS Proxy for: Wi-Fi");
    assert_eq!(notices[0].1, "Network Setup Error");
}

#[tokio::test]
async fn test_silent_no_op_reports_generic_toggle_failure() {
    let config = TempConfig::with_settings(&Settings::default());
    let network = Arc::new(FakeNetworksetup {
        ignore_state_changes: true,
        ..FakeNetworksetup::new(true)
    });
    let (uc, notifier) = use_case(Arc::clone(&network), true);

    let outcome = uc
        .run(&config.store, SettingsOverrides::default())
        .await
        .unwrap();

    assert_eq!(outcome, ToggleOutcome::Unchanged);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(
        notifier.notices(),
        vec![(
            "Failed to toggle SOCKS Proxy for: Wi-Fi".to_string(),
            "Network Setup Error".to_string()
        )]
    );
}

#[tokio::test]
async fn test_unknown_service_is_a_fatal_status_error() {
    let config = TempConfig::with_settings(&Settings {
        interface_name: "Wi-Fi 2".to_string(),
        ..Settings::default()
    });
    let network = Arc::new(FakeNetworksetup::new(false));
    let (uc, notifier) = use_case(Arc::clone(&network), true);

    let err = uc
        .run(&config.store, SettingsOverrides::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ToggleError::Status {
            phase: StatusPhase::BeforeToggle,
            ..
        }
    ));
    assert!(err.to_string().starts_with("Error getting SOCKS proxy status"));
    assert!(network.configured.lock().unwrap().is_none(), "enable never attempted");
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn test_failed_status_query_is_fatal_and_silent() {
    let config = TempConfig::with_settings(&Settings::default());
    let network = Arc::new(FakeNetworksetup {
        query_fails: true,
        ..FakeNetworksetup::new(false)
    });
    let (uc, notifier) = use_case(network, true);

    let err = uc
        .run(&config.store, SettingsOverrides::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ToggleError::Status { .. }));
    assert!(err.to_string().starts_with("Error getting SOCKS proxy status"));
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn test_command_line_overrides_win_and_are_not_persisted() {
    let config = TempConfig::with_settings(&Settings::default());
    let before = config.content();
    let network = Arc::new(FakeNetworksetup::new(false));
    let (uc, notifier) = use_case(Arc::clone(&network), true);
    let overrides = SettingsOverrides {
        interface_name: Some("Ethernet".to_string()),
        proxy_host: Some("127.0.0.1".to_string()),
        proxy_port: Some("9050".to_string()),
        verify_via_secondary_vpn: true,
    };

    let outcome = uc.run(&config.store, overrides).await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Enabled);
    assert_eq!(
        *network.configured.lock().unwrap(),
        Some(("127.0.0.1".to_string(), "9050".to_string()))
    );
    assert!(notifier.notices()[0].0.starts_with("SOCKS Proxy Enabled for: Ethernet"));
    assert_eq!(config.content(), before, "overrides must not be written back");
}

#[tokio::test]
async fn test_two_runs_toggle_back_and_forth() {
    let config = TempConfig::with_settings(&Settings::default());
    let network = Arc::new(FakeNetworksetup::new(false));
    let (uc, notifier) = use_case(Arc::clone(&network), true);

    let first = uc
        .run(&config.store, SettingsOverrides::default())
        .await
        .unwrap();
    let second = uc
        .run(&config.store, SettingsOverrides::default())
        .await
        .unwrap();

    assert_eq!(first, ToggleOutcome::Enabled);
    assert_eq!(second, ToggleOutcome::Disabled);
    assert_eq!(notifier.notices().len(), 2);
}
