//! socks-toggle entry point: flip the SOCKS proxy of a macOS network service.
//!
//! # Usage
//!
//! ```text
//! socks-toggle [OPTIONS]
//!
//! Options:
//!   -s, --service <NAME>   Network service name [default from config: Wi-Fi]
//!   -i, --ip <HOST>        SOCKS proxy address  [default from config: 10.64.0.1]
//!   -p, --port <PORT>      SOCKS proxy port     [default from config: 1080]
//!   -m, --check-mullvad    Run the VPN check before enabling
//!   -v, --verbose          Debug logging
//!       --config <PATH>    Settings file        [default: config.conf]
//! ```
//!
//! Command-line values override the settings file for this run only; they
//! are never written back.
//!
//! # Exit codes
//!
//! `0` for every completed run, including a toggle that was notified as
//! failed because the status did not change.  `1` when settings cannot be
//! loaded or saved, when a status query fails, or when enabling fails.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use socks_toggle_core::SettingsOverrides;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use socks_toggle::application::proxy_controller::ProxyController;
use socks_toggle::application::toggle_proxy::{ToggleOutcome, ToggleProxyUseCase};
use socks_toggle::infrastructure::network::{CurlProbe, NetworksetupCli};
use socks_toggle::infrastructure::notification::OsascriptNotifier;
use socks_toggle::infrastructure::process::{CommandRunner, SystemCommandRunner};
use socks_toggle::infrastructure::storage::{ConfigStore, DEFAULT_CONFIG_PATH};
use socks_toggle::infrastructure::vpn::AssumeConnected;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Toggle the SOCKS proxy of a network service on or off.
///
/// Enabling is verified with a request through the proxy and undone if the
/// request fails.
#[derive(Debug, Parser)]
#[command(name = "socks-toggle", version)]
struct Cli {
    /// Network service (interface) name, e.g. "Wi-Fi".
    #[arg(short = 's', long = "service")]
    service: Option<String>,

    /// SOCKS proxy IP address or hostname.
    #[arg(short = 'i', long = "ip")]
    proxy_ip: Option<String>,

    /// SOCKS proxy port.
    #[arg(short = 'p', long = "port")]
    proxy_port: Option<String>,

    /// Run the Mullvad VPN check before enabling the proxy.
    #[arg(short = 'm', long = "check-mullvad")]
    check_mullvad: bool,

    /// Enable debug logging.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Path of the settings file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, env = "SOCKS_TOGGLE_CONFIG")]
    config: PathBuf,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            interface_name: self.service.clone(),
            proxy_host: self.proxy_ip.clone(),
            proxy_port: self.proxy_port.clone(),
            verify_via_secondary_vpn: self.check_mullvad,
        }
    }

    fn log_filter(&self) -> EnvFilter {
        let fallback = if self.verbose { "debug" } else { "info" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match run(cli) {
        Ok(outcome) => {
            debug!(?outcome, "toggle finished");
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the adapters and runs one toggle on a single-threaded runtime.
fn run(cli: Cli) -> anyhow::Result<ToggleOutcome> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner);
    let controller = ProxyController::new(
        Arc::new(NetworksetupCli::new(Arc::clone(&runner))),
        Arc::new(CurlProbe::new(Arc::clone(&runner))),
    );
    let use_case = ToggleProxyUseCase::new(
        controller,
        Arc::new(OsascriptNotifier::new(runner)),
        Arc::new(AssumeConnected),
    );

    let store = ConfigStore::new(&cli.config);
    let overrides = cli.overrides();
    if overrides.is_empty() {
        debug!(path = %store.path().display(), "no command-line overrides");
    }
    let outcome = runtime.block_on(use_case.run(&store, overrides))?;
    Ok(outcome)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
