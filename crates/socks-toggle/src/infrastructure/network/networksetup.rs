//! `networksetup` adapter for the SOCKS firewall proxy.
//!
//! | Operation        | Command                                                        |
//! |------------------|----------------------------------------------------------------|
//! | query            | `networksetup -getsocksfirewallproxy <service>`                |
//! | set host/port    | `networksetup -setsocksfirewallproxy <service> <host> <port>`  |
//! | set state        | `networksetup -setsocksfirewallproxystate <service> on\|off`   |
//!
//! `networksetup` sometimes exits 0 after rejecting a request (for example an
//! unknown service name).  The output of every command is therefore also
//! checked for the tool's error markers.

use std::sync::Arc;

use async_trait::async_trait;
use socks_toggle_core::domain::proxy::networksetup_error;

use crate::application::proxy_controller::{NetworkError, NetworkSetup, ProxyState};
use crate::infrastructure::process::{CommandError, CommandRunner, Invocation};

/// Absolute path of the macOS network configuration tool.
pub const NETWORKSETUP: &str = "/usr/sbin/networksetup";

/// [`NetworkSetup`] implementation backed by `networksetup`.
pub struct NetworksetupCli {
    runner: Arc<dyn CommandRunner>,
}

impl NetworksetupCli {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    async fn mutate(
        &self,
        action: &'static str,
        service: &str,
        invocation: Invocation,
    ) -> Result<(), NetworkError> {
        let output = self
            .runner
            .run(&invocation)
            .await
            .map_err(|e| command_failed(action, service, e))?;
        reject_reported_error(action, service, &invocation, output).map(drop)
    }
}

#[async_trait]
impl NetworkSetup for NetworksetupCli {
    async fn query_socks_proxy(&self, service: &str) -> Result<String, NetworkError> {
        let invocation = Invocation::new(NETWORKSETUP)
            .arg("-getsocksfirewallproxy")
            .arg(service);
        let output = self
            .runner
            .run(&invocation)
            .await
            .map_err(|e| command_failed("query SOCKS proxy", service, e))?;
        reject_reported_error("query SOCKS proxy", service, &invocation, output)
    }

    async fn set_socks_proxy(
        &self,
        service: &str,
        host: &str,
        port: &str,
    ) -> Result<(), NetworkError> {
        let invocation = Invocation::new(NETWORKSETUP)
            .arg("-setsocksfirewallproxy")
            .arg(service)
            .arg(host)
            .arg(port);
        self.mutate("set SOCKS proxy", service, invocation).await
    }

    async fn set_socks_proxy_state(
        &self,
        service: &str,
        state: ProxyState,
    ) -> Result<(), NetworkError> {
        let invocation = Invocation::new(NETWORKSETUP)
            .arg("-setsocksfirewallproxystate")
            .arg(service)
            .arg(state.as_arg());
        self.mutate("set SOCKS proxy state", service, invocation)
            .await
    }
}

/// Turns output carrying one of the tool's error markers into a failure.
fn reject_reported_error(
    action: &'static str,
    service: &str,
    invocation: &Invocation,
    output: String,
) -> Result<String, NetworkError> {
    if networksetup_error(&output).is_none() {
        return Ok(output);
    }
    let err = CommandError::Reported {
        program: invocation.program.clone(),
        output: output.trim().to_string(),
    };
    Err(command_failed(action, service, err))
}

fn command_failed(action: &'static str, service: &str, err: CommandError) -> NetworkError {
    NetworkError::Command {
        action,
        service: service.to_string(),
        reason: err.to_string(),
    }
}
