//! Connectivity probe through a SOCKS5 endpoint using `curl`.
//!
//! A single HEAD request to a well-known HTTPS site is sent through the proxy
//! with a 5-second connect timeout.  Any HTTP response counts as success,
//! whatever its status code; transport errors (timeout, refused, DNS) count as
//! failure.  There are no retries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use socks_toggle_core::probe_reached_internet;
use tracing::debug;

use crate::application::proxy_controller::ConnectivityProbe;
use crate::infrastructure::process::{CommandRunner, Invocation};

/// URL fetched through the proxy.
pub const PROBE_URL: &str = "https://www.google.com";

/// Connect timeout handed to curl.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// [`ConnectivityProbe`] implementation backed by `curl`.
pub struct CurlProbe {
    runner: Arc<dyn CommandRunner>,
}

impl CurlProbe {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn invocation(host: &str, port: &str) -> Invocation {
        Invocation::new("curl")
            .arg("--socks5")
            .arg(format!("{host}:{port}"))
            .arg("-s")
            .arg("--head")
            .arg(PROBE_URL)
            .arg("--connect-timeout")
            .arg(CONNECT_TIMEOUT.as_secs().to_string())
    }
}

#[async_trait]
impl ConnectivityProbe for CurlProbe {
    async fn reaches_internet(&self, host: &str, port: &str) -> bool {
        match self.runner.run(&Self::invocation(host, port)).await {
            Ok(output) => probe_reached_internet(&output),
            Err(e) => {
                debug!("probe through {host}:{port} failed: {e}");
                false
            }
        }
    }
}
