//! Desktop notifications via `osascript`.
//!
//! Runs `osascript -e 'display notification "<message>" with title "<title>"'`.
//! Notifications are best effort: any failure is logged at debug level and
//! dropped.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::application::toggle_proxy::Notifier;
use crate::infrastructure::process::{CommandRunner, Invocation};

/// [`Notifier`] implementation backed by AppleScript.
pub struct OsascriptNotifier {
    runner: Arc<dyn CommandRunner>,
}

impl OsascriptNotifier {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Notifier for OsascriptNotifier {
    async fn display(&self, message: &str, title: &str) {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            applescript_escape(message),
            applescript_escape(title)
        );
        let invocation = Invocation::new("osascript").arg("-e").arg(script);
        if let Err(e) = self.runner.run(&invocation).await {
            debug!("ignoring notification failure: {e}");
        }
    }
}

/// Escapes `\` and `"` for use inside an AppleScript string literal.
fn applescript_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '"') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
