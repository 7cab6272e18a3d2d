//! `config.conf` persistence with a first-run prompt.
//!
//! The file lives at a path relative to the working directory (`config.conf`
//! unless `--config` says otherwise).  When it is missing, the user is asked
//! for each setting in a fixed order, an empty answer keeping the default,
//! and the answers are written out immediately.
//!
//! There is no locking: one invocation at a time is assumed.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use socks_toggle_core::domain::settings::{
    DEFAULT_INTERFACE_NAME, DEFAULT_PROXY_HOST, DEFAULT_PROXY_PORT,
};
use socks_toggle_core::{parse_settings, render_settings, ConfigError, Settings};
use tracing::{debug, info};

use crate::application::toggle_proxy::SettingsSource;

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config.conf";

/// Settings store backed by a `KEY=VALUE` file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings, prompting on `input`/`output` if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read,
    /// [`ConfigError::Prompt`] if the terminal I/O fails, and
    /// [`ConfigError::Write`] if the prompted settings cannot be saved.
    pub fn load_with<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Settings, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                debug!(path = %self.path.display(), "loaded settings file");
                Ok(parse_settings(&content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let settings = prompt_settings(input, output).map_err(ConfigError::Prompt)?;
                self.save(&settings)?;
                info!(path = %self.path.display(), "saved new settings file");
                Ok(settings)
            }
            Err(source) => Err(ConfigError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Overwrites the settings file with exactly four `KEY=VALUE` lines.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Write`] if the file cannot be created or written.
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        std::fs::write(&self.path, render_settings(settings)).map_err(|source| {
            ConfigError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }
}

impl SettingsSource for ConfigStore {
    fn load(&self) -> Result<Settings, ConfigError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.load_with(&mut stdin.lock(), &mut stdout.lock())
    }
}

fn prompt_settings<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Settings> {
    writeln!(
        output,
        "No configuration file found. Please enter settings or press enter to use default values."
    )?;

    let interface_name = ask(
        input,
        output,
        &format!("Enter Wi-Fi Service Name (default: {DEFAULT_INTERFACE_NAME}): "),
    )?;
    let proxy_host = ask(
        input,
        output,
        &format!("Enter Proxy IP (default: {DEFAULT_PROXY_HOST}): "),
    )?;
    let proxy_port = ask(
        input,
        output,
        &format!("Enter Proxy Port (default: {DEFAULT_PROXY_PORT}): "),
    )?;
    let verify = ask(
        input,
        output,
        "Enable Mullvad VPN connection check? (true/false, default: false): ",
    )?;

    Ok(Settings {
        interface_name: or_default(interface_name, DEFAULT_INTERFACE_NAME),
        proxy_host: or_default(proxy_host, DEFAULT_PROXY_HOST),
        proxy_port: or_default(proxy_port, DEFAULT_PROXY_PORT),
        verify_via_secondary_vpn: verify == "true",
    })
}

/// Prints `question` and returns the trimmed answer; EOF reads as empty.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn or_default(answer: String, default: &str) -> String {
    if answer.is_empty() {
        default.to_string()
    } else {
        answer
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
