//! External command execution.
//!
//! Every OS interaction in socks-toggle is a short-lived child process
//! (`networksetup`, `curl`, `osascript`).  They all go through the
//! [`CommandRunner`] trait so the adapters can be tested without touching the
//! real system.

use std::fmt;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::trace;

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg:?}")?;
        }
        Ok(())
    }
}

/// Error type for command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started (missing binary, permissions).
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: String,
        stderr: String,
    },

    /// The program exited successfully but printed an error marker.
    #[error("{program} reported an error: {output}")]
    Reported { program: String, output: String },
}

/// Runs a command to completion and returns its standard output.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// # Errors
    ///
    /// Returns [`CommandError::Spawn`] if the process cannot be started and
    /// [`CommandError::Exit`] if it exits with a non-zero status.
    async fn run(&self, invocation: &Invocation) -> Result<String, CommandError>;
}

/// [`CommandRunner`] backed by real child processes.
///
/// The child is always awaited; `kill_on_drop` makes sure nothing is left
/// running if the future is dropped early.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, invocation: &Invocation) -> Result<String, CommandError> {
        trace!(%invocation, "spawning");
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CommandError::Exit {
                program: invocation.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
