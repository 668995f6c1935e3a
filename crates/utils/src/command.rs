//! Subprocess helper with consistent error mapping

use std::process::Command;
use stratum_core::{Error, Result};

/// Outcome of a finished subprocess
#[derive(Debug)]
pub struct CommandOutput {
    pub status_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status_code == Some(0)
    }
}

/// Run a command to completion, capturing output.
///
/// Spawn failures (binary not installed, permission denied) surface as
/// `CommandExecution` with no exit code. A non-zero exit is not an error at
/// this level; callers inspect the returned status since a missing cluster
/// object and a genuine failure look the same to the child process.
pub fn run_command(program: &str, args: &[&str]) -> Result<CommandOutput> {
    tracing::debug!(command = %program, args = ?args, "running command");

    let output = Command::new(program).args(args).output().map_err(|e| {
        Error::command_execution(
            program,
            args.iter().map(|s| (*s).to_string()).collect(),
            format!("failed to spawn: {e}"),
            None,
        )
    })?;

    Ok(CommandOutput {
        status_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
