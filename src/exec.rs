//! Blocking wrapper around external programs.

use crate::error::{FmtError, Result};
use std::process::Command;
use tracing::debug;

/// Captured result of a finished process.
#[derive(Debug, Clone)]
pub struct Output {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl Output {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Run `cmd` to completion. Exit codes outside `ok_codes` become
/// [`FmtError::Command`] with the tool's raw stderr attached.
pub fn run(cmd: &mut Command, ok_codes: &[i32]) -> Result<Output> {
    let program = cmd.get_program().to_string_lossy().to_string();
    let args = cmd
        .get_args()
        .map(|a| a.to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    debug!(%program, %args, "running");

    let out = cmd.output()?;
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();

    // Killed by a signal: no code at all, never acceptable.
    let Some(code) = out.status.code() else {
        return Err(FmtError::Command {
            program,
            args,
            code: out.status.to_string(),
            stderr,
        });
    };

    if !ok_codes.contains(&code) {
        return Err(FmtError::Command {
            program,
            args,
            code: code.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(Output { code, stdout, stderr })
}

/// Run `cmd` and require a zero exit code.
pub fn check(cmd: &mut Command) -> Result<Output> {
    run(cmd, &[0])
}
