//! Synchronous invocation of the external compression tool.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Exit code reported when the tool could not be started, as a shell would.
pub const SPAWN_FAILURE_CODE: i32 = 127;

/// Which half of the round trip an invocation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

impl Mode {
    /// Positional mode flag understood by the external tool.
    pub fn flag(self) -> &'static str {
        match self {
            Mode::Compress => "C",
            Mode::Decompress => "D",
        }
    }
}

/// A fully spelled-out tool invocation: program plus argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// `<tool> C|D <input> <output>`
    pub fn tool(program: &Path, mode: Mode, input: &Path, output: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            args: vec![
                OsString::from(mode.flag()),
                input.as_os_str().to_owned(),
                output.as_os_str().to_owned(),
            ],
        }
    }

    pub fn mode(&self) -> Option<Mode> {
        match self.args.first()?.to_str()? {
            "C" => Some(Mode::Compress),
            "D" => Some(Mode::Decompress),
            _ => None,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Exit status and captured streams of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// The only boundary between the harness and the tool under test.
pub trait ProcessDriver {
    /// Run `invocation` to completion. Never times out.
    fn execute(&mut self, invocation: &Invocation) -> ExecutionOutcome;
}

/// Drives a real child process through [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDriver;

impl ProcessDriver for SystemDriver {
    fn execute(&mut self, invocation: &Invocation) -> ExecutionOutcome {
        tracing::debug!(%invocation, "running external tool");
        match Command::new(&invocation.program).args(&invocation.args).output() {
            Ok(output) => ExecutionOutcome {
                // Killed by a signal: no code, still a failure.
                exit_code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Err(e) => {
                tracing::warn!(program = %invocation.program.display(), error = %e, "failed to start external tool");
                ExecutionOutcome {
                    exit_code: SPAWN_FAILURE_CODE,
                    stdout: String::new(),
                    stderr: format!("failed to run '{}': {e}", invocation.program.display()),
                }
            }
        }
    }
}
