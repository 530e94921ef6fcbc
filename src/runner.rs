//! Process invocation
//!
//! [`CommandRunner`] is the seam between the client and the operating
//! system; tests swap in a mock or a scripted runner.

use std::io;
use std::process::Command;

/// Exit code, stdout and stderr of one finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RawOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs one external program to completion
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<RawOutput>;
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<RawOutput> {
        let output = Command::new(program).args(args).output()?;

        Ok(RawOutput {
            // killed by a signal
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_streams_and_code() {
        let args = vec![
            "-c".to_string(),
            "printf 'out'; printf 'err' >&2; exit 3".to_string(),
        ];
        let output = SystemRunner::new().run("sh", &args).unwrap();

        assert_eq!(output, RawOutput::new(3, "out", "err"));
        assert!(!output.success());
    }

    #[test]
    fn test_system_runner_spawn_failure_propagates() {
        let err = SystemRunner::new()
            .run("/nonexistent/definitely-not-nmcli", &[])
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
