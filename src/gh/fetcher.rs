// Shell fetcher for external command invocations.
// Runs a command line synchronously, captures both streams and the exit code.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{HubdeckError, Result};

/// Runs a command line and returns its standard output on success.
///
/// Seam between the cache and the external tool; tests substitute
/// counting or failing runners.
pub trait CommandRunner {
    fn run(&self, command_line: &str) -> Result<String>;
}

/// Runs commands through `sh -c`, blocking until they finish.
///
/// There is no timeout on the wait: a hung external command hangs the
/// calling operation. Inherited behavior.
pub struct ShellFetcher {
    failure_log: PathBuf,
}

impl ShellFetcher {
    pub fn new(failure_log: PathBuf) -> Self {
        Self { failure_log }
    }

    /// Overwrite the failure log with the command and both captured streams.
    ///
    /// Best-effort: a failed log write must not mask the command failure.
    /// The command line is recorded unredacted.
    fn record_failure(&self, command_line: &str, code: i32, stdout: &str, stderr: &str) {
        let report = format!(
            "command: {}\nexit code: {}\n--- stdout ---\n{}\n--- stderr ---\n{}\n",
            command_line, code, stdout, stderr
        );
        let _ = std::fs::write(&self.failure_log, report);
    }
}

impl CommandRunner for ShellFetcher {
    fn run(&self, command_line: &str) -> Result<String> {
        let output = Command::new("sh").arg("-c").arg(command_line).output()?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let code = output.status.code().unwrap_or(-1);
        self.record_failure(
            command_line,
            code,
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        );
        Err(HubdeckError::CommandFailed {
            code,
            log: self.failure_log.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_captures_stdout() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = ShellFetcher::new(temp_dir.path().join("fetch_failure.log"));

        let out = fetcher.run("echo hello").unwrap();
        assert_eq!(out, "hello\n");
    }

    #[test]
    fn test_failure_carries_exit_code_and_writes_log() {
        let temp_dir = TempDir::new().unwrap();
        let log = temp_dir.path().join("fetch_failure.log");
        let fetcher = ShellFetcher::new(log.clone());

        let err = fetcher.run("echo oops >&2; exit 3").unwrap_err();
        match err {
            HubdeckError::CommandFailed { code, log: path } => {
                assert_eq!(code, 3);
                assert_eq!(path, log);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let report = std::fs::read_to_string(&log).unwrap();
        assert!(report.contains("command: echo oops >&2; exit 3"));
        assert!(report.contains("exit code: 3"));
        assert!(report.contains("oops"));
    }

    #[test]
    fn test_failure_log_is_overwritten_not_appended() {
        let temp_dir = TempDir::new().unwrap();
        let log = temp_dir.path().join("fetch_failure.log");
        let fetcher = ShellFetcher::new(log.clone());

        fetcher.run("exit 1").unwrap_err();
        let first = std::fs::read_to_string(&log).unwrap();
        fetcher.run("exit 2").unwrap_err();
        let second = std::fs::read_to_string(&log).unwrap();

        assert!(first.contains("exit code: 1"));
        assert!(second.contains("exit code: 2"));
        assert!(!second.contains("exit code: 1"));
    }
}
