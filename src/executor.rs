//! Running shell command lines.
//!
//! Each line handed to an [`Executor`] is a complete pipeline such as
//! `mysqldump ... | gzip > data.sql.gz`, so it has to go through the
//! platform command interpreter rather than being spawned directly.

use std::io;
use std::process::Command;

pub trait Executor {
    /// Run one command line to completion and return its exit code
    fn run(&mut self, command_line: &str) -> io::Result<i32>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn run(&mut self, command_line: &str) -> io::Result<i32> {
        (**self).run(command_line)
    }
}

/// Runs lines through `sh -c` (or `cmd /C` on Windows), inheriting stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellExecutor;

impl ShellExecutor {
    fn command(command_line: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command_line);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command_line);
            cmd
        }
    }
}

impl Executor for ShellExecutor {
    fn run(&mut self, command_line: &str) -> io::Result<i32> {
        let status = Self::command(command_line).status()?;
        // Killed by a signal: no code, but certainly not a success
        Ok(status.code().unwrap_or(-1))
    }
}

/// Prints lines to stdout instead of running them
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunExecutor;

impl Executor for DryRunExecutor {
    fn run(&mut self, command_line: &str) -> io::Result<i32> {
        println!("{}", command_line);
        Ok(0)
    }
}

/// Records every line and answers with scripted exit codes (0 once exhausted)
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub commands: Vec<String>,
    exit_codes: Vec<i32>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit codes returned for successive calls, in order
    pub fn with_exit_codes(mut self, codes: Vec<i32>) -> Self {
        self.exit_codes = codes;
        self.exit_codes.reverse();
        self
    }
}

impl Executor for RecordingExecutor {
    fn run(&mut self, command_line: &str) -> io::Result<i32> {
        self.commands.push(command_line.to_string());
        Ok(self.exit_codes.pop().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_executor_scripted_codes() {
        let mut exec = RecordingExecutor::new().with_exit_codes(vec![0, 3]);
        assert_eq!(exec.run("a").unwrap(), 0);
        assert_eq!(exec.run("b").unwrap(), 3);
        assert_eq!(exec.run("c").unwrap(), 0);
        assert_eq!(exec.commands, vec!["a", "b", "c"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_executor_reports_exit_code() {
        let mut exec = ShellExecutor;
        assert_eq!(exec.run("true").unwrap(), 0);
        assert_eq!(exec.run("exit 7").unwrap(), 7);
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_executor_runs_pipelines() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        let line = format!("echo hello | tr a-z A-Z > {}", out.display());
        assert_eq!(ShellExecutor.run(&line).unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&out).unwrap().trim(), "HELLO");
    }
}
