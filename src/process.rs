use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Invokes external tools (package managers, git) on behalf of the pipeline.
///
/// Every call blocks until the child exits. Only the exit status and the
/// standard output text are observed.
pub trait CommandRunner {
    /// Runs `program` inside `cwd` with the terminal attached to the child.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()>;

    /// Runs `program` and returns its standard output.
    fn capture(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<String>;
}

/// Renders a command line for log and error messages.
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ")
}

fn spawn_error(program: &str, e: std::io::Error) -> Error {
    if e.kind() == ErrorKind::NotFound {
        Error::CommandNotFound { program: program.to_string() }
    } else {
        Error::IoError(e)
    }
}

/// Runs commands for real through `std::process::Command`.
#[derive(Debug, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        log::debug!("Running '{}' in {}", command_line(program, args), cwd.display());

        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| spawn_error(program, e))?;

        if !status.success() {
            return Err(Error::CommandFailed {
                command: command_line(program, args),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    fn capture(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<String> {
        log::debug!("Capturing output of '{}'", command_line(program, args));

        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::null());
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }
        let output = command.output().map_err(|e| spawn_error(program, e))?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: command_line(program, args),
                status: output.status.to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Replaces every invocation with a log line. Captured output is always empty.
#[derive(Debug, Default)]
pub struct DryRunCommandRunner;

impl CommandRunner for DryRunCommandRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        log::info!("[DRY RUN] {} (in '{}')", command_line(program, args), cwd.display());
        Ok(())
    }

    fn capture(&self, program: &str, args: &[&str], _cwd: Option<&Path>) -> Result<String> {
        log::info!("[DRY RUN] {}", command_line(program, args));
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_command_lines() {
        assert_eq!(command_line("git", &["remote", "add", "origin", "url"]), "git remote add origin url");
        assert_eq!(command_line("pnpm", &[]), "pnpm");
    }

    #[test]
    fn missing_binary_is_reported_as_not_found() {
        let runner = SystemCommandRunner;
        let result = runner.capture("create-cool-app-definitely-missing-binary", &["--version"], None);
        assert!(matches!(result, Err(Error::CommandNotFound { program })
            if program == "create-cool-app-definitely-missing-binary"));
    }

    #[test]
    fn dry_run_never_executes() {
        let runner = DryRunCommandRunner;
        let tmp = tempfile::TempDir::new().unwrap();
        runner.run("create-cool-app-definitely-missing-binary", &["install"], tmp.path()).unwrap();
        assert_eq!(runner.capture("git", &["config", "--global", "--list"], None).unwrap(), "");
    }
}
