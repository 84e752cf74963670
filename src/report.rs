//! Deferred failure records and the closing guidance of a run.

use std::fmt::Display;
use std::io::Write;

use console::style;

use crate::answers::PackageManager;
use crate::constants::TOOL_NAME;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Materialize,
    Substitute,
    Install,
    GitInit,
    GitRemote,
    GitPush,
    Report,
}

impl Stage {
    /// Short tag shown in front of deferred messages.
    pub fn tag(&self) -> &'static str {
        match self {
            Stage::Materialize => "copy",
            Stage::Substitute => "placeholder",
            Stage::Install => "install",
            Stage::GitInit | Stage::GitRemote | Stage::GitPush => "git",
            Stage::Report => "report",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Materialize => "materialize",
            Stage::Substitute => "substitute",
            Stage::Install => "install",
            Stage::GitInit => "git-init",
            Stage::GitRemote => "git-remote",
            Stage::GitPush => "git-push",
            Stage::Report => "report",
        };
        write!(f, "{s}")
    }
}

/// A soft failure recorded during the run and reported at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub stage: Stage,
    pub message: String,
}

impl Failure {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self { stage, message: message.into() }
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{TOOL_NAME}/{}]: {}", self.stage.tag(), self.message)
    }
}

/// Outcome of a run: deferred failures followed by "what to run next".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub failures: Vec<Failure>,
    pub guidance: Vec<String>,
}

impl Report {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn print(&self, out: &mut impl Write) -> std::io::Result<()> {
        if self.has_failures() {
            writeln!(out)?;
            for failure in &self.failures {
                writeln!(out, "{}", style(failure).red())?;
            }
        }
        writeln!(out)?;
        for line in &self.guidance {
            writeln!(out, "{}", style(line).green())?;
        }
        writeln!(out)
    }
}

/// Commands the user should run next.
///
/// The install command is listed whenever dependencies were not installed
/// by this run, either because it was skipped or because it failed.
pub fn guidance(project_path: &str, package_manager: PackageManager, installed: bool) -> Vec<String> {
    let mut lines = vec!["Done. Now run:".to_string(), format!("  cd {project_path}")];
    if !installed {
        lines.push(format!("  {package_manager} install"));
    }
    lines.push(format!("  {package_manager} run dev"));
    lines
}
