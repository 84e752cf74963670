//! User decisions driving a single scaffolding run.
//!
//! [`RawAnswers`] mirrors whatever the user supplied (preloaded JSON and prompt
//! results, every field optional). [`AnswerSet`] is the validated, immutable
//! record the pipeline consumes. Fields that only make sense behind a guard
//! (remote url, push flag) live inside [`GitSetup`] so they cannot be read
//! when their guard is off.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::TEMPLATE_DIR_PREFIX;
use crate::error::{Error, Result};

/// Bundled starter templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    Library,
    LibraryTs,
    Ts,
    TsMono,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] =
        [TemplateKind::Library, TemplateKind::LibraryTs, TemplateKind::Ts, TemplateKind::TsMono];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Library => "library",
            TemplateKind::LibraryTs => "library-ts",
            TemplateKind::Ts => "ts",
            TemplateKind::TsMono => "ts-mono",
        }
    }

    /// Name of the bundled directory holding this template.
    pub fn dir_name(&self) -> String {
        format!("{TEMPLATE_DIR_PREFIX}{}", self.as_str())
    }

    /// Package managers the template can be installed with, preferred first.
    pub fn package_managers(&self) -> &'static [PackageManager] {
        match self {
            TemplateKind::TsMono => &[PackageManager::Pnpm],
            _ => &[PackageManager::Pnpm, PackageManager::Npm, PackageManager::Yarn],
        }
    }
}

impl Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TemplateKind::ALL.into_iter().find(|kind| kind.as_str() == s).ok_or_else(|| {
            Error::UnknownChoice {
                kind: "template".into(),
                value: s.into(),
                expected: join(&TemplateKind::ALL),
            }
        })
    }
}

/// Supported package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Pnpm,
    Npm,
    Yarn,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] =
        [PackageManager::Pnpm, PackageManager::Npm, PackageManager::Yarn];

    /// Binary name of the package manager.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Command that runs a package binary without installing it globally.
    pub fn runner(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npx",
            PackageManager::Yarn => "yarn",
        }
    }
}

impl Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PackageManager::ALL.into_iter().find(|pm| pm.as_str() == s).ok_or_else(|| {
            Error::UnknownChoice {
                kind: "package manager".into(),
                value: s.into(),
                expected: join(&PackageManager::ALL),
            }
        })
    }
}

fn join<T: Display>(items: &[T]) -> String {
    items.iter().map(|item| item.to_string()).collect::<Vec<_>>().join(", ")
}

/// Remote repository settings, only present once git init was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSetup {
    pub url: String,
    pub push: bool,
}

/// Git bootstrap requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitSetup {
    Skip,
    Init { remote: Option<RemoteSetup> },
}

impl GitSetup {
    pub fn remote(&self) -> Option<&RemoteSetup> {
        match self {
            GitSetup::Skip => None,
            GitSetup::Init { remote } => remote.as_ref(),
        }
    }
}

/// Answers as supplied on the command line or collected from prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnswers {
    pub project_name: Option<String>,
    pub template_name: Option<TemplateKind>,
    pub pkg_manager: Option<PackageManager>,
    pub need_install: Option<bool>,
    pub need_git_init: Option<bool>,
    pub need_git_remote_origin: Option<bool>,
    pub git_remote_origin: Option<String>,
    pub need_git_push: Option<bool>,
}

impl RawAnswers {
    /// Parses preloaded answers from a JSON object.
    pub fn from_json(buf: &str) -> Result<Self> {
        if buf.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(buf)?)
    }
}

/// Immutable record of the user's decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    pub project_name: String,
    pub template: TemplateKind,
    pub package_manager: PackageManager,
    pub install: bool,
    pub git: GitSetup,
}

impl AnswerSet {
    /// Validates raw answers, reading each conditional field only when its guard is set.
    ///
    /// Missing booleans default to `false`, a missing template to `library` and
    /// a missing package manager to the template's preferred one.
    pub fn try_from_raw(raw: RawAnswers) -> Result<Self> {
        let project_name =
            raw.project_name.ok_or_else(|| Error::MissingAnswer { field: "projectName".into() })?;
        validate_project_name(&project_name)?;

        let template = raw.template_name.unwrap_or(TemplateKind::Library);
        let package_manager = match raw.pkg_manager {
            Some(pm) => pm,
            None => template.package_managers()[0],
        };
        if !template.package_managers().contains(&package_manager) {
            return Err(Error::UnsupportedPackageManager {
                template: template.to_string(),
                package_manager: package_manager.to_string(),
            });
        }

        let git = if raw.need_git_init.unwrap_or(false) {
            let remote = if raw.need_git_remote_origin.unwrap_or(false) {
                let url = raw.git_remote_origin.ok_or_else(|| Error::MissingAnswer {
                    field: "gitRemoteOrigin".into(),
                })?;
                validate_remote_url(&url)?;
                Some(RemoteSetup { url, push: raw.need_git_push.unwrap_or(false) })
            } else {
                None
            };
            GitSetup::Init { remote }
        } else {
            GitSetup::Skip
        };

        Ok(Self {
            project_name,
            template,
            package_manager,
            install: raw.need_install.unwrap_or(false),
            git,
        })
    }
}

/// Project names must be non-empty and free of whitespace and commas.
pub fn validate_project_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "the name cannot be empty"
    } else if name.chars().any(|c| c.is_whitespace() || c == ',') {
        "the name cannot include space and comma"
    } else {
        return Ok(());
    };
    Err(Error::InvalidProjectName { name: name.to_string(), reason: reason.to_string() })
}

/// Checks whether the provided string looks like a git remote url.
pub fn is_git_url(s: &str) -> bool {
    if let Ok(url) = Url::parse(s) {
        return matches!(url.scheme(), "http" | "https" | "git" | "ssh" | "file");
    }

    // scp-like syntax: user@host:path
    if s.contains("://") {
        return false;
    }
    match (s.find('@'), s.rfind(':')) {
        (Some(at_pos), Some(colon_pos)) if colon_pos > at_pos => {
            let user_part = &s[..at_pos];
            let host_part = &s[at_pos + 1..colon_pos];
            let path_part = &s[colon_pos + 1..];
            !user_part.is_empty() && !host_part.is_empty() && !path_part.is_empty()
        }
        _ => false,
    }
}

pub fn validate_remote_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(Error::InvalidRemoteUrl {
            url: url.to_string(),
            reason: "the url cannot be empty".into(),
        });
    }
    if !is_git_url(url) {
        return Err(Error::InvalidRemoteUrl {
            url: url.to_string(),
            reason: "expected an http(s), ssh, git or file url, or user@host:path".into(),
        });
    }
    Ok(())
}
