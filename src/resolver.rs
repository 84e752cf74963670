//! Values substituted for placeholder tokens.
//!
//! Some values come straight from the answers; others need an external query
//! (global git identity, package manager version). Queries run at most once
//! per [`ValueResolver`]: their outcome, including "undefined", is memoized in
//! a [`ResolverCache`] owned by the resolver and dropped with it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;

use crate::answers::AnswerSet;
use crate::error::Error;
use crate::placeholder::Placeholder;
use crate::process::CommandRunner;
use crate::report::{Failure, Stage};

/// Resolver categories backed by an external process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverCategory {
    GitIdentity,
    PackageManagerVersion,
}

/// Memoization table for one run. Entries are never invalidated.
#[derive(Debug, Default)]
pub struct ResolverCache {
    entries: RefCell<HashMap<ResolverCategory, Option<String>>>,
}

impl ResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized value for `category`, running `resolve` on first use.
    pub fn get_or_resolve<F>(&self, category: ResolverCategory, resolve: F) -> Option<String>
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(value) = self.entries.borrow().get(&category) {
            return value.clone();
        }
        let value = resolve();
        self.entries.borrow_mut().insert(category, value.clone());
        value
    }

    pub fn contains(&self, category: ResolverCategory) -> bool {
        self.entries.borrow().contains_key(&category)
    }
}

/// One node of a parsed `git config --list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNode {
    Value(String),
    Section(IndexMap<String, ConfigNode>),
}

/// `git config --list` output folded into a nested mapping on `.`.
///
/// `user.name=Jane` becomes `{"user": {"name": "Jane"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitConfig {
    root: IndexMap<String, ConfigNode>,
}

impl GitConfig {
    pub fn parse(listing: &str) -> Self {
        let mut root = IndexMap::new();
        for line in listing.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let (key, value) = line.split_once('=').unwrap_or((line, ""));
            let path: Vec<&str> = key.split('.').collect();
            insert(&mut root, &path, value);
        }
        Self { root }
    }

    /// Top-level section such as `user`.
    pub fn section(&self, key: &str) -> Option<&IndexMap<String, ConfigNode>> {
        match self.root.get(key)? {
            ConfigNode::Section(children) => Some(children),
            ConfigNode::Value(_) => None,
        }
    }

    /// Value of `<section>.<key>`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        match self.section(section)?.get(key)? {
            ConfigNode::Value(value) => Some(value.as_str()),
            ConfigNode::Section(_) => None,
        }
    }
}

fn insert(map: &mut IndexMap<String, ConfigNode>, path: &[&str], value: &str) {
    match path {
        [] => {}
        [last] => {
            map.insert(last.to_string(), ConfigNode::Value(value.to_string()));
        }
        [head, rest @ ..] => {
            let node = map
                .entry(head.to_string())
                .or_insert_with(|| ConfigNode::Section(IndexMap::new()));
            if let ConfigNode::Value(_) = node {
                *node = ConfigNode::Section(IndexMap::new());
            }
            if let ConfigNode::Section(children) = node {
                insert(children, rest, value);
            }
        }
    }
}

/// Supplies substitution values for a single run.
pub struct ValueResolver<'a> {
    answers: &'a AnswerSet,
    project_root: &'a Path,
    commands: &'a dyn CommandRunner,
    cache: ResolverCache,
    failures: RefCell<Vec<Failure>>,
}

impl<'a> ValueResolver<'a> {
    pub fn new(
        answers: &'a AnswerSet,
        project_root: &'a Path,
        commands: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            answers,
            project_root,
            commands,
            cache: ResolverCache::new(),
            failures: RefCell::new(Vec::new()),
        }
    }

    /// Value for a placeholder identifier, `None` if unknown or unavailable.
    pub fn resolve(&self, identifier: &str) -> Option<String> {
        match Placeholder::parse(identifier)? {
            Placeholder::ProjectName => Some(self.project_name()),
            Placeholder::YourName => self.git_user_name(),
            Placeholder::PackageManager => Some(self.answers.package_manager.to_string()),
            Placeholder::PackageManagerVersion => self.package_manager_version(),
            Placeholder::PackageManagerRunner => Some(self.package_manager_runner().to_string()),
        }
    }

    /// Basename of the project root.
    pub fn project_name(&self) -> String {
        self.project_root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.answers.project_name.clone())
    }

    /// `user.name` of the global git identity.
    pub fn git_user_name(&self) -> Option<String> {
        self.cache.get_or_resolve(ResolverCategory::GitIdentity, || {
            let listing = match self.commands.capture("git", &["config", "--global", "--list"], None)
            {
                Ok(listing) => listing,
                Err(e) => {
                    self.record(format!("Cannot read your git identity: {e}"));
                    return None;
                }
            };
            let name = GitConfig::parse(&listing)
                .get("user", "name")
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string);
            if name.is_none() {
                log::debug!("No global git user.name configured");
            }
            name
        })
    }

    /// Version string reported by the selected package manager.
    pub fn package_manager_version(&self) -> Option<String> {
        self.cache.get_or_resolve(ResolverCategory::PackageManagerVersion, || {
            let program = self.answers.package_manager.as_str();
            match self.commands.capture(program, &["--version"], None) {
                Ok(stdout) => Some(stdout.trim().to_string()).filter(|v| !v.is_empty()),
                Err(Error::CommandNotFound { .. }) => {
                    self.record(format!("Please install '{program}' first."));
                    None
                }
                Err(e) => {
                    self.record(format!("Cannot read the '{program}' version: {e}"));
                    None
                }
            }
        })
    }

    pub fn package_manager_runner(&self) -> &'static str {
        self.answers.package_manager.runner()
    }

    /// Drains soft failures hit while resolving.
    pub fn take_failures(&self) -> Vec<Failure> {
        self.failures.take()
    }

    fn record(&self, message: String) {
        log::warn!("{message}");
        self.failures.borrow_mut().push(Failure::new(Stage::Substitute, message));
    }
}
