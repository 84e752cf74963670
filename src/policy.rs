use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use log::debug;

use crate::constants::{EXCLUDED_ENTRIES, RENAMED_ENTRIES, REPLACEABLE_FILES};
use crate::error::{Error, Result};

/// What happens to a single template entry when it is copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction<'a> {
    /// The entry (and everything below it) is not copied.
    Skip,
    /// The entry is copied under a different name.
    Rename(&'a str),
    /// The entry is copied under its own name.
    Keep,
}

/// Static rule set deciding which template entries are skipped, renamed or
/// kept, and which copied files have their placeholders resolved.
///
/// Rules are matched against a single entry name, never a full path, so they
/// apply uniformly at every depth of the template tree.
#[derive(Debug, Clone)]
pub struct CopyPolicy {
    excluded: GlobSet,
    renames: IndexMap<String, String>,
    replaceable: Vec<String>,
}

impl CopyPolicy {
    /// Builds the policy used for the bundled templates.
    pub fn new() -> Result<Self> {
        Self::with_rules(EXCLUDED_ENTRIES, RENAMED_ENTRIES, REPLACEABLE_FILES)
    }

    /// Builds a policy from explicit rules.
    ///
    /// # Errors
    /// * `Error::PolicyError` if two renames share a destination or a rename
    ///   target is itself renamed
    /// * `Error::GlobSetParseError` if an exclusion is not a valid pattern
    pub fn with_rules(
        excluded: &[&str],
        renames: &[(&str, &str)],
        replaceable: &[&str],
    ) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in excluded {
            debug!("Adding exclusion pattern: {pattern}");
            builder.add(Glob::new(pattern)?);
        }

        let mut rename_map: IndexMap<String, String> = IndexMap::new();
        for (from, to) in renames {
            if rename_map.values().any(|target| target == to) {
                return Err(Error::PolicyError(format!(
                    "more than one entry is renamed to '{to}'"
                )));
            }
            rename_map.insert(from.to_string(), to.to_string());
        }
        if let Some(target) = rename_map.values().find(|to| rename_map.contains_key(*to)) {
            return Err(Error::PolicyError(format!(
                "'{target}' is both a rename source and a rename target"
            )));
        }

        Ok(Self {
            excluded: builder.build()?,
            renames: rename_map,
            replaceable: replaceable.iter().map(|name| name.to_string()).collect(),
        })
    }

    /// Decides what to do with the template entry called `name`.
    pub fn decide(&self, name: &str) -> EntryAction<'_> {
        if self.excluded.is_match(name) {
            EntryAction::Skip
        } else if let Some(target) = self.renames.get(name) {
            EntryAction::Rename(target)
        } else {
            EntryAction::Keep
        }
    }

    /// Name of the destination entry, or `None` if the entry is skipped.
    pub fn target_name<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        match self.decide(name) {
            EntryAction::Skip => None,
            EntryAction::Rename(target) => Some(target),
            EntryAction::Keep => Some(name),
        }
    }

    /// Whether a destination file with this basename gets placeholder substitution.
    pub fn is_replaceable(&self, name: &str) -> bool {
        self.replaceable.iter().any(|candidate| candidate == name)
    }
}
