use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::policy::{CopyPolicy, EntryAction};

/// How a planned entry reaches the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    /// Copied byte for byte.
    File,
    /// Read as text and passed through placeholder substitution.
    ReplaceableFile,
}

/// One `(source, target)` pair of a [`CopyPlan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub source: PathBuf,
    pub target: PathBuf,
    pub kind: EntryKind,
}

/// Ordered list of template entries to materialize, after exclusions and renames.
///
/// Directories always precede their contents. Entries inside a directory are
/// sorted by file name so that repeated runs produce the same plan.
#[derive(Debug, Clone, Default)]
pub struct CopyPlan {
    entries: Vec<PlannedEntry>,
}

impl CopyPlan {
    /// Walks `template_root` and maps every kept entry below `dest_root`.
    ///
    /// An excluded directory is pruned together with everything beneath it.
    /// Renames are resolved per path component, so `_gitignore` is renamed
    /// wherever it appears in the tree.
    ///
    /// # Errors
    /// * `Error::WalkDirError` if the template tree cannot be read
    /// * `Error::DestinationCollisionError` if two entries map to the same target
    pub fn build(template_root: &Path, dest_root: &Path, policy: &CopyPolicy) -> Result<Self> {
        let walker = WalkDir::new(template_root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                policy.target_name(&entry.file_name().to_string_lossy()).is_some()
            });

        let mut entries = Vec::new();
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

        for dir_entry in walker {
            let dir_entry = dir_entry?;
            let source = dir_entry.path().to_path_buf();
            let target = target_path(template_root, &source, dest_root, policy);

            if let Some(first) = claimed.get(&target) {
                return Err(Error::DestinationCollisionError {
                    first: first.display().to_string(),
                    second: source.display().to_string(),
                    target: target.display().to_string(),
                });
            }
            claimed.insert(target.clone(), source.clone());

            let kind = if dir_entry.file_type().is_dir() {
                EntryKind::Directory
            } else if target
                .file_name()
                .is_some_and(|name| policy.is_replaceable(&name.to_string_lossy()))
            {
                EntryKind::ReplaceableFile
            } else {
                EntryKind::File
            };

            log::debug!("Planned {kind:?} '{}' -> '{}'", source.display(), target.display());
            entries.push(PlannedEntry { source, target, kind });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PlannedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn target_path(
    template_root: &Path,
    source: &Path,
    dest_root: &Path,
    policy: &CopyPolicy,
) -> PathBuf {
    let relative = source.strip_prefix(template_root).unwrap_or(source);
    let mut target = dest_root.to_path_buf();
    for component in relative.components() {
        let name = component.as_os_str();
        match policy.decide(&name.to_string_lossy()) {
            EntryAction::Rename(renamed) => target.push(renamed),
            EntryAction::Keep | EntryAction::Skip => target.push(name),
        }
    }
    target
}
