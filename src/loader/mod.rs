use crate::constants::TEMPLATES_DIR;
use crate::error::{Error, Result};
use crate::loader::local::LocalLoader;
use anyhow::Context;
use std::path::PathBuf;

pub mod interface;
pub mod local;

/// Where the templates directory was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Given with `--templates` or the environment
    Explicit(PathBuf),
    /// Shipped next to the executable
    Executable(PathBuf),
    /// The `templates/` directory of this package
    Bundled(PathBuf),
}

impl TemplateSource {
    pub fn path(&self) -> &PathBuf {
        match self {
            TemplateSource::Explicit(path)
            | TemplateSource::Executable(path)
            | TemplateSource::Bundled(path) => path,
        }
    }
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::Explicit(path) => write!(f, "templates: '{}'", path.display()),
            TemplateSource::Executable(path) => {
                write!(f, "templates next to executable: '{}'", path.display())
            }
            TemplateSource::Bundled(path) => {
                write!(f, "bundled templates: '{}'", path.display())
            }
        }
    }
}

/// Finds the directory holding the `template-<id>` directories.
///
/// An explicit directory is used as is and must exist. Otherwise the
/// `templates/` directory next to the executable is tried, then the one
/// shipped with this package.
pub fn locate_templates(explicit: Option<PathBuf>) -> Result<TemplateSource> {
    if let Some(dir) = explicit {
        if !dir.is_dir() {
            return Err(Error::TemplatesRootNotFoundError { searched: dir.display().to_string() });
        }
        return Ok(TemplateSource::Explicit(dir));
    }

    let exe = std::env::current_exe().context("Failed to resolve the current executable")?;
    let mut candidates = Vec::new();
    if let Some(exe_dir) = exe.parent() {
        candidates.push(TemplateSource::Executable(exe_dir.join(TEMPLATES_DIR)));
    }
    candidates.push(TemplateSource::Bundled(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(TEMPLATES_DIR),
    ));

    if let Some(found) = candidates.iter().find(|source| source.path().is_dir()) {
        log::debug!("Using {found}");
        return Ok(found.clone());
    }
    Err(Error::TemplatesRootNotFoundError {
        searched: candidates
            .iter()
            .map(|source| format!("'{}'", source.path().display()))
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Creates a loader over the located templates directory.
pub fn get_loader(explicit: Option<PathBuf>) -> Result<LocalLoader<PathBuf>> {
    let source = locate_templates(explicit)?;
    Ok(LocalLoader::new(source.path().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_source_display() {
        let source = TemplateSource::Explicit(PathBuf::from("/path/to/templates"));
        assert_eq!(format!("{source}"), "templates: '/path/to/templates'");
    }

    #[test]
    fn explicit_directory_must_exist() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("missing");
        assert!(matches!(
            locate_templates(Some(missing)),
            Err(Error::TemplatesRootNotFoundError { .. })
        ));
        assert_eq!(
            locate_templates(Some(tmp.path().to_path_buf())).unwrap(),
            TemplateSource::Explicit(tmp.path().to_path_buf())
        );
    }

    #[test]
    fn falls_back_to_bundled_templates() {
        let source = locate_templates(None).unwrap();
        assert!(source.path().join("template-library").is_dir());
    }
}
