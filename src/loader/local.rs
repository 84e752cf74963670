use crate::answers::TemplateKind;
use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;
use std::path::{Path, PathBuf};

/// Loader for templates stored as `template-<id>` directories on the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    root: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    /// Creates a new LocalLoader over the directory holding the templates.
    pub fn new(root: P) -> Self {
        Self { root }
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    fn load(&self, kind: TemplateKind) -> Result<PathBuf> {
        let path = self.root.as_ref().join(kind.dir_name());
        if !path.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: path.display().to_string(),
            });
        }
        log::debug!("Using template '{kind}' from '{}'", path.display());
        Ok(path)
    }
}
