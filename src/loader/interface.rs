use crate::answers::TemplateKind;
use crate::error::Result;
use std::path::PathBuf;

/// Trait for locating the directory of a template.
pub trait TemplateLoader {
    /// Returns the root directory of the template `kind`.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to the template directory
    fn load(&self, kind: TemplateKind) -> Result<PathBuf>;
}
