use std::path::PathBuf;

/// A single filesystem action of the materializer.
#[derive(Debug)]
pub enum TemplateOperation {
    Copy { source: PathBuf, target: PathBuf },
    Write { source: PathBuf, target: PathBuf, content: String },
    CreateDirectory { target: PathBuf },
}

impl TemplateOperation {
    /// Returns the target path for this operation.
    pub fn target_path(&self) -> &PathBuf {
        match self {
            TemplateOperation::Copy { target, .. } => target,
            TemplateOperation::Write { target, .. } => target,
            TemplateOperation::CreateDirectory { target } => target,
        }
    }

    /// Returns a brief description of this operation for error messages.
    ///
    /// # Returns
    /// * `String` - A concise description including the operation type and paths
    pub fn error_context(&self) -> String {
        match self {
            TemplateOperation::Copy { source, target } => {
                format!("copy '{}' -> '{}'", source.display(), target.display())
            }
            TemplateOperation::Write { target, .. } => {
                format!("write '{}'", target.display())
            }
            TemplateOperation::CreateDirectory { target } => {
                format!("create directory '{}'", target.display())
            }
        }
    }

    /// Gets a message describing the operation.
    ///
    /// # Arguments
    /// * `dry_run` - Whether this is a dry run (no actual file operations)
    ///
    /// # Returns
    /// * `String` - A descriptive message about the operation
    pub fn get_message(&self, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };

        match self {
            TemplateOperation::Copy { source, target } => {
                format!("{}Copying '{}' to '{}'", prefix, source.display(), target.display())
            }
            TemplateOperation::Write { source, target, .. } => {
                format!(
                    "{}Writing '{}' to '{}' (placeholders resolved)",
                    prefix,
                    source.display(),
                    target.display()
                )
            }
            TemplateOperation::CreateDirectory { target } => {
                format!("{}Creating directory '{}'", prefix, target.display())
            }
        }
    }
}
