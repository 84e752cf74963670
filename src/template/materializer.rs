use std::path::Path;

use crate::error::{Error, Result};
use crate::ioutils::{atomic_copy, atomic_write, create_dir_all};
use crate::policy::CopyPolicy;

use super::operation::TemplateOperation;
use super::plan::CopyPlan;
use super::processor::TemplateProcessor;

/// Counts of what a materialization wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeSummary {
    pub directories: usize,
    pub copied: usize,
    pub written: usize,
}

/// Copies a template tree into a project root.
pub struct Materializer<'a> {
    processor: TemplateProcessor<'a>,
    policy: &'a CopyPolicy,
    dry_run: bool,
}

impl<'a> Materializer<'a> {
    pub fn new(processor: TemplateProcessor<'a>, policy: &'a CopyPolicy, dry_run: bool) -> Self {
        Self { processor, policy, dry_run }
    }

    /// Materializes `template_root` into `dest_root`.
    ///
    /// The whole plan is built before anything is written. Each file lands
    /// through a temporary sibling, so a failure never leaves a half-written
    /// file behind; files written before the failure are kept.
    pub fn materialize(&self, template_root: &Path, dest_root: &Path) -> Result<MaterializeSummary> {
        if !template_root.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: template_root.display().to_string(),
            });
        }

        let plan = CopyPlan::build(template_root, dest_root, self.policy)?;
        log::debug!(
            "Materializing {} entries from '{}' into '{}'",
            plan.len(),
            template_root.display(),
            dest_root.display()
        );

        let root = TemplateOperation::CreateDirectory { target: dest_root.to_path_buf() };
        self.apply(&root)?;
        log::info!("{}", root.get_message(self.dry_run));

        let mut summary = MaterializeSummary::default();
        for entry in plan.entries() {
            let operation = self.processor.process(entry)?;
            if let Err(e) = self.apply(&operation) {
                log::error!("Failed to {}: {e}", operation.error_context());
                return Err(e);
            }
            log::info!("{}", operation.get_message(self.dry_run));

            match operation {
                TemplateOperation::CreateDirectory { .. } => summary.directories += 1,
                TemplateOperation::Copy { .. } => summary.copied += 1,
                TemplateOperation::Write { .. } => summary.written += 1,
            }
        }
        Ok(summary)
    }

    fn apply(&self, operation: &TemplateOperation) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }
        match operation {
            TemplateOperation::CreateDirectory { target } => create_dir_all(target),
            TemplateOperation::Copy { source, target } => atomic_copy(source, target),
            TemplateOperation::Write { source, target, content } => {
                atomic_write(source, target, content.as_bytes())
            }
        }
    }
}
