use std::fs;

use crate::error::Result;
use crate::placeholder::{substitute, PlaceholderPattern};
use crate::resolver::ValueResolver;

use super::operation::TemplateOperation;
use super::plan::{EntryKind, PlannedEntry};

/// Turns planned entries into filesystem operations.
///
/// Replaceable files are read and substituted here, so the materializer
/// only ever writes complete buffers.
pub struct TemplateProcessor<'a> {
    resolver: &'a ValueResolver<'a>,
    pattern: &'a PlaceholderPattern,
}

impl<'a> TemplateProcessor<'a> {
    pub fn new(resolver: &'a ValueResolver<'a>, pattern: &'a PlaceholderPattern) -> Self {
        Self { resolver, pattern }
    }

    /// Processes a planned entry and determines the operation to perform.
    ///
    /// # Errors
    /// * `Error::IoError` if a replaceable file cannot be read as UTF-8 text
    pub fn process(&self, entry: &PlannedEntry) -> Result<TemplateOperation> {
        match entry.kind {
            EntryKind::Directory => {
                Ok(TemplateOperation::CreateDirectory { target: entry.target.clone() })
            }
            EntryKind::File => Ok(TemplateOperation::Copy {
                source: entry.source.clone(),
                target: entry.target.clone(),
            }),
            EntryKind::ReplaceableFile => {
                let raw = fs::read_to_string(&entry.source)?;
                log::debug!("Substituting placeholders in '{}'", entry.source.display());
                let content =
                    substitute(&raw, self.pattern, |identifier| self.resolver.resolve(identifier));
                Ok(TemplateOperation::Write {
                    source: entry.source.clone(),
                    target: entry.target.clone(),
                    content,
                })
            }
        }
    }
}
