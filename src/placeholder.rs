//! Placeholder substitution.
//!
//! Tokens look like `${projectname}`: an identifier wrapped in `${` and `}`,
//! optionally padded with whitespace. Each match is handed to a resolver; a
//! defined value replaces the whole token, an undefined one leaves the token
//! exactly as it was written.

use regex::{Captures, Regex};

use crate::constants::PLACEHOLDER_PATTERN;
use crate::error::Result;

/// Identifiers understood by the value resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `${projectname}`
    ProjectName,
    /// `${yourname}`: display name of the global git identity
    YourName,
    /// `${pkgManager}`
    PackageManager,
    /// `${pkgManagerVersion}`
    PackageManagerVersion,
    /// `${pkgManagerX}`: command that runs a package binary
    PackageManagerRunner,
}

impl Placeholder {
    /// Matches an identifier case-insensitively.
    pub fn parse(identifier: &str) -> Option<Self> {
        const KNOWN: [(&str, Placeholder); 5] = [
            ("projectname", Placeholder::ProjectName),
            ("yourname", Placeholder::YourName),
            ("pkgmanager", Placeholder::PackageManager),
            ("pkgmanagerversion", Placeholder::PackageManagerVersion),
            ("pkgmanagerx", Placeholder::PackageManagerRunner),
        ];
        KNOWN
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(identifier))
            .map(|(_, placeholder)| *placeholder)
    }
}

/// Compiled token pattern.
#[derive(Debug, Clone)]
pub struct PlaceholderPattern {
    regex: Regex,
}

impl PlaceholderPattern {
    pub fn new() -> Result<Self> {
        Self::with_pattern(PLACEHOLDER_PATTERN)
    }

    /// Uses a custom pattern. Capture group 1 must hold the identifier.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(Self { regex: Regex::new(pattern)? })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Replaces every token in `content` in a single pass.
///
/// `resolve` receives the captured identifier. Tokens it returns `None` for
/// are copied to the output byte for byte.
pub fn substitute<F>(content: &str, pattern: &PlaceholderPattern, mut resolve: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    pattern
        .regex()
        .replace_all(content, |caps: &Captures| match resolve(&caps[1]) {
            Some(value) => value,
            None => caps[0].to_string(),
        })
        .into_owned()
}
