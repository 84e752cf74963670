/// Handles argument parsing, answer collection and the run itself.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Application-wide constants.
pub mod constants;

/// Answers driving a run and their validation.
pub mod answers;

/// Rules deciding which template entries are skipped or renamed.
pub mod policy;

/// User input and interaction handling.
pub mod prompt;

/// Locates the bundled templates.
pub mod loader;

/// Invocation of external tools.
pub mod process;

/// Placeholder tokens and their substitution.
pub mod placeholder;

/// Values for placeholder tokens.
pub mod resolver;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Core template materialization.
pub mod template;

/// Deferred failures and closing guidance.
pub mod report;
