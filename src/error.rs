use console::style;
use thiserror::Error;

use crate::constants::exit_codes;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to walk the template directory. Original error: {0}")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Failed to build the copy policy. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Failed to compile the placeholder pattern. Original error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Failed to parse answers as JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Prompt failed. Original error: {0}")]
    PromptError(#[from] dialoguer::Error),

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Cannot proceed: the directory '{output_dir}' already exists and is not empty.")]
    OutputDirectoryNotEmptyError { output_dir: String },

    #[error("Invalid remote url '{url}': {reason}")]
    InvalidRemoteUrl { url: String, reason: String },

    #[error("The template '{template}' does not support the package manager '{package_manager}'.")]
    UnsupportedPackageManager { template: String, package_manager: String },

    #[error("Missing answer for '{field}'.")]
    MissingAnswer { field: String },

    #[error("Unknown {kind} '{value}'. Expected one of: {expected}.")]
    UnknownChoice { kind: String, value: String, expected: String },

    #[error("Cannot proceed: template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Cannot locate the templates directory. Tried: {searched}.")]
    TemplatesRootNotFoundError { searched: String },

    #[error("Copy policy is invalid: {0}")]
    PolicyError(String),

    #[error("Template entries '{first}' and '{second}' would both be written to '{target}'.")]
    DestinationCollisionError { first: String, second: String, target: String },

    #[error("Command '{program}' was not found.")]
    CommandNotFound { program: String },

    #[error("Command '{command}' failed with status: {status}")]
    CommandFailed { command: String, status: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with the crate's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", style(err).red());
    std::process::exit(exit_codes::FAILURE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn output_directory_message_names_directory() {
        let err = Error::OutputDirectoryNotEmptyError { output_dir: "demo".into() };
        assert_eq!(
            err.to_string(),
            "Cannot proceed: the directory 'demo' already exists and is not empty."
        );
    }
}
