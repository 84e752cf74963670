use crate::constants::{verbosity, TEMPLATES_ENV};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Scaffold a new project from one of the bundled starter templates.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory in which the project directory is created.
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub directory: PathBuf,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Predefined answers as JSON string or `-` to read from stdin.
    #[arg(short, long)]
    pub answers: Option<String>,

    /// Never prompt; unanswered questions take their defaults.
    #[arg(long = "non-interactive")]
    pub non_interactive: bool,

    /// Preview actions without touching the filesystem or running commands.
    #[arg(long = "dry-run", visible_alias = "dry")]
    pub dry_run: bool,

    /// Directory containing the `template-<name>` directories.
    #[arg(long, value_name = "DIR", env = TEMPLATES_ENV)]
    pub templates: Option<PathBuf>,
}

/// Parse command line arguments, exiting with clap's usage message on error.
pub fn get_args() -> Args {
    Args::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

/// Log level for a run. Dry runs log at least at `info` so every skipped action is visible.
pub fn get_log_level(args: &Args) -> LevelFilter {
    let level = get_log_level_from_verbose(args.verbose);
    if args.dry_run {
        level.max(LevelFilter::Info)
    } else {
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_verbose_flags_to_log_filters() {
        assert_eq!(get_log_level_from_verbose(verbosity::OFF), LevelFilter::Error);
        assert_eq!(get_log_level_from_verbose(verbosity::INFO), LevelFilter::Info);
        assert_eq!(get_log_level_from_verbose(verbosity::DEBUG), LevelFilter::Debug);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE), LevelFilter::Trace);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE + 1), LevelFilter::Trace);
    }

    #[test]
    fn parses_minimal_args() {
        let args = Args::parse_from(["create-cool-app"]);
        assert_eq!(args.directory, PathBuf::from("."));
        assert!(!args.dry_run);
        assert!(!args.non_interactive);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn dry_alias_enables_dry_run() {
        let args = Args::parse_from(["create-cool-app", "--dry"]);
        assert!(args.dry_run);
        assert_eq!(get_log_level(&args), LevelFilter::Info);

        let args = Args::parse_from(["create-cool-app", "--dry-run", "-vv"]);
        assert_eq!(get_log_level(&args), LevelFilter::Debug);
    }

    #[test]
    fn parses_full_feature_flags() {
        let args = Args::parse_from([
            "create-cool-app",
            "workspace",
            "-vvv",
            "--answers",
            "{\"projectName\":\"demo\"}",
            "--non-interactive",
            "--templates",
            "/opt/templates",
        ]);
        assert_eq!(args.directory, PathBuf::from("workspace"));
        assert_eq!(args.verbose, 3);
        assert_eq!(args.answers, Some("{\"projectName\":\"demo\"}".to_string()));
        assert!(args.non_interactive);
        assert_eq!(args.templates, Some(PathBuf::from("/opt/templates")));
    }
}
