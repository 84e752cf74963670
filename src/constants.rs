//! Constants used throughout the create-cool-app application

/// Name used as prefix in deferred error messages
pub const TOOL_NAME: &str = "create-cool-app";

/// Template entries that never propagate into a generated project
pub const EXCLUDED_ENTRIES: &[&str] = &["node_modules", "dist", "pnpm-lock.yaml"];

/// Template entries renamed on copy, `(source name, destination name)`
pub const RENAMED_ENTRIES: &[(&str, &str)] = &[("_gitignore", ".gitignore")];

/// Files whose placeholders are resolved during materialization
pub const REPLACEABLE_FILES: &[&str] = &["package.json", "README.md"];

/// Placeholder token pattern, e.g. `${projectname}` or `${ pkgManager }`
pub const PLACEHOLDER_PATTERN: &str = r"(?i)\$\{\s*(\w+?)\s*\}";

/// Prefix of every bundled template directory
pub const TEMPLATE_DIR_PREFIX: &str = "template-";

/// Directory holding the bundled templates
pub const TEMPLATES_DIR: &str = "templates";

/// Environment variable overriding the templates directory
pub const TEMPLATES_ENV: &str = "CREATE_COOL_APP_TEMPLATES";

/// Version-control directory tolerated inside an otherwise empty project root
pub const VCS_DIR: &str = ".git";

/// Commit message of the initial commit
pub const INIT_COMMIT_MESSAGE: &str = "chore: init";

/// Remote name used by the git bootstrap
pub const GIT_REMOTE_NAME: &str = "origin";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
