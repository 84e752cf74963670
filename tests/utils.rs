#![allow(dead_code)]

use create_cool_app::answers::{AnswerSet, GitSetup, PackageManager, RemoteSetup, TemplateKind};
use create_cool_app::error::{Error, Result};
use create_cool_app::process::{command_line, CommandRunner};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Writes `(relative path, content)` pairs below `root`, creating parents.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Writes a `template-library` fixture below `templates_root`.
pub fn library_fixture(templates_root: &Path) {
    write_tree(
        &templates_root.join("template-library"),
        &[
            ("package.json", r#"{"name": "${projectname}", "author": "${yourname}"}"#),
            ("README.md", "# ${projectname}\n\nRun `${pkgManagerX} demo` with ${pkgManager}@${pkgManagerVersion}.\n"),
            ("_gitignore", "node_modules\n"),
            ("src/index.js", "export const name = '${projectname}'\n"),
            ("node_modules/left-pad/index.js", "module.exports = {}\n"),
            ("dist/index.cjs", "module.exports = {}\n"),
            ("pnpm-lock.yaml", "lockfileVersion: '9.0'\n"),
        ],
    );
}

pub fn answers(project_name: &str, package_manager: PackageManager, install: bool, git: GitSetup) -> AnswerSet {
    AnswerSet {
        project_name: project_name.to_string(),
        template: TemplateKind::Library,
        package_manager,
        install,
        git,
    }
}

pub fn git_with_push(url: &str) -> GitSetup {
    GitSetup::Init { remote: Some(RemoteSetup { url: url.to_string(), push: true }) }
}

/// Fake command runner that records every invocation.
///
/// Programs registered as missing fail with `CommandNotFound`, command lines
/// registered as failing exit non-zero, and captured output comes from the
/// registered outputs (empty otherwise).
#[derive(Default)]
pub struct RecordingCommandRunner {
    pub calls: RefCell<Vec<String>>,
    missing: HashSet<String>,
    failing: HashSet<String>,
    outputs: HashMap<String, String>,
}

impl RecordingCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }

    pub fn failing(mut self, command: &str) -> Self {
        self.failing.insert(command.to_string());
        self
    }

    pub fn output(mut self, command: &str, stdout: &str) -> Self {
        self.outputs.insert(command.to_string(), stdout.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, command: &str) -> usize {
        self.calls.borrow().iter().filter(|call| *call == command).count()
    }

    fn invoke(&self, program: &str, args: &[&str]) -> Result<String> {
        let line = command_line(program, args);
        self.calls.borrow_mut().push(line.clone());
        if self.missing.contains(program) {
            return Err(Error::CommandNotFound { program: program.to_string() });
        }
        if self.failing.contains(&line) {
            return Err(Error::CommandFailed { command: line, status: "exit status: 1".into() });
        }
        Ok(self.outputs.get(&line).cloned().unwrap_or_default())
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn run(&self, program: &str, args: &[&str], _cwd: &Path) -> Result<()> {
        self.invoke(program, args).map(|_| ())
    }

    fn capture(&self, program: &str, args: &[&str], _cwd: Option<&Path>) -> Result<String> {
        self.invoke(program, args)
    }
}

/// Relative paths of every file below `dir`.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry.path().strip_prefix(dir).unwrap().to_string_lossy().replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

/// Prints files only present in one directory and files whose content differs.
pub fn print_dir_diff(actual: &Path, expected: &Path) {
    let actual_files: HashSet<String> = list_files(actual).into_iter().collect();
    let expected_files: HashSet<String> = list_files(expected).into_iter().collect();

    println!("\n=== Directory Comparison ===");
    for file in actual_files.difference(&expected_files) {
        println!("  + {file}");
    }
    for file in expected_files.difference(&actual_files) {
        println!("  - {file}");
    }
    for file in actual_files.intersection(&expected_files) {
        if fs::read(actual.join(file)).unwrap() != fs::read(expected.join(file)).unwrap() {
            println!("  ~ {file}");
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Asserts that two directory trees are byte-for-byte identical.
pub fn assert_same_tree(actual: &Path, expected: &Path) {
    if dir_diff::is_different(actual, expected).unwrap() {
        print_dir_diff(actual, expected);
        panic!("Directories differ. See above for details.");
    }
}
