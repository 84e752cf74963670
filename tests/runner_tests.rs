mod utils;

use create_cool_app::answers::{GitSetup, PackageManager, RemoteSetup};
use create_cool_app::cli::Runner;
use create_cool_app::error::Error;
use create_cool_app::loader::local::LocalLoader;
use create_cool_app::process::DryRunCommandRunner;
use create_cool_app::report::Stage;
use std::fs;
use tempfile::TempDir;
use test_log::test;
use utils::{answers, git_with_push, library_fixture, list_files, RecordingCommandRunner};

const REMOTE: &str = "git@github.com:jane/demo.git";

fn fixture() -> (TempDir, TempDir) {
    let templates = TempDir::new().unwrap();
    library_fixture(templates.path());
    (templates, TempDir::new().unwrap())
}

#[test]
fn non_empty_project_root_aborts_before_any_write() {
    let (templates, workspace) = fixture();
    let project_root = workspace.path().join("demo");
    fs::create_dir_all(&project_root).unwrap();
    fs::write(project_root.join("notes.txt"), "keep me").unwrap();

    let answers = answers("demo", PackageManager::Pnpm, true, GitSetup::Init { remote: None });
    let loader = LocalLoader::new(templates.path());
    let commands = RecordingCommandRunner::new();
    let result = Runner::new(&answers, workspace.path(), &loader, &commands, false).run();

    assert!(matches!(result, Err(Error::OutputDirectoryNotEmptyError { .. })));
    assert_eq!(list_files(&project_root), vec!["notes.txt"]);
    assert!(commands.calls().is_empty());
}

#[test]
fn existing_git_directory_is_tolerated() {
    let (templates, workspace) = fixture();
    let project_root = workspace.path().join("demo");
    fs::create_dir_all(project_root.join(".git")).unwrap();

    let answers = answers("demo", PackageManager::Pnpm, false, GitSetup::Skip);
    let loader = LocalLoader::new(templates.path());
    let commands = RecordingCommandRunner::new();
    let report = Runner::new(&answers, workspace.path(), &loader, &commands, false).run().unwrap();

    assert!(!report.has_failures());
    assert!(project_root.join("package.json").is_file());
}

#[test]
fn full_run_invokes_commands_in_order() {
    let (templates, workspace) = fixture();
    let answers = answers("demo", PackageManager::Pnpm, true, git_with_push(REMOTE));
    let loader = LocalLoader::new(templates.path());
    let commands = RecordingCommandRunner::new()
        .output("git config --global --list", "user.name=Jane Doe\n")
        .output("pnpm --version", "9.1.0\n");

    let report = Runner::new(&answers, workspace.path(), &loader, &commands, false).run().unwrap();

    assert!(!report.has_failures());
    let calls = commands.calls();
    let external: Vec<&str> = calls
        .iter()
        .map(String::as_str)
        .filter(|call| !call.starts_with("git config") && !call.ends_with("--version"))
        .collect();
    assert_eq!(
        external,
        vec![
            "pnpm install",
            "git init",
            "git remote add origin git@github.com:jane/demo.git",
            "git add -A",
            "git commit -m chore: init",
            "git push -u origin",
        ]
    );
    assert!(!report.guidance.iter().any(|line| line.contains("pnpm install")));
    assert!(report.guidance.contains(&"  pnpm run dev".to_string()));
}

#[test]
fn missing_git_records_init_failure_and_keeps_files() {
    let (templates, workspace) = fixture();
    let answers = answers("demo", PackageManager::Npm, false, git_with_push(REMOTE));
    let loader = LocalLoader::new(templates.path());
    let commands = RecordingCommandRunner::new().missing("git");

    let report = Runner::new(&answers, workspace.path(), &loader, &commands, false).run().unwrap();

    let git_failures: Vec<_> =
        report.failures.iter().filter(|failure| failure.stage == Stage::GitInit).collect();
    assert_eq!(git_failures.len(), 1);
    assert_eq!(git_failures[0].message, "Please install 'git' first.");
    assert_eq!(commands.count("git init"), 1);
    assert_eq!(commands.count("git push -u origin"), 0);
    assert!(workspace.path().join("demo/package.json").is_file());
}

#[test]
fn unset_identity_keeps_literal_placeholder() {
    let (templates, workspace) = fixture();
    let answers = answers("demo", PackageManager::Pnpm, false, GitSetup::Skip);
    let loader = LocalLoader::new(templates.path());
    let commands = RecordingCommandRunner::new().output("git config --global --list", "core.editor=vim\n");

    let report = Runner::new(&answers, workspace.path(), &loader, &commands, false).run().unwrap();

    assert!(!report.has_failures());
    assert_eq!(
        fs::read_to_string(workspace.path().join("demo/package.json")).unwrap(),
        r#"{"name": "demo", "author": "${yourname}"}"#
    );
    assert_eq!(commands.count("git config --global --list"), 1);
}

#[test]
fn install_failure_does_not_block_git() {
    let (templates, workspace) = fixture();
    let answers = answers("demo", PackageManager::Yarn, true, GitSetup::Init { remote: None });
    let loader = LocalLoader::new(templates.path());
    let commands = RecordingCommandRunner::new().missing("yarn");

    let report = Runner::new(&answers, workspace.path(), &loader, &commands, false).run().unwrap();

    let install_failures: Vec<_> =
        report.failures.iter().filter(|failure| failure.stage == Stage::Install).collect();
    assert_eq!(install_failures.len(), 1);
    assert_eq!(install_failures[0].to_string(), "[create-cool-app/install]: Please install 'yarn' first.");
    assert_eq!(commands.count("git init"), 1);
    assert!(report.guidance.contains(&"  yarn install".to_string()));
}

#[test]
fn push_failure_is_reported_softly() {
    let (templates, workspace) = fixture();
    let answers = answers("demo", PackageManager::Pnpm, false, git_with_push(REMOTE));
    let loader = LocalLoader::new(templates.path());
    let commands = RecordingCommandRunner::new().failing("git push -u origin");

    let report = Runner::new(&answers, workspace.path(), &loader, &commands, false).run().unwrap();

    let push = report.failures.iter().find(|failure| failure.stage == Stage::GitPush).unwrap();
    assert!(push.message.contains(REMOTE));
    assert!(push.message.starts_with("Failed to push the current project"));
    assert_eq!(report.guidance[0], "Done. Now run:");
}

#[test]
fn remote_without_push_stops_after_remote() {
    let (templates, workspace) = fixture();
    let git = GitSetup::Init { remote: Some(RemoteSetup { url: REMOTE.into(), push: false }) };
    let answers = answers("demo", PackageManager::Pnpm, false, git);
    let loader = LocalLoader::new(templates.path());
    let commands = RecordingCommandRunner::new().failing("git remote add origin git@github.com:jane/demo.git");

    let report = Runner::new(&answers, workspace.path(), &loader, &commands, false).run().unwrap();

    assert!(report.failures.iter().any(|failure| failure.stage == Stage::GitRemote));
    assert_eq!(commands.count("git add -A"), 0);
}

#[test]
fn dry_run_writes_nothing_and_still_reports() {
    let (templates, workspace) = fixture();
    let answers = answers("demo", PackageManager::Pnpm, true, git_with_push(REMOTE));
    let loader = LocalLoader::new(templates.path());
    let commands = DryRunCommandRunner;

    let report = Runner::new(&answers, workspace.path(), &loader, &commands, true).run().unwrap();

    assert!(!workspace.path().join("demo").exists());
    assert!(!report.has_failures());
    assert_eq!(report.guidance[1], format!("  cd {}", workspace.path().join("demo").display()));
}
