use crate::{
    answers::{AnswerSet, GitSetup},
    cli::{answers::AnswerCollector, Args},
    constants::{GIT_REMOTE_NAME, INIT_COMMIT_MESSAGE},
    error::{Error, Result},
    ioutils::ensure_empty_output_dir,
    loader::{get_loader, interface::TemplateLoader},
    placeholder::PlaceholderPattern,
    policy::CopyPolicy,
    process::{CommandRunner, DryRunCommandRunner, SystemCommandRunner},
    prompt::DialoguerPrompter,
    report::{guidance, Failure, Report, Stage},
    resolver::ValueResolver,
    template::{materializer::Materializer, processor::TemplateProcessor},
};
use std::path::{Path, PathBuf};

/// Drives a scaffolding run once the answers are known.
///
/// Stages run strictly in order: materialize (placeholders are resolved per
/// file), install, git init, git remote, git push, report. Only a failing
/// precondition or a filesystem error during materialization stops the run;
/// failures of external tools are collected into the [`Report`].
pub struct Runner<'a> {
    answers: &'a AnswerSet,
    directory: &'a Path,
    templates: &'a dyn TemplateLoader,
    commands: &'a dyn CommandRunner,
    dry_run: bool,
}

impl<'a> Runner<'a> {
    pub fn new(
        answers: &'a AnswerSet,
        directory: &'a Path,
        templates: &'a dyn TemplateLoader,
        commands: &'a dyn CommandRunner,
        dry_run: bool,
    ) -> Self {
        Self { answers, directory, templates, commands, dry_run }
    }

    /// Executes the complete scaffolding workflow
    pub fn run(&self) -> Result<Report> {
        let project_root = self.project_root();
        ensure_empty_output_dir(&project_root)?;
        let template_root = self.templates.load(self.answers.template)?;

        let mut failures = self.materialize(&template_root, &project_root)?;
        let installed = self.install(&project_root, &mut failures);
        self.bootstrap_git(&project_root, &mut failures);

        log::debug!("Entering stage '{}'", Stage::Report);
        Ok(Report {
            failures,
            guidance: guidance(&self.project_path(), self.answers.package_manager, installed),
        })
    }

    /// `<directory>/<projectName>`
    pub fn project_root(&self) -> PathBuf {
        self.directory.join(&self.answers.project_name)
    }

    /// Project path as the user should type it after `cd`.
    fn project_path(&self) -> String {
        if self.directory == Path::new(".") {
            self.answers.project_name.clone()
        } else {
            self.project_root().display().to_string()
        }
    }

    /// Copies the template and resolves placeholders. Returns the soft
    /// failures hit while resolving values.
    fn materialize(&self, template_root: &Path, project_root: &Path) -> Result<Vec<Failure>> {
        log::debug!("Entering stage '{}'", Stage::Materialize);
        let policy = CopyPolicy::new()?;
        let pattern = PlaceholderPattern::new()?;
        let resolver = ValueResolver::new(self.answers, project_root, self.commands);
        let materializer =
            Materializer::new(TemplateProcessor::new(&resolver, &pattern), &policy, self.dry_run);

        let summary = materializer.materialize(template_root, project_root)?;
        log::debug!(
            "Stage '{}' done: {} directories, {} files copied, {} files with placeholders",
            Stage::Substitute,
            summary.directories,
            summary.copied,
            summary.written
        );
        Ok(resolver.take_failures())
    }

    /// Installs dependencies when requested. Returns whether they were installed.
    fn install(&self, project_root: &Path, failures: &mut Vec<Failure>) -> bool {
        if !self.answers.install {
            return false;
        }
        log::debug!("Entering stage '{}'", Stage::Install);

        let package_manager = self.answers.package_manager.as_str();
        match self.commands.run(package_manager, &["install"], project_root) {
            Ok(()) => true,
            Err(e) => {
                failures.push(tool_failure(Stage::Install, package_manager, e));
                false
            }
        }
    }

    /// Runs the git sub-steps the user asked for. The first failing local
    /// step ends the git phase.
    fn bootstrap_git(&self, project_root: &Path, failures: &mut Vec<Failure>) {
        let GitSetup::Init { remote } = &self.answers.git else {
            return;
        };

        log::debug!("Entering stage '{}'", Stage::GitInit);
        if let Err(e) = self.commands.run("git", &["init"], project_root) {
            failures.push(tool_failure(Stage::GitInit, "git", e));
            return;
        }

        let Some(remote) = remote else {
            return;
        };
        log::debug!("Entering stage '{}'", Stage::GitRemote);
        if let Err(e) = self.commands.run(
            "git",
            &["remote", "add", GIT_REMOTE_NAME, remote.url.as_str()],
            project_root,
        ) {
            failures.push(tool_failure(Stage::GitRemote, "git", e));
            return;
        }

        if !remote.push {
            return;
        }
        log::debug!("Entering stage '{}'", Stage::GitPush);
        let prepare: [&[&str]; 2] = [&["add", "-A"], &["commit", "-m", INIT_COMMIT_MESSAGE]];
        for args in prepare {
            if let Err(e) = self.commands.run("git", args, project_root) {
                failures.push(tool_failure(Stage::GitPush, "git", e));
                return;
            }
        }
        if let Err(e) = self.commands.run("git", &["push", "-u", GIT_REMOTE_NAME], project_root) {
            log::warn!("Push failed: {e}");
            failures.push(Failure::new(
                Stage::GitPush,
                format!(
                    "Failed to push the current project to your remote repository. \
                     Please check that your remote url '{}' is accurate.",
                    remote.url
                ),
            ));
        }
    }
}

fn tool_failure(stage: Stage, program: &str, e: Error) -> Failure {
    log::warn!("Stage '{stage}' failed: {e}");
    match e {
        Error::CommandNotFound { .. } => {
            Failure::new(stage, format!("Please install '{program}' first."))
        }
        other => Failure::new(stage, other.to_string()),
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<()> {
    let prompter = DialoguerPrompter::new();
    let collector = AnswerCollector::new(&prompter, args.non_interactive);
    let answers = collector.collect_answers(args.answers.clone(), &args.directory)?;

    let loader = get_loader(args.templates.clone())?;
    let commands: Box<dyn CommandRunner> = if args.dry_run {
        Box::new(DryRunCommandRunner)
    } else {
        Box::new(SystemCommandRunner)
    };

    let runner = Runner::new(&answers, &args.directory, &loader, commands.as_ref(), args.dry_run);
    let report = runner.run()?;
    report.print(&mut std::io::stdout())?;
    Ok(())
}
