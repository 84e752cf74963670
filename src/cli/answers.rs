use crate::{
    answers::{validate_project_name, validate_remote_url, AnswerSet, RawAnswers, TemplateKind},
    constants::STDIN_INDICATOR,
    error::{Error, Result},
    ioutils::{is_empty_dir, read_from},
    prompt::{ConfirmationConfig, Prompter, SingleChoiceConfig, TextPromptConfig},
};
use std::path::Path;

/// Collects answers from command line arguments and user prompts
pub struct AnswerCollector<'a> {
    prompter: &'a dyn Prompter,
    non_interactive: bool,
}

impl<'a> AnswerCollector<'a> {
    pub fn new(prompter: &'a dyn Prompter, non_interactive: bool) -> Self {
        Self { prompter, non_interactive }
    }

    /// Collects answers from all available sources.
    ///
    /// Preloaded answers win over prompts. A question is only asked when its
    /// guard holds: the remote url only after git init, the push flag only
    /// once a remote is set.
    ///
    /// # Arguments
    /// * `cli_answers` - JSON object from `--answers`, or `-` to read it from stdin
    /// * `directory` - Directory in which the project directory will be created
    pub fn collect_answers(&self, cli_answers: Option<String>, directory: &Path) -> Result<AnswerSet> {
        let mut raw = match cli_answers {
            Some(answers_arg) => {
                let answers_str = if answers_arg == STDIN_INDICATOR {
                    read_from(std::io::stdin())?
                } else {
                    answers_arg
                };
                RawAnswers::from_json(&answers_str)?
            }
            None => RawAnswers::default(),
        };
        log::debug!("Preloaded answers: {raw:?}");

        if !self.non_interactive {
            self.prompt_missing(&mut raw, directory)?;
        }
        AnswerSet::try_from_raw(raw)
    }

    fn prompt_missing(&self, raw: &mut RawAnswers, directory: &Path) -> Result<()> {
        let preloaded = raw.project_name.take();
        raw.project_name = Some(self.collect_project_name(preloaded, directory)?);

        let template = match raw.template_name {
            Some(template) => template,
            None => {
                let choices: Vec<String> =
                    TemplateKind::ALL.iter().map(|kind| kind.to_string()).collect();
                let index = self.prompter.prompt_single_choice(&SingleChoiceConfig {
                    prompt: "Select a template".into(),
                    choices,
                    default_index: Some(0),
                })?;
                TemplateKind::ALL[index]
            }
        };
        raw.template_name = Some(template);

        if raw.pkg_manager.is_none() {
            let allowed = template.package_managers();
            let index = self.prompter.prompt_single_choice(&SingleChoiceConfig {
                prompt: "Choose a package manager.".into(),
                choices: allowed.iter().map(|pm| pm.to_string()).collect(),
                default_index: Some(0),
            })?;
            raw.pkg_manager = Some(allowed[index]);
        }

        if raw.need_install.is_none() {
            raw.need_install = Some(self.confirm("Whether to install dependencies?")?);
        }

        if raw.need_git_init.is_none() {
            raw.need_git_init =
                Some(self.confirm("Whether to init your project as an Git repository?")?);
        }
        if raw.need_git_init != Some(true) {
            return Ok(());
        }

        if raw.need_git_remote_origin.is_none() {
            raw.need_git_remote_origin = Some(self.confirm("Whether to set a git remote origin?")?);
        }
        if raw.need_git_remote_origin != Some(true) {
            return Ok(());
        }

        let preloaded = raw.git_remote_origin.take();
        raw.git_remote_origin = Some(self.collect_remote_url(preloaded)?);

        if raw.need_git_push.is_none() {
            raw.need_git_push = Some(
                self.confirm("Whether to push the current project to your remote repository?")?,
            );
        }
        Ok(())
    }

    /// Asks until the name is valid and its directory can be materialized into.
    fn collect_project_name(&self, preloaded: Option<String>, directory: &Path) -> Result<String> {
        let mut candidate = preloaded;
        loop {
            if let Some(name) = candidate.take() {
                match check_project_name(&name, directory) {
                    Ok(()) => return Ok(name),
                    Err(err) => println!("{err}"),
                }
            }
            candidate = Some(self.prompter.prompt_text(&TextPromptConfig {
                prompt: "What's your project name?".into(),
                default: None,
            })?);
        }
    }

    fn collect_remote_url(&self, preloaded: Option<String>) -> Result<String> {
        let mut candidate = preloaded;
        loop {
            if let Some(url) = candidate.take() {
                match validate_remote_url(&url) {
                    Ok(()) => return Ok(url),
                    Err(err) => println!("{err}"),
                }
            }
            candidate = Some(self.prompter.prompt_text(&TextPromptConfig {
                prompt: "What's your remote git repository url?".into(),
                default: None,
            })?);
        }
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.prompter
            .prompt_confirmation(&ConfirmationConfig { prompt: prompt.to_string(), default: true })
    }
}

/// Validates a project name and checks that `<directory>/<name>` is empty.
pub fn check_project_name(name: &str, directory: &Path) -> Result<()> {
    validate_project_name(name)?;
    let project_root = directory.join(name);
    if !is_empty_dir(&project_root)? {
        return Err(Error::OutputDirectoryNotEmptyError {
            output_dir: project_root.display().to_string(),
        });
    }
    Ok(())
}
