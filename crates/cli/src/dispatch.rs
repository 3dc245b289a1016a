//! Maps a chosen [`Mode`] onto workflow steps and task lists.

use log::info;
use mh_qa_core::api::ApiEnvironment;
use mh_qa_core::config::Settings;
use mh_qa_core::error::Result;
use mh_qa_core::execution::CommandRunner;
use mh_qa_core::progress::Progress;
use mh_qa_core::setup::{self, TranslationKeys};
use mh_qa_core::tasks;
use mh_qa_core::workflow::{Artifact, BuildOutcome, Workflow};

use crate::cli_args::{Args, Mode};
use crate::prompt::{select_item, Prompter, ValueSource};

pub const MODE_QUESTION: &str = "What would you like to do?";
pub const BRANCH_QUESTION: &str = "Which branch would you like to QA?";
pub const API_ENVIRONMENT_QUESTION: &str = "Which API environment would you like to test against?";
pub const SIMULATOR_QUESTION: &str = "Which iOS simulator would you like to use?";
pub const API_KEY_QUESTION: &str = "OneSky API key:";
pub const SECRET_KEY_QUESTION: &str = "OneSky secret key:";

/// How a dispatched mode ended, when it didn't end in an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Completed,
    /// The platform build ran and failed; its output is kept for the user.
    BuildFailed { diagnostics: String },
}

impl From<BuildOutcome> for DispatchOutcome {
    fn from(outcome: BuildOutcome) -> Self {
        match outcome {
            BuildOutcome::Launched => DispatchOutcome::Completed,
            BuildOutcome::Failed { diagnostics } => DispatchOutcome::BuildFailed { diagnostics },
        }
    }
}

pub struct Dispatcher<'a> {
    settings: &'a Settings,
    runner: &'a dyn CommandRunner,
    prompter: &'a dyn Prompter,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        settings: &'a Settings,
        runner: &'a dyn CommandRunner,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self {
            settings,
            runner,
            prompter,
        }
    }

    /// The mode given on the command line, or the one picked from the menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu is cancelled.
    pub fn resolve_mode(&self, mode: Option<Mode>) -> Result<Mode> {
        ValueSource::from(mode).resolve(|| {
            select_item(
                self.prompter,
                MODE_QUESTION,
                &Mode::MENU,
                |mode| mode.label().to_string(),
                None,
            )
        })
    }

    /// Runs `mode` to completion, asking for anything `args` leaves out.
    ///
    /// # Errors
    ///
    /// Returns the first unrecovered failure: a cancelled question, a failing
    /// step or task, or an unreadable environment file.
    pub fn dispatch(
        &self,
        mode: Mode,
        args: &Args,
        progress: &mut dyn Progress,
    ) -> Result<DispatchOutcome> {
        info!("Dispatching {mode:?}");
        let workflow = Workflow::new(self.settings, self.runner);

        match mode {
            Mode::Ios => {
                let branch = self.resolve_common_args(&workflow, args, progress)?;
                let simulator = self.resolve_simulator(&workflow, args)?;
                workflow.prepare(&branch, progress)?;
                workflow.install_ios_dependencies(progress)?;
                Ok(workflow.launch_ios(&simulator, progress)?.into())
            }
            Mode::Android => {
                let branch = self.resolve_common_args(&workflow, args, progress)?;
                workflow.prepare(&branch, progress)?;
                Ok(workflow.launch_android(progress)?.into())
            }
            Mode::Setup => {
                tasks::run_all(&setup::dependency_tasks(self.settings), self.runner, progress)?;
                Ok(DispatchOutcome::Completed)
            }
            Mode::ConfigureTranslationKeys => {
                let keys = TranslationKeys {
                    api_key: self.prompter.input(API_KEY_QUESTION)?,
                    secret_key: self.prompter.input(SECRET_KEY_QUESTION)?,
                };
                tasks::run_all(
                    &setup::translation_key_tasks(self.settings, &keys),
                    self.runner,
                    progress,
                )?;
                Ok(DispatchOutcome::Completed)
            }
            Mode::ClearIosBuild => self.clear(&workflow, Artifact::IosBuild, progress),
            Mode::ClearIosPods => self.clear(&workflow, Artifact::IosPods, progress),
            Mode::ClearAndroidBuild => self.clear(&workflow, Artifact::AndroidBuild, progress),
            Mode::Exit => Ok(DispatchOutcome::Completed),
        }
    }

    /// Resolves the branch, then resolves and applies the API environment.
    fn resolve_common_args(
        &self,
        workflow: &Workflow,
        args: &Args,
        progress: &mut dyn Progress,
    ) -> Result<String> {
        let branch = ValueSource::from(args.branch.clone()).resolve(|| {
            let branches = workflow.fetch_branches(progress)?;
            select_item(self.prompter, BRANCH_QUESTION, &branches, String::clone, None)
        })?;

        let environment = ValueSource::from(args.api_env).resolve(|| {
            select_item(
                self.prompter,
                API_ENVIRONMENT_QUESTION,
                &ApiEnvironment::ALL,
                ToString::to_string,
                None,
            )
        })?;
        workflow.set_api_environment(environment, progress)?;

        Ok(branch)
    }

    fn resolve_simulator(&self, workflow: &Workflow, args: &Args) -> Result<String> {
        ValueSource::from(args.simulator.clone()).resolve(|| {
            let simulators = workflow.list_simulators()?;
            let default = simulators
                .iter()
                .position(|name| *name == self.settings.default_simulator);
            select_item(self.prompter, SIMULATOR_QUESTION, &simulators, String::clone, default)
        })
    }

    fn clear(
        &self,
        workflow: &Workflow,
        artifact: Artifact,
        progress: &mut dyn Progress,
    ) -> Result<DispatchOutcome> {
        workflow.clear(artifact, progress)?;
        Ok(DispatchOutcome::Completed)
    }
}
