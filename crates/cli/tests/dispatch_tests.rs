//! Tests for mode dispatch: which questions are asked, which commands run,
//! and how failures surface.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use clap::Parser;
use mh_qa_cli::cli_args::{Args, Mode};
use mh_qa_cli::dispatch::{
    DispatchOutcome, Dispatcher, API_ENVIRONMENT_QUESTION, API_KEY_QUESTION, BRANCH_QUESTION,
    MODE_QUESTION, SECRET_KEY_QUESTION, SIMULATOR_QUESTION,
};
use mh_qa_cli::prompt::Prompter;
use mh_qa_cli::reporter::Reporter;
use mh_qa_core::config::Settings;
use mh_qa_core::error::{Error, Result};
use mh_qa_core::execution::{CommandOutput, CommandRunner, CommandSpec};
use tempfile::TempDir;

const REMOTE_HEADS: &str = "a1\trefs/heads/feature-x\nb2\trefs/heads/develop\nc3\trefs/heads/MHP-7\n";

const SIMULATORS: &str = r#"{
  "devices": {
    "com.apple.CoreSimulator.SimRuntime.iOS-17-0": [
      { "name": "iPhone 15", "udid": "A", "state": "Shutdown", "isAvailable": true },
      { "name": "iPhone X", "udid": "B", "state": "Shutdown", "isAvailable": true }
    ]
  }
}"#;

enum Answer {
    Select(usize),
    Input(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
struct Question {
    message: String,
    choices: Vec<String>,
    default: Option<usize>,
}

/// Answers questions from a script and records what was asked.
#[derive(Default)]
struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<Question>>,
}

impl ScriptedPrompter {
    fn answering(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            asked: RefCell::new(Vec::new()),
        }
    }

    fn messages(&self) -> Vec<String> {
        self.asked
            .borrow()
            .iter()
            .map(|question| question.message.clone())
            .collect()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, message: &str, choices: &[String], default: Option<usize>) -> Result<usize> {
        self.asked.borrow_mut().push(Question {
            message: message.to_string(),
            choices: choices.to_vec(),
            default,
        });
        match self.answers.borrow_mut().pop_front() {
            Some(Answer::Select(index)) => Ok(index),
            _ => Err(Error::SelectionCancelled),
        }
    }

    fn input(&self, message: &str) -> Result<String> {
        self.asked.borrow_mut().push(Question {
            message: message.to_string(),
            choices: Vec::new(),
            default: None,
        });
        match self.answers.borrow_mut().pop_front() {
            Some(Answer::Input(value)) => Ok(value.to_string()),
            _ => Err(Error::SelectionCancelled),
        }
    }
}

enum Response {
    Output(&'static str),
    Fail(&'static str),
}

/// Answers commands starting with a known prefix, succeeds silently otherwise.
#[derive(Default)]
struct FakeRunner {
    responses: Vec<(&'static str, Response)>,
    calls: RefCell<Vec<String>>,
    spawn_fails: bool,
}

impl FakeRunner {
    fn without_emulator(mut self) -> Self {
        self.spawn_fails = true;
        self
    }

    fn with(mut self, prefix: &'static str, response: Response) -> Self {
        self.responses.push((prefix, response));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        let line = command.to_string();
        self.calls.borrow_mut().push(line.clone());

        match self
            .responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix))
        {
            Some((_, Response::Output(stdout))) => Ok(CommandOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
            Some((_, Response::Fail(stdout))) => Err(Error::command_execution(
                line,
                1,
                stdout.to_string(),
                String::new(),
            )),
            None => Ok(CommandOutput::default()),
        }
    }

    fn spawn_detached(&self, command: &CommandSpec) -> Result<()> {
        self.calls.borrow_mut().push(format!("&{command}"));
        if self.spawn_fails {
            return Err(Error::SubProcess(std::io::Error::from(
                std::io::ErrorKind::NotFound,
            )));
        }
        Ok(())
    }
}

struct Checkout {
    _dir: TempDir,
    settings: Settings,
}

impl Checkout {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".env"),
            "API_BASE_URL=https://api-stage.missionhub.com\nOTHER=1\n",
        )
        .unwrap();
        let settings = settings_for(dir.path());
        Self {
            _dir: dir,
            settings,
        }
    }

    fn env_file(&self) -> String {
        fs::read_to_string(self.settings.env_file_path()).unwrap()
    }
}

fn settings_for(repo: &Path) -> Settings {
    Settings {
        repo_directory: repo.to_string_lossy().to_string(),
        android_sdk: "/opt/sdk".to_string(),
        ..Settings::default()
    }
}

fn args(argv: &[&str]) -> Args {
    Args::parse_from(std::iter::once("mh-qa").chain(argv.iter().copied()))
}

fn dispatch(
    checkout: &Checkout,
    runner: &FakeRunner,
    prompter: &ScriptedPrompter,
    argv: &[&str],
) -> (Result<DispatchOutcome>, String) {
    let args = args(argv);
    let dispatcher = Dispatcher::new(&checkout.settings, runner, prompter);
    let mut reporter = Reporter::new(Vec::new());

    let result = dispatcher
        .resolve_mode(args.mode)
        .and_then(|mode| dispatcher.dispatch(mode, &args, &mut reporter));

    (result, String::from_utf8(reporter.into_inner()).unwrap())
}

#[test]
fn test_ios_with_all_arguments_asks_nothing() {
    let checkout = Checkout::new();
    let runner = FakeRunner::default();
    let prompter = ScriptedPrompter::default();

    let (result, _) = dispatch(
        &checkout,
        &runner,
        &prompter,
        &["ios", "develop", "production", "iPhone 15"],
    );

    assert_eq!(result.unwrap(), DispatchOutcome::Completed);
    assert!(prompter.messages().is_empty());
    assert_eq!(
        runner.calls(),
        vec![
            "git fetch origin develop",
            "git checkout -f origin/develop",
            "yarn",
            "yarn onesky:download",
            "yarn gql:schema",
            "yarn gql:codegen",
            "bundle install",
            "pod install --repo-update",
            "yarn ios --configuration Release \"--simulator=iPhone 15\"",
        ]
    );
    assert_eq!(
        checkout.env_file(),
        "API_BASE_URL=https://api.missionhub.com\nOTHER=1\n"
    );
}

#[test]
fn test_ios_asks_for_everything_missing_in_order() {
    let checkout = Checkout::new();
    let runner = FakeRunner::default()
        .with("git ls-remote", Response::Output(REMOTE_HEADS))
        .with("xcrun simctl", Response::Output(SIMULATORS));
    let prompter = ScriptedPrompter::answering(vec![
        Answer::Select(0),
        Answer::Select(2),
        Answer::Select(1),
        Answer::Select(0),
    ]);

    let (result, _) = dispatch(&checkout, &runner, &prompter, &[]);

    assert_eq!(result.unwrap(), DispatchOutcome::Completed);
    assert_eq!(
        prompter.messages(),
        vec![
            MODE_QUESTION,
            BRANCH_QUESTION,
            API_ENVIRONMENT_QUESTION,
            SIMULATOR_QUESTION
        ]
    );

    let asked = prompter.asked.borrow();
    assert_eq!(asked[1].choices, vec!["develop", "MHP-7", "feature-x"]);
    assert_eq!(asked[2].choices, vec!["staging", "production"]);
    assert_eq!(asked[3].choices, vec!["iPhone 15", "iPhone X"]);
    assert_eq!(asked[3].default, Some(1));

    assert!(runner.calls().contains(&"git checkout -f origin/feature-x".to_string()));
    assert_eq!(
        runner.calls().last().unwrap(),
        "yarn ios --configuration Release \"--simulator=iPhone 15\""
    );
    assert_eq!(
        checkout.env_file(),
        "API_BASE_URL=https://api.missionhub.com\nOTHER=1\n"
    );
}

#[test]
fn test_api_environment_is_written_before_checkout() {
    let checkout = Checkout::new();
    let runner = FakeRunner::default().with("git fetch", Response::Fail("no such ref"));
    let prompter = ScriptedPrompter::default();

    let (result, _) = dispatch(
        &checkout,
        &runner,
        &prompter,
        &["android", "gone", "production"],
    );

    assert!(matches!(result, Err(Error::CommandExecution { .. })));
    assert_eq!(
        checkout.env_file(),
        "API_BASE_URL=https://api.missionhub.com\nOTHER=1\n"
    );
}

#[test]
fn test_failed_build_is_reported_not_raised() {
    let checkout = Checkout::new();
    let runner = FakeRunner::default().with("yarn ios", Response::Fail("** BUILD FAILED **"));
    let prompter = ScriptedPrompter::default();

    let (result, output) = dispatch(
        &checkout,
        &runner,
        &prompter,
        &["ios", "develop", "staging", "iPhone X"],
    );

    assert_eq!(
        result.unwrap(),
        DispatchOutcome::BuildFailed {
            diagnostics: "** BUILD FAILED **".to_string()
        }
    );
    assert!(output.contains("Building and launching on iOS simulator"));
}

#[test]
fn test_android_skips_simulator_and_boots_emulator() {
    let checkout = Checkout::new();
    let runner = FakeRunner::default().with("git ls-remote", Response::Output(REMOTE_HEADS));
    let prompter = ScriptedPrompter::answering(vec![Answer::Select(1), Answer::Select(0)]);

    let (result, _) = dispatch(&checkout, &runner, &prompter, &["android"]);

    assert_eq!(result.unwrap(), DispatchOutcome::Completed);
    assert_eq!(prompter.messages(), vec![BRANCH_QUESTION, API_ENVIRONMENT_QUESTION]);

    let calls = runner.calls();
    assert!(calls.contains(&"git checkout -f origin/MHP-7".to_string()));
    assert!(!calls.iter().any(|call| call.starts_with("xcrun")));
    assert!(!calls.iter().any(|call| call.starts_with("pod")));
    assert_eq!(
        &calls[calls.len() - 2..],
        &[
            "&/opt/sdk/emulator/emulator -avd missionhub_qa_cli".to_string(),
            "yarn android".to_string(),
        ]
    );
}

#[test]
fn test_android_builds_when_emulator_cannot_start() {
    let checkout = Checkout::new();
    let runner = FakeRunner::default().without_emulator();
    let prompter = ScriptedPrompter::default();

    let (result, output) = dispatch(
        &checkout,
        &runner,
        &prompter,
        &["android", "develop", "staging"],
    );

    assert_eq!(result.unwrap(), DispatchOutcome::Completed);
    assert_eq!(runner.calls().last().unwrap(), "yarn android");
    assert!(output.contains("Android emulator `missionhub_qa_cli` not started."));
}

#[test]
fn test_missing_translations_only_warn() {
    let checkout = Checkout::new();
    let runner = FakeRunner::default().with("yarn onesky:download", Response::Fail("401"));
    let prompter = ScriptedPrompter::default();

    let (result, output) = dispatch(
        &checkout,
        &runner,
        &prompter,
        &["android", "develop", "staging"],
    );

    assert_eq!(result.unwrap(), DispatchOutcome::Completed);
    assert!(output.contains("Translations not downloaded."));
    assert!(runner.calls().contains(&"yarn gql:schema".to_string()));
}

#[test]
fn test_cancelled_branch_menu_runs_nothing_further() {
    let checkout = Checkout::new();
    let runner = FakeRunner::default().with("git ls-remote", Response::Output(REMOTE_HEADS));
    let prompter = ScriptedPrompter::default();

    let (result, _) = dispatch(&checkout, &runner, &prompter, &["ios"]);

    assert!(matches!(result, Err(Error::SelectionCancelled)));
    assert_eq!(runner.calls(), vec!["git ls-remote -q --heads"]);
}

#[test]
fn test_setup_skips_installed_tools() {
    let checkout = Checkout::new();
    let runner = FakeRunner::default()
        .with("sh -c \"command -v", Response::Output("/usr/local/bin/tool"))
        .with("git -C", Response::Output("true"))
        .with("test -d", Response::Output(""));
    let prompter = ScriptedPrompter::default();

    let (result, output) = dispatch(&checkout, &runner, &prompter, &["setup"]);

    assert_eq!(result.unwrap(), DispatchOutcome::Completed);
    assert!(prompter.messages().is_empty());
    assert_eq!(output.matches("[skipped]").count(), 7);
    assert!(runner.calls().iter().any(|call| call.starts_with("cp ")));
    assert!(!runner.calls().iter().any(|call| call.starts_with("brew install")));
}

#[test]
fn test_configure_translation_keys_asks_for_both_keys() {
    let checkout = Checkout::new();
    let runner = FakeRunner::default().with("grep", Response::Fail(""));
    let prompter = ScriptedPrompter::answering(vec![
        Answer::Input("public-key"),
        Answer::Input("secret-key"),
    ]);

    let (result, _) = dispatch(&checkout, &runner, &prompter, &["oneskySetup"]);

    assert_eq!(result.unwrap(), DispatchOutcome::Completed);
    assert_eq!(prompter.messages(), vec![API_KEY_QUESTION, SECRET_KEY_QUESTION]);

    let calls = runner.calls();
    assert!(calls.iter().any(|call| call.contains("ONESKY_API_KEY=public-key")));
    assert!(calls.iter().any(|call| call.contains("ONESKY_SECRET_KEY=secret-key")));
    assert_eq!(calls.last().unwrap(), "yarn onesky:download");
}

#[test]
fn test_clear_modes_remove_one_directory_each() {
    let cases = [
        ("clearIosBuild", "ios/build"),
        ("clearIosPods", "ios/Pods"),
        ("clearAndroidBuild", "android/app/build"),
    ];

    for (mode, suffix) in cases {
        let checkout = Checkout::new();
        let runner = FakeRunner::default();
        let prompter = ScriptedPrompter::default();

        let (result, _) = dispatch(&checkout, &runner, &prompter, &[mode]);

        assert_eq!(result.unwrap(), DispatchOutcome::Completed);
        let calls = runner.calls();
        assert_eq!(calls.len(), 1, "{mode}");
        assert!(calls[0].starts_with("rm -rf "), "{mode}");
        assert!(calls[0].ends_with(suffix), "{mode}");
    }
}

#[test]
fn test_exit_does_nothing() {
    let checkout = Checkout::new();
    let runner = FakeRunner::default();
    let prompter = ScriptedPrompter::answering(vec![Answer::Select(Mode::MENU.len() - 1)]);

    let (result, output) = dispatch(&checkout, &runner, &prompter, &[]);

    assert_eq!(result.unwrap(), DispatchOutcome::Completed);
    assert_eq!(prompter.messages(), vec![MODE_QUESTION]);
    assert!(runner.calls().is_empty());
    assert!(output.is_empty());
}
