//! Ordered, skippable installation tasks.
//!
//! A task is satisfied when its check command exits successfully, in which
//! case its install command is never run. Tasks run strictly in list order and
//! the first failing install stops the run.

use log::{debug, info};

use crate::error::Result;
use crate::execution::{CommandRunner, CommandSpec};
use crate::progress::Progress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    pub title: String,
    pub check: Option<CommandSpec>,
    pub install: CommandSpec,
}

impl TaskDescriptor {
    pub fn new(title: impl Into<String>, install: CommandSpec) -> Self {
        Self {
            title: title.into(),
            check: None,
            install,
        }
    }

    #[must_use]
    pub fn with_check(mut self, check: CommandSpec) -> Self {
        self.check = Some(check);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Skipped,
    Installed,
}

fn is_satisfied(task: &TaskDescriptor, runner: &dyn CommandRunner) -> bool {
    let Some(check) = &task.check else {
        return false;
    };

    match runner.run(check) {
        Ok(_) => true,
        Err(e) => {
            debug!("Check for `{}` not satisfied: {e}", task.title);
            false
        }
    }
}

/// Runs every task in order, skipping those whose check passes.
///
/// # Errors
///
/// Returns the error of the first install command that fails. No task after
/// it is checked or installed.
pub fn run_all(
    tasks: &[TaskDescriptor],
    runner: &dyn CommandRunner,
    progress: &mut dyn Progress,
) -> Result<Vec<TaskOutcome>> {
    let mut outcomes = Vec::with_capacity(tasks.len());

    for task in tasks {
        if is_satisfied(task, runner) {
            info!("Skipping `{}`, already satisfied", task.title);
            progress.skip(&task.title);
            outcomes.push(TaskOutcome::Skipped);
            continue;
        }

        progress.start(&task.title);
        if let Err(e) = runner.run(&task.install) {
            progress.fail(&task.title);
            return Err(e);
        }
        progress.done(&task.title);
        info!("Installed `{}`", task.title);
        outcomes.push(TaskOutcome::Installed);
    }

    Ok(outcomes)
}
