use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// A program invocation expressed as a program plus an argument list.
///
/// Arguments are handed to the child process as-is, so branch names or
/// simulator names containing spaces or shell metacharacters are never
/// reinterpreted by a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    pub environment: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            environment: Vec::new(),
        }
    }

    /// Runs `script` through `sh -c`. Used for checks which only exist as shell
    /// builtins or test expressions. Extra values should be passed with
    /// [`CommandSpec::arg`] and referenced as `"$1"`, `"$2"` inside the script.
    pub fn shell(script: impl Into<String>) -> Self {
        Self::new("sh").arg("-c").arg(script).arg("sh")
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.push((key.into(), value.into()));
        self
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        command.envs(self.environment.iter().map(|(k, v)| (k, v)));
        command
    }
}

impl Display for CommandSpec {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(formatter, " \"{arg}\"")?;
            } else {
                write!(formatter, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured output of a command which exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

pub trait CommandRunner {
    /// Runs the command to completion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandExecution`] with the captured output when the
    /// command exits non-zero, or [`Error::SubProcess`] when it can't be spawned.
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput>;

    /// Starts the command and returns without waiting for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubProcess`] when the command can't be spawned.
    fn spawn_detached(&self, command: &CommandSpec) -> Result<()>;
}

#[derive(Default, Debug, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        debug!("Running `{command}` in {:?}", command.current_dir);

        let output = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Ok(CommandOutput { stdout, stderr })
        } else {
            let status = output.status.code().unwrap_or(-1);
            debug!("`{command}` exited with status {status}");
            Err(Error::command_execution(
                command.to_string(),
                status,
                stdout,
                stderr,
            ))
        }
    }

    fn spawn_detached(&self, command: &CommandSpec) -> Result<()> {
        debug!("Spawning `{command}` in the background");

        // The child handle is dropped on purpose; the process keeps running.
        let _child = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_arguments() {
        let command = CommandSpec::new("git")
            .args(["checkout", "-f"])
            .arg("origin/develop")
            .current_dir("/tmp/repo")
            .env("GIT_TERMINAL_PROMPT", "0");

        assert_eq!(command.program, "git");
        assert_eq!(command.args, vec!["checkout", "-f", "origin/develop"]);
        assert_eq!(command.current_dir, Some(PathBuf::from("/tmp/repo")));
        assert_eq!(
            command.environment,
            vec![("GIT_TERMINAL_PROMPT".to_string(), "0".to_string())]
        );
    }

    #[test]
    fn test_shell_wraps_script() {
        let command = CommandSpec::shell("command -v \"$1\"").arg("brew");
        assert_eq!(command.program, "sh");
        assert_eq!(command.args, vec!["-c", "command -v \"$1\"", "sh", "brew"]);
    }

    #[test]
    fn test_display_quotes_arguments_with_spaces() {
        let command = CommandSpec::new("yarn").args(["ios", "--simulator=iPhone X"]);
        assert_eq!(command.to_string(), "yarn ios \"--simulator=iPhone X\"");
    }

    #[test]
    fn test_run_captures_stdout_and_stderr() {
        let output = SystemCommandRunner
            .run(&CommandSpec::shell("echo out; echo err 1>&2"))
            .unwrap();
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }

    #[test]
    fn test_run_non_zero_exit_carries_output() {
        let result = SystemCommandRunner.run(&CommandSpec::shell("echo build failed; exit 3"));
        match result {
            Err(Error::CommandExecution { status, stdout, .. }) => {
                assert_eq!(status, 3);
                assert_eq!(stdout, "build failed\n");
            }
            other => panic!("Expected a command execution error, got {other:?}"),
        }
    }

    #[test]
    fn test_run_missing_program_is_sub_process_error() {
        let result = SystemCommandRunner.run(&CommandSpec::new("mh-qa-no-such-program-xyz"));
        assert!(matches!(result, Err(Error::SubProcess(_))));
    }

    #[test]
    fn test_run_uses_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        let output = SystemCommandRunner
            .run(&CommandSpec::new("pwd").current_dir(dir.path()))
            .unwrap();
        let reported = PathBuf::from(output.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_run_passes_environment() {
        let output = SystemCommandRunner
            .run(&CommandSpec::shell("printf %s \"$ANDROID_SDK_ROOT\"").env("ANDROID_SDK_ROOT", "/sdk"))
            .unwrap();
        assert_eq!(output.stdout, "/sdk");
    }
}
