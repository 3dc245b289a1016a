use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("`{}` exited with status {}", .command, .status)]
    CommandExecution {
        command: String,
        status: i32,
        stdout: String,
        stderr: String,
    },

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Error parsing {}: {}", .description, .original)]
    Json {
        description: String,
        original: serde_json::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Unknown API environment: \"{}\" (expected `staging` or `production`)", _0)]
    UnknownApiEnvironment(String),

    #[error("Nothing to choose from: {}", _0)]
    NoChoices(String),

    #[error("Selection cancelled.")]
    SelectionCancelled,

    #[error("STDIO error: {}", .0)]
    Stdio(std::io::Error),
}

impl Error {
    pub fn command_execution(command: String, status: i32, stdout: String, stderr: String) -> Self {
        Self::CommandExecution {
            command,
            status,
            stdout,
            stderr,
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn json_error(description: String, original: serde_json::Error) -> Self {
        Self::Json {
            description,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    /// Output captured from a failed command, preferring stdout since that is
    /// where the build tools print their diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Self::CommandExecution { stdout, stderr, .. } => {
                if stdout.trim().is_empty() {
                    Some(stderr.as_str())
                } else {
                    Some(stdout.as_str())
                }
            }
            _ => None,
        }
    }
}
