//! Task lists for bootstrapping a QA machine.

use crate::config::Settings;
use crate::execution::CommandSpec;
use crate::tasks::TaskDescriptor;

const HOMEBREW_INSTALL: &str =
    "/bin/bash -c \"$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)\"";

const ANDROID_SYSTEM_IMAGE: &str = "system-images;android-29;google_apis;x86";

/// Creates the QA emulator. Parameters: SDK root, AVD name, AVD directory,
/// system image.
const CREATE_EMULATOR: &str = r#"set -e
"$1/tools/bin/sdkmanager" "$4"
"$1/tools/bin/avdmanager" create avd --name "$2" --package "$4" --device pixel_xl --force
grep -qF -- "hw.keyboard=yes" "$3/config.ini" || echo "hw.keyboard=yes" >> "$3/config.ini""#;

/// Appends `$1` as a line to the file at `$2`.
const APPEND_LINE: &str = r#"printf '%s\n' "$1" >> "$2""#;

pub const TRANSLATION_API_KEY: &str = "ONESKY_API_KEY";
pub const TRANSLATION_SECRET_KEY: &str = "ONESKY_SECRET_KEY";

fn command_exists(program: &str) -> CommandSpec {
    CommandSpec::shell(r#"command -v "$1""#).arg(program)
}

fn path_arg(path: &std::path::Path) -> String {
    path.to_string_lossy().to_string()
}

/// Toolchain installation and project bootstrap, in dependency order.
#[must_use]
pub fn dependency_tasks(settings: &Settings) -> Vec<TaskDescriptor> {
    let repo = settings.repo_directory();
    let studio_contents = settings.android_studio().join("Contents");
    let java_home = studio_contents
        .join("jre")
        .join("jdk")
        .join("Contents")
        .join("Home");

    vec![
        TaskDescriptor::new(
            "🍺  Installing brew",
            CommandSpec::shell(HOMEBREW_INSTALL).env("NONINTERACTIVE", "1"),
        )
        .with_check(command_exists("brew")),
        TaskDescriptor::new(
            "🌵  Installing git",
            CommandSpec::new("brew").args(["install", "git"]),
        )
        .with_check(command_exists("git")),
        TaskDescriptor::new(
            "🍫  Installing cocoapods",
            CommandSpec::new("gem").args(["install", "cocoapods"]),
        )
        .with_check(command_exists("pod")),
        TaskDescriptor::new(
            "🧶  Installing yarn",
            CommandSpec::new("brew").args(["install", "yarn"]),
        )
        .with_check(command_exists("yarn")),
        TaskDescriptor::new(
            "🌀  Cloning repo",
            CommandSpec::new("git").args(["clone".to_string(), settings.repo_url.clone(), path_arg(&repo)]),
        )
        .with_check(CommandSpec::new("git").args([
            "-C".to_string(),
            path_arg(&repo),
            "rev-parse".to_string(),
            "--is-inside-work-tree".to_string(),
        ])),
        TaskDescriptor::new(
            "🏞️  Initializing .env",
            CommandSpec::new("cp").args([
                path_arg(&settings.env_template_path()),
                path_arg(&settings.env_file_path()),
            ]),
        ),
        TaskDescriptor::new(
            "🤖  Installing android studio",
            CommandSpec::new("brew").args(["install", "--cask", "android-studio"]),
        )
        .with_check(CommandSpec::new("test").args(["-d".to_string(), path_arg(&studio_contents)])),
        TaskDescriptor::new(
            "📱  Creating Android Emulator",
            CommandSpec::shell(CREATE_EMULATOR)
                .args([
                    path_arg(&settings.android_sdk()),
                    settings.avd_name.clone(),
                    path_arg(&settings.avd_directory()),
                    ANDROID_SYSTEM_IMAGE.to_string(),
                ])
                .env("JAVA_HOME", path_arg(&java_home)),
        )
        .with_check(CommandSpec::new("test").args([
            "-d".to_string(),
            path_arg(&settings.avd_directory()),
        ])),
    ]
}

/// Credentials for the translation download service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationKeys {
    pub api_key: String,
    pub secret_key: String,
}

fn save_key_task(settings: &Settings, title: &str, key: &str, value: &str) -> TaskDescriptor {
    let env_file = path_arg(&settings.env_file_path());

    TaskDescriptor::new(
        title,
        CommandSpec::shell(APPEND_LINE).args([format!("{key}={value}"), env_file.clone()]),
    )
    .with_check(CommandSpec::new("grep").args(["-q".to_string(), format!("^{key}="), env_file]))
}

/// Stores the translation service keys in the app's environment file and
/// verifies them with a download.
#[must_use]
pub fn translation_key_tasks(settings: &Settings, keys: &TranslationKeys) -> Vec<TaskDescriptor> {
    vec![
        save_key_task(
            settings,
            "🔑  Saving OneSky API key",
            TRANSLATION_API_KEY,
            &keys.api_key,
        ),
        save_key_task(
            settings,
            "🔐  Saving OneSky secret key",
            TRANSLATION_SECRET_KEY,
            &keys.secret_key,
        ),
        TaskDescriptor::new(
            "💬  Verifying OneSky access",
            CommandSpec::new("yarn")
                .arg("onesky:download")
                .current_dir(settings.repo_directory()),
        ),
    ]
}
