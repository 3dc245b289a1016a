//! The QA workflow: preparing a checkout and building it for a platform.
//!
//! Every step runs through a [`CommandRunner`] and reports to a [`Progress`].
//! Steps are fatal on failure except the translation download, which only
//! warns, and the final platform build, whose failure is returned as a
//! [`BuildOutcome`] so the caller can print the diagnostics.

use std::path::PathBuf;

use log::warn;

use crate::api::ApiEnvironment;
use crate::branches::parse_remote_heads;
use crate::commands;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::execution::{CommandOutput, CommandRunner, CommandSpec};
use crate::file_handling;
use crate::progress::Progress;
use crate::simulators::parse_simulator_names;

const TRANSLATIONS_WARNING: &str =
    "Translations not downloaded. Make sure you've configured OneSky API Keys. Continuing...";

/// Result of a platform build-and-launch command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Launched,
    Failed { diagnostics: String },
}

/// Build artifacts which can be removed from the checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    IosBuild,
    IosPods,
    AndroidBuild,
}

impl Artifact {
    #[must_use]
    pub fn path(self, settings: &Settings) -> PathBuf {
        match self {
            Artifact::IosBuild => settings.ios_directory().join("build"),
            Artifact::IosPods => settings.ios_directory().join("Pods"),
            Artifact::AndroidBuild => settings
                .repo_directory()
                .join("android")
                .join("app")
                .join("build"),
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Artifact::IosBuild => "🗑️  Removing iOS build artifacts",
            Artifact::IosPods => "🗑️  Removing installed iOS Pods",
            Artifact::AndroidBuild => "🗑️  Removing Android build artifacts",
        }
    }
}

/// Reports `title` around `action`, marking it failed if `action` errors.
fn step<T>(
    progress: &mut dyn Progress,
    title: &str,
    action: impl FnOnce() -> Result<T>,
) -> Result<T> {
    progress.start(title);
    match action() {
        Ok(value) => {
            progress.done(title);
            Ok(value)
        }
        Err(e) => {
            progress.fail(title);
            Err(e)
        }
    }
}

pub struct Workflow<'a> {
    settings: &'a Settings,
    runner: &'a dyn CommandRunner,
}

impl<'a> Workflow<'a> {
    pub fn new(settings: &'a Settings, runner: &'a dyn CommandRunner) -> Self {
        Self { settings, runner }
    }

    fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        self.runner.run(command)
    }

    /// Lists remote branches, ordered by the configured branch policy.
    ///
    /// # Errors
    ///
    /// Returns an error if `git ls-remote` fails.
    pub fn fetch_branches(&self, progress: &mut dyn Progress) -> Result<Vec<String>> {
        step(progress, "👀  Fetching branches", || {
            let output = self.run(&commands::list_remote_branches(self.settings))?;
            Ok(self.settings.branches.sort(parse_remote_heads(&output.stdout)))
        })
    }

    /// Writes the base URL of `environment` into the app's environment file.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment file cannot be read or written.
    pub fn set_api_environment(
        &self,
        environment: ApiEnvironment,
        progress: &mut dyn Progress,
    ) -> Result<()> {
        let url = self.settings.api.base_url(environment);
        let changed = file_handling::set_api_base_url(&self.settings.env_file_path(), url)?;
        if !changed {
            progress.warn(&format!(
                "No API_BASE_URL line in {}, API environment left unchanged.",
                self.settings.env_file_path().display()
            ));
        }
        Ok(())
    }

    /// Names of the locally available iPhone simulators.
    ///
    /// # Errors
    ///
    /// Returns an error if `xcrun simctl` fails or its output can't be parsed.
    pub fn list_simulators(&self) -> Result<Vec<String>> {
        let output = self.run(&commands::list_simulators())?;
        parse_simulator_names(&output.stdout)
    }

    /// Checks out `branch` and refreshes everything generated from it.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error. A failed translation download
    /// is only reported as a warning.
    pub fn prepare(&self, branch: &str, progress: &mut dyn Progress) -> Result<()> {
        step(progress, &format!("🚛  Checking out branch: {branch}"), || {
            self.run(&commands::fetch_branch(self.settings, branch))?;
            self.run(&commands::checkout_branch(self.settings, branch))
        })?;

        step(progress, "🧶  Installing JS dependencies", || {
            self.run(&commands::install_script_dependencies(self.settings))
        })?;

        self.download_translations(progress);

        step(progress, "📈  Downloading GraphQL Schema", || {
            self.run(&commands::download_schema(self.settings))?;
            self.run(&commands::generate_schema_types(self.settings))
        })?;

        Ok(())
    }

    fn download_translations(&self, progress: &mut dyn Progress) {
        let title = "💬  Downloading translations from OneSky";
        progress.start(title);
        match self.run(&commands::download_translations(self.settings)) {
            Ok(_) => progress.done(title),
            Err(e) => {
                warn!("Translation download failed: {e}");
                progress.warn(TRANSLATIONS_WARNING);
            }
        }
    }

    /// Installs the gems and pods the iOS project needs.
    ///
    /// # Errors
    ///
    /// Returns an error if `bundle install` or `pod install` fails.
    pub fn install_ios_dependencies(&self, progress: &mut dyn Progress) -> Result<()> {
        step(progress, "💎  Installing gems", || {
            self.run(&commands::install_gems(self.settings))
        })?;
        step(progress, "📦  Installing iOS pods", || {
            self.run(&commands::install_pods(self.settings))
        })?;
        Ok(())
    }

    /// Builds the app and launches it on `simulator`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the build can't be started; a failing build
    /// is returned as [`BuildOutcome::Failed`].
    pub fn launch_ios(&self, simulator: &str, progress: &mut dyn Progress) -> Result<BuildOutcome> {
        self.build(
            progress,
            "📲  Building and launching on iOS simulator",
            &commands::build_ios(self.settings, simulator),
        )
    }

    /// Boots the QA emulator in the background, then builds the app and
    /// launches it on whatever device is available.
    ///
    /// An emulator that can't be started is only a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the build can't be started; a failing build is
    /// returned as [`BuildOutcome::Failed`].
    pub fn launch_android(&self, progress: &mut dyn Progress) -> Result<BuildOutcome> {
        let emulator = commands::launch_emulator(self.settings);
        if let Err(e) = self.runner.spawn_detached(&emulator) {
            warn!("Couldn't start `{emulator}`: {e}");
            progress.warn(&format!(
                "Android emulator `{}` not started. Continuing with any connected device...",
                self.settings.avd_name
            ));
        }
        self.build(
            progress,
            "📲  Building and launching on Android emulator",
            &commands::build_android(self.settings),
        )
    }

    fn build(
        &self,
        progress: &mut dyn Progress,
        title: &str,
        command: &CommandSpec,
    ) -> Result<BuildOutcome> {
        progress.start(title);
        match self.run(command) {
            Ok(_) => {
                progress.done(title);
                Ok(BuildOutcome::Launched)
            }
            Err(e @ Error::CommandExecution { .. }) => {
                progress.fail(title);
                warn!("Build failed: {e}");
                Ok(BuildOutcome::Failed {
                    diagnostics: e.diagnostics().unwrap_or_default().to_string(),
                })
            }
            Err(e) => {
                progress.fail(title);
                Err(e)
            }
        }
    }

    /// Deletes `artifact` from the checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal command fails.
    pub fn clear(&self, artifact: Artifact, progress: &mut dyn Progress) -> Result<()> {
        step(progress, artifact.title(), || {
            self.run(&commands::remove_directory(&artifact.path(self.settings)))
        })?;
        Ok(())
    }
}
