//! Command-line argument parsing.
//!
//! Every positional argument is optional; anything left out is asked for
//! interactively.

use clap::{Parser, ValueEnum};
use mh_qa_core::api::ApiEnvironment;

/// Top-level actions.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Build and launch on an iOS simulator
    #[value(name = "ios")]
    Ios,
    /// Build and launch on the Android emulator
    #[value(name = "android")]
    Android,
    /// Install the development toolchain and clone the app
    #[value(name = "setup")]
    Setup,
    /// Store the OneSky translation service keys
    #[value(name = "configureTranslationKeys", alias = "oneskySetup", alias = "configure-translation-keys")]
    ConfigureTranslationKeys,
    /// Remove iOS build artifacts
    #[value(name = "clearIosBuild", alias = "clear-ios-build")]
    ClearIosBuild,
    /// Remove installed iOS Pods
    #[value(name = "clearIosPods", alias = "clear-ios-pods")]
    ClearIosPods,
    /// Remove Android build artifacts
    #[value(name = "clearAndroidBuild", alias = "clear-android-build")]
    ClearAndroidBuild,
    /// Do nothing
    #[value(name = "exit")]
    Exit,
}

impl Mode {
    /// Entries of the "What would you like to do?" menu, in display order.
    pub const MENU: [Mode; 8] = [
        Mode::Ios,
        Mode::Android,
        Mode::Setup,
        Mode::ConfigureTranslationKeys,
        Mode::ClearIosBuild,
        Mode::ClearIosPods,
        Mode::ClearAndroidBuild,
        Mode::Exit,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Mode::Ios => "🍏  Run iOS Simulator",
            Mode::Android => "🤖  Run Android emulator",
            Mode::Setup => "🛠️  Setup dev tools",
            Mode::ConfigureTranslationKeys => "🌌  Setup OneSky keys",
            Mode::ClearIosBuild => "🗑️🍏🏺  Remove iOS build artifacts",
            Mode::ClearIosPods => "🗑️🍏🥜  Remove installed iOS Pods",
            Mode::ClearAndroidBuild => "🗑️🤖🏺  Remove Android build artifacts",
            Mode::Exit => "❌  Exit",
        }
    }
}

/// Command-line arguments for the `mh-qa` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use mh_qa_cli::cli_args::{Args, Mode};
///
/// let args = Args::parse_from(["mh-qa", "ios", "develop", "staging", "iPhone X"]);
/// assert_eq!(args.mode, Some(Mode::Ios));
/// ```
#[derive(Parser, Debug)]
#[command(
    about = "Run the MissionHub React Native app for QA",
    version,
    disable_version_flag = true
)]
pub struct Args {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Path to the settings YAML.
    ///
    /// If not provided, defaults to `~/.mh-qa/config.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Action to perform.
    #[arg(value_enum, ignore_case = true)]
    pub mode: Option<Mode>,

    /// Git branch to build
    pub branch: Option<String>,

    /// API environment to test against. One of: staging, production
    pub api_env: Option<ApiEnvironment>,

    /// iOS simulator to use
    pub simulator: Option<String>,
}
