//! Settings for mh-qa.
//!
//! Every value describes project policy (where the checkout lives, which API
//! hosts exist, how branches are named) and can be overridden from a YAML
//! file. Paths may use `~`, which is expanded against the user's home directory.

use std::path::PathBuf;

use serde::Deserialize;

use crate::api::ApiUrls;
use crate::branches::BranchPolicy;

/// Default path for the settings file
const DEFAULT_CONFIG_PATH: &str = "~/.mh-qa/config.yml";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Checkout of the mobile app repository.
    pub repo_directory: String,
    /// Clone URL used by `setup` when the checkout is missing.
    pub repo_url: String,
    /// App environment file, relative to the checkout.
    pub env_file: String,
    /// Template copied over the environment file during `setup`.
    pub env_template: String,
    pub android_sdk: String,
    pub android_studio: String,
    /// Android virtual device created by `setup` and booted for Android runs.
    pub avd_name: String,
    pub avd_home: String,
    pub default_simulator: String,
    pub api: ApiUrls,
    pub branches: BranchPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo_directory: "~/code/missionhub-react-native".to_string(),
            repo_url: "https://github.com/CruGlobal/missionhub-react-native.git".to_string(),
            env_file: ".env".to_string(),
            env_template: ".env.beta".to_string(),
            android_sdk: "~/Library/Android/sdk".to_string(),
            android_studio: "/Applications/Android Studio.app".to_string(),
            avd_name: "missionhub_qa_cli".to_string(),
            avd_home: "~/.android/avd".to_string(),
            default_simulator: "iPhone X".to_string(),
            api: ApiUrls::default(),
            branches: BranchPolicy::default(),
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

impl Settings {
    #[must_use]
    pub fn repo_directory(&self) -> PathBuf {
        expand(&self.repo_directory)
    }

    #[must_use]
    pub fn ios_directory(&self) -> PathBuf {
        self.repo_directory().join("ios")
    }

    #[must_use]
    pub fn env_file_path(&self) -> PathBuf {
        self.repo_directory().join(&self.env_file)
    }

    #[must_use]
    pub fn env_template_path(&self) -> PathBuf {
        self.repo_directory().join(&self.env_template)
    }

    #[must_use]
    pub fn android_sdk(&self) -> PathBuf {
        expand(&self.android_sdk)
    }

    #[must_use]
    pub fn android_studio(&self) -> PathBuf {
        expand(&self.android_studio)
    }

    /// Directory holding the configuration of the QA virtual device.
    #[must_use]
    pub fn avd_directory(&self) -> PathBuf {
        expand(&self.avd_home).join(format!("{}.avd", self.avd_name))
    }
}

/// Resolves the settings file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// settings path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use mh_qa_core::config::get_config_path;
///
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}
