//! Constructors for every external command the QA workflow runs.

use std::path::Path;

use crate::config::Settings;
use crate::execution::CommandSpec;

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn yarn(settings: &Settings) -> CommandSpec {
    CommandSpec::new("yarn").current_dir(settings.repo_directory())
}

#[must_use]
pub fn list_remote_branches(settings: &Settings) -> CommandSpec {
    CommandSpec::new("git")
        .args(["ls-remote", "-q", "--heads"])
        .current_dir(settings.repo_directory())
}

#[must_use]
pub fn fetch_branch(settings: &Settings, branch: &str) -> CommandSpec {
    CommandSpec::new("git")
        .args(["fetch", "origin", branch])
        .current_dir(settings.repo_directory())
}

#[must_use]
pub fn checkout_branch(settings: &Settings, branch: &str) -> CommandSpec {
    CommandSpec::new("git")
        .args(["checkout", "-f", &format!("origin/{branch}")])
        .current_dir(settings.repo_directory())
}

#[must_use]
pub fn install_script_dependencies(settings: &Settings) -> CommandSpec {
    yarn(settings)
}

#[must_use]
pub fn download_translations(settings: &Settings) -> CommandSpec {
    yarn(settings).arg("onesky:download")
}

#[must_use]
pub fn download_schema(settings: &Settings) -> CommandSpec {
    yarn(settings).arg("gql:schema")
}

#[must_use]
pub fn generate_schema_types(settings: &Settings) -> CommandSpec {
    yarn(settings).arg("gql:codegen")
}

#[must_use]
pub fn install_gems(settings: &Settings) -> CommandSpec {
    CommandSpec::new("bundle")
        .arg("install")
        .current_dir(settings.ios_directory())
}

#[must_use]
pub fn install_pods(settings: &Settings) -> CommandSpec {
    CommandSpec::new("pod")
        .args(["install", "--repo-update"])
        .current_dir(settings.ios_directory())
}

#[must_use]
pub fn list_simulators() -> CommandSpec {
    CommandSpec::new("xcrun").args(["simctl", "list", "devices", "iPhone", "available", "-j"])
}

#[must_use]
pub fn build_ios(settings: &Settings, simulator: &str) -> CommandSpec {
    yarn(settings).args([
        "ios".to_string(),
        "--configuration".to_string(),
        "Release".to_string(),
        format!("--simulator={simulator}"),
    ])
}

#[must_use]
pub fn launch_emulator(settings: &Settings) -> CommandSpec {
    CommandSpec::new(path_arg(&settings.android_sdk().join("emulator").join("emulator")))
        .args(["-avd", &settings.avd_name])
}

#[must_use]
pub fn build_android(settings: &Settings) -> CommandSpec {
    yarn(settings)
        .arg("android")
        .env("ANDROID_SDK_ROOT", path_arg(&settings.android_sdk()))
}

#[must_use]
pub fn remove_directory(path: &Path) -> CommandSpec {
    CommandSpec::new("rm").args(["-rf".to_string(), path_arg(path)])
}
