//! Reading the settings file and rewriting the app's environment file.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::config::Settings;
use crate::env_file::replace_api_base_url;
use crate::error::{Error, Result};

fn read_file(file_description: &str, path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

/// Reads settings from `settings_path`.
///
/// A missing file is not an error: the defaults are returned instead.
///
/// # Errors
///
/// Returns an error if:
/// - The file exists but cannot be read
/// - The file contains invalid YAML
pub fn get_settings(settings_path: &str) -> Result<Settings> {
    if !Path::exists(Path::new(settings_path)) {
        info!("No settings file at `{settings_path}`, using defaults");
        return Ok(Settings::default());
    }

    let contents = read_file("settings", settings_path)?;
    if contents.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: serde_yaml::Result<Settings> = serde_yaml::from_str(&contents);

    match settings {
        Ok(settings) => Ok(settings),
        Err(e) => Err(Error::yaml_error(
            "reading".to_string(),
            "settings".to_string(),
            settings_path.to_string(),
            e,
        )),
    }
}

/// Points the environment file at `url` by rewriting its `API_BASE_URL` line.
///
/// This is a plain read-modify-write with no locking. Returns whether the
/// file was changed; a file without an `API_BASE_URL` line is left as it is.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn set_api_base_url(env_file_path: &Path, url: &str) -> Result<bool> {
    let path_display = env_file_path.to_string_lossy().to_string();

    let contents = read_file("environment", &path_display)?;

    let Some(rewritten) = replace_api_base_url(&contents, url) else {
        warn!("No API_BASE_URL line in `{path_display}`, leaving it unchanged");
        return Ok(false);
    };

    fs::write(env_file_path, rewritten)
        .map_err(|e| Error::io_error("environment".to_string(), path_display.clone(), e))?;

    info!("Set API_BASE_URL={url} in `{path_display}`");
    Ok(true)
}
