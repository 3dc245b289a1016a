//! Available iOS simulators, as listed by `xcrun simctl`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorDevice {
    pub name: String,
    #[serde(default)]
    pub udid: String,
    #[serde(default)]
    pub state: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Deserialize, Debug)]
struct DeviceListing {
    devices: HashMap<String, Vec<SimulatorDevice>>,
}

/// Parses `xcrun simctl list devices -j` output into device names.
///
/// Runtimes are visited in name order so the result is stable; names seen
/// under more than one runtime are listed once.
///
/// # Errors
///
/// Returns [`Error::Json`] when the output isn't a simctl device listing.
pub fn parse_simulator_names(output: &str) -> Result<Vec<String>> {
    let listing: DeviceListing = serde_json::from_str(output)
        .map_err(|e| Error::json_error("simulator listing".to_string(), e))?;

    let mut runtimes: Vec<_> = listing.devices.into_iter().collect();
    runtimes.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut names: Vec<String> = Vec::new();
    for device in runtimes.into_iter().flat_map(|(_, devices)| devices) {
        if device.is_available && !names.contains(&device.name) {
            names.push(device.name);
        }
    }

    Ok(names)
}
