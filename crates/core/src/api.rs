use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiEnvironment {
    Staging,
    Production,
}

impl ApiEnvironment {
    pub const ALL: [ApiEnvironment; 2] = [ApiEnvironment::Staging, ApiEnvironment::Production];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ApiEnvironment::Staging => "staging",
            ApiEnvironment::Production => "production",
        }
    }
}

impl Display for ApiEnvironment {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ApiEnvironment {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "staging" | "stage" => Ok(ApiEnvironment::Staging),
            "production" | "prod" => Ok(ApiEnvironment::Production),
            _ => Err(Error::UnknownApiEnvironment(value.to_string())),
        }
    }
}

/// Base URLs written into the app's environment file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ApiUrls {
    pub staging: String,
    pub production: String,
}

impl Default for ApiUrls {
    fn default() -> Self {
        Self {
            staging: "https://api-stage.missionhub.com".to_string(),
            production: "https://api.missionhub.com".to_string(),
        }
    }
}

impl ApiUrls {
    #[must_use]
    pub fn base_url(&self, environment: ApiEnvironment) -> &str {
        match environment {
            ApiEnvironment::Staging => &self.staging,
            ApiEnvironment::Production => &self.production,
        }
    }
}
