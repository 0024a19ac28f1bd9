use crate::error::ConfigError;
use std::env;

pub const API_URL_VAR: &str = "AREAFLOW_API_URL";
pub const TIMEOUT_VAR: &str = "AREAFLOW_TIMEOUT_SECS";
/// Bearer token picked up by the command-line client.
pub const TOKEN_VAR: &str = "AREAFLOW_TOKEN";

const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
// The Android emulator reaches the host machine through this alias.
const ANDROID_API_URL: &str = "http://10.0.2.2:8080/api/v1";

/// Where the client runs. Only changes the default backend address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Platform {
    #[default]
    Web,
    Ios,
    Android,
}

impl Platform {
    pub fn default_api_url(self) -> &'static str {
        match self {
            Platform::Android => ANDROID_API_URL,
            Platform::Web | Platform::Ios => DEFAULT_API_URL,
        }
    }
}

/// Configuration for the backend client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Timeout in seconds for HTTP requests
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::for_platform(Platform::default())
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self {
            base_url: platform.default_api_url().to_string(),
            timeout_secs: 30,
        }
    }

    /// Platform defaults, overridden by the environment (and a `.env` file, if present).
    pub fn from_env(platform: Platform) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(platform, |key| env::var(key).ok())
    }

    fn from_lookup<F>(platform: Platform, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::for_platform(platform);
        if let Some(url) = lookup(API_URL_VAR).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            config.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: TIMEOUT_VAR.to_string(),
                value: raw.clone(),
            })?;
        }
        Ok(config)
    }

    /// Joins `path` onto the base URL with exactly one slash between them.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
