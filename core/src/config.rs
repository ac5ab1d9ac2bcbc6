//! Client configuration.

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "EMPLOYEE_API_BASE_URL";
pub const DEBUG_VAR: &str = "EMPLOYEE_API_DEBUG";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Settings applied to every request an `EmployeeClient` builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every API path (e.g. "http://localhost:8080/api").
    pub base_url: String,

    /// Show request diagnostics to the user instead of only logging them.
    pub debug: bool,

    /// Send cookies with every request so the login session is kept.
    pub include_credentials: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            debug: false,
            include_credentials: true,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_credentials(mut self, include: bool) -> Self {
        self.include_credentials = include;
        self
    }

    /// Read `EMPLOYEE_API_BASE_URL` and `EMPLOYEE_API_DEBUG` from the process
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_base_url(&base_url)?;

        let debug_enabled = lookup(DEBUG_VAR).map(|value| parse_flag(&value)).unwrap_or(false);

        tracing::debug!(base_url = %base_url, debug = debug_enabled, "loaded client config");
        Ok(Self::new(base_url).with_debug(debug_enabled))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
