//! Configuration types for zapi-client
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::util::SecretString;
use serde::Deserialize;

/// Server the client talks to when nothing else is configured
pub const DEFAULT_JIRA_URL: &str = "https://jira.salsitasoft.com";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Jira connection settings
    pub jira: JiraConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Jira/ZAPI connection configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    /// Jira instance URL (e.g., `https://jira.example.com`)
    pub url: String,

    /// Basic auth username (prefer env var JIRA_USER)
    pub username: Option<String>,

    /// Basic auth password or API token (prefer env var JIRA_PASSWORD)
    pub password: Option<SecretString>,

    /// Request timeout in seconds; requests never time out when unset
    pub timeout_secs: Option<u64>,

    /// Whether to verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_JIRA_URL.to_string(),
            username: None,
            password: None,
            timeout_secs: None,
            verify_ssl: true,
        }
    }
}

impl JiraConfig {
    /// Get the base URL with any trailing slash removed
    pub fn base_url(&self) -> String {
        self.url.trim_end_matches('/').to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
