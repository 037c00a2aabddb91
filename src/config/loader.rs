//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (ZAPI__*)
//! 2. Conventional Jira variables (JIRA_URL, JIRA_USER, JIRA_PASSWORD)
//! 3. Configuration file (TOML)
//! 4. Default values

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use crate::util::SecretString;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "zapi.toml",
    ".zapi.toml",
    "~/.config/zapi/config.toml",
    "/etc/zapi/config.toml",
];

/// Password variables, checked in order of precedence
const PASSWORD_ENV_VARS: &[&str] = &["JIRA_PASSWORD", "JIRA_API_TOKEN"];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    // Credentials are not required here
    validate_config_relaxed(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // First existing default path wins
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    builder = apply_jira_env(builder)?;

    // ZAPI__JIRA__URL, ZAPI__LOGGING__LEVEL, ...
    // Double underscore (__) maps to nested keys (jira.url)
    // Values stay strings here so numeric-looking credentials survive intact;
    // typed fields are converted during deserialization.
    builder = builder.add_source(Environment::with_prefix("ZAPI").separator("__"));

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Conventional Jira variables: (config key, ZAPI__ variable that wins over them, candidates)
const JIRA_ENV_VARS: &[(&str, &str, &[&str])] = &[
    ("jira.url", "ZAPI__JIRA__URL", &["JIRA_URL"]),
    ("jira.username", "ZAPI__JIRA__USERNAME", &["JIRA_USER"]),
    ("jira.password", "ZAPI__JIRA__PASSWORD", PASSWORD_ENV_VARS),
];

/// Override file values with the conventional JIRA_* variables
fn apply_jira_env(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for (key, prefixed, candidates) in JIRA_ENV_VARS {
        if std::env::var_os(prefixed).is_some() {
            continue;
        }
        if let Some(value) = candidates.iter().find_map(|var| std::env::var(var).ok()) {
            builder = builder
                .set_override(*key, value)
                .map_err(|e| ConfigError::Load(e.to_string()))?;
        }
    }

    Ok(builder)
}

/// Validate configuration values (relaxed - no credentials required)
fn validate_config_relaxed(config: &AppConfig) -> Result<(), ConfigError> {
    if config.jira.url.is_empty() {
        return Err(ConfigError::Missing {
            field: "jira.url".to_string(),
        });
    }

    if !config.jira.url.starts_with("http://") && !config.jira.url.starts_with("https://") {
        return Err(ConfigError::Invalid {
            message: format!(
                "jira.url must start with http:// or https://, got: {}",
                config.jira.url
            ),
        });
    }

    if config.jira.timeout_secs == Some(0) {
        return Err(ConfigError::Invalid {
            message: "jira.timeout_secs must be greater than 0".to_string(),
        });
    }

    Ok(())
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    validate_config_relaxed(config)?;

    if config.jira.username.as_deref().is_none_or(str::is_empty) {
        return Err(ConfigError::Missing {
            field: "jira.username (set JIRA_USER environment variable)".to_string(),
        });
    }

    if config.jira.password.as_ref().is_none_or(SecretString::is_empty) {
        return Err(ConfigError::Missing {
            field: "jira.password (set JIRA_PASSWORD environment variable)".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;

    #[test]
    fn test_load_config_from_str_basic() {
        let toml = r#"
[jira]
url = "https://jira.example.com"
username = "qa-bot"
password = "secret"
"#;

        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.jira.url, "https://jira.example.com");
        assert_eq!(config.jira.username.as_deref(), Some("qa-bot"));
        assert_eq!(
            config.jira.password.as_ref().map(SecretString::expose_secret),
            Some("secret")
        );
    }

    #[test]
    fn test_load_config_from_str_logging() {
        let toml = r#"
[logging]
level = "debug"
format = "json"
"#;

        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_url_error() {
        let toml = r#"
[jira]
url = "not-a-url"
"#;

        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let toml = r#"
[jira]
timeout_secs = 0
"#;

        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let config = AppConfig::default();
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::Missing { .. })));

        let mut config = AppConfig::default();
        config.jira.username = Some("qa-bot".to_string());
        let result = validate_config(&config);
        match result {
            Err(ConfigError::Missing { field }) => assert!(field.contains("password")),
            other => panic!("unexpected result: {other:?}"),
        }

        config.jira.password = Some(SecretString::new(""));
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Missing { .. })
        ));

        config.jira.password = Some(SecretString::new("secret"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_url_error() {
        let toml = r#"
[jira]
url = ""
"#;

        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }
}
