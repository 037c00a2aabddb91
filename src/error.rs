//! Error types for zapi-client
//!
//! This module defines the error hierarchy used throughout the crate.
//! "Not found" lookups are not errors: resource methods return `Ok(None)`
//! for those, and only transport, decode and credential failures land here.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("ZAPI error: {0}")]
    Zapi(#[from] ZapiError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },
}

/// ZAPI request errors
#[derive(Error, Debug)]
pub enum ZapiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("ZAPI error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized: invalid username or password")]
    Unauthorized,

    #[error("Forbidden: insufficient permissions for {action}")]
    Forbidden { action: String },

    #[error("Invalid response from ZAPI: {0}")]
    InvalidResponse(String),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

impl ZapiError {
    /// Create an error for a non-2xx response whose body could not be decoded
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            401 => ZapiError::Unauthorized,
            403 => ZapiError::Forbidden {
                action: "this operation".into(),
            },
            404 => ZapiError::NotFound {
                resource: "requested resource".into(),
            },
            _ => ZapiError::Api {
                status,
                message: if body.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.to_string()
                },
            },
        }
    }
}

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No credentials configured")]
    NotConfigured,

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
}

/// Raised when a status name is not one of the known execution statuses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown execution status '{0}' (expected PASS, FAIL, WIP, BLOCKED or UNEXECUTED)")]
pub struct ParseStatusError(pub String);

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for ZAPI operations
pub type ZapiResult<T> = std::result::Result<T, ZapiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zapi_error_from_response() {
        assert!(matches!(
            ZapiError::from_response(401, ""),
            ZapiError::Unauthorized
        ));

        assert!(matches!(
            ZapiError::from_response(403, ""),
            ZapiError::Forbidden { .. }
        ));

        assert!(matches!(
            ZapiError::from_response(404, "<html>"),
            ZapiError::NotFound { .. }
        ));

        let api_err = ZapiError::from_response(500, "Internal server error");
        match api_err {
            ZapiError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal server error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_message() {
        let err = ZapiError::from_response(502, "");
        assert_eq!(err.to_string(), "ZAPI error (HTTP 502): HTTP 502");
    }

    #[test]
    fn test_auth_error_wraps_into_app_error() {
        let err: AppError = AuthError::NotConfigured.into();
        assert!(matches!(err, AppError::Auth(AuthError::NotConfigured)));
    }
}
