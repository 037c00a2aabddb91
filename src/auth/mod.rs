//! Authentication module
//!
//! Provides the HTTP Basic credentials attached to every ZAPI request.

pub mod basic;
pub mod provider;

pub use basic::BasicAuthProvider;
pub use provider::{AuthHeader, AuthProvider, BoxedAuthProvider};

use crate::config::JiraConfig;
use crate::error::AuthError;
use tracing::debug;

/// Create an auth provider from configuration
pub fn create_auth_provider(config: &JiraConfig) -> Result<BoxedAuthProvider, AuthError> {
    match (&config.username, &config.password) {
        (Some(username), Some(password)) => {
            let provider = BasicAuthProvider::new(username.clone(), password.clone())?;
            debug!(username = provider.username(), "Using HTTP Basic authentication");
            Ok(Box::new(provider))
        }
        _ => Err(AuthError::NotConfigured),
    }
}
