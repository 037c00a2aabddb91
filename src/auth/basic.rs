//! HTTP Basic authentication
//!
//! Jira's REST endpoints accept `username:password` (or an API token in the
//! password slot) as a Basic credential.

use crate::auth::provider::{AuthHeader, AuthProvider};
use crate::error::AuthError;
use crate::util::SecretString;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Basic authentication provider
#[derive(Debug, Clone)]
pub struct BasicAuthProvider {
    username: String,
    password: SecretString,
}

impl BasicAuthProvider {
    /// Create a new Basic auth provider
    pub fn new(
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Result<Self, AuthError> {
        let username = username.into();

        if username.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "username must not be empty".to_string(),
            ));
        }
        // A colon would split the credential in the wrong place
        if username.contains(':') {
            return Err(AuthError::InvalidCredentials(
                "username must not contain ':'".to_string(),
            ));
        }

        Ok(Self {
            username,
            password: password.into(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn encoded(&self) -> String {
        STANDARD.encode(format!(
            "{}:{}",
            self.username,
            self.password.expose_secret()
        ))
    }
}

#[async_trait]
impl AuthProvider for BasicAuthProvider {
    async fn get_auth_header(&self) -> Result<AuthHeader, AuthError> {
        Ok(AuthHeader::Basic(self.encoded()))
    }

    fn auth_type(&self) -> &'static str {
        "HTTP Basic"
    }
}
