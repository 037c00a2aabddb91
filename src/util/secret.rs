//! Secret string type for safe credential handling.
//!
//! Provides a wrapper type that prevents accidental logging of passwords.

use serde::Deserialize;
use std::fmt;

/// A wrapper for secrets that prevents accidental logging.
///
/// `Debug` and `Display` print `[REDACTED]`; the value is only reachable
/// through [`SecretString::expose_secret`].
///
/// # Example
/// ```
/// use zapi_client::util::SecretString;
///
/// let password = SecretString::new("hunter2");
/// assert_eq!(format!("{:?}", password), "[REDACTED]");
/// assert_eq!(password.expose_secret(), "hunter2");
/// ```
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Create a new secret from any string-like value.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Explicitly expose the secret value.
    ///
    /// Only call this when building the `Authorization` header.
    #[inline]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        SecretString::new(s)
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString::new(s)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // Best-effort only; copies made by the HTTP stack are not cleared.
        self.0.clear();
        self.0.shrink_to_fit();
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacted() {
        let secret = SecretString::new("jira-password");
        let debug_output = format!("{:?}", secret);
        assert_eq!(debug_output, "[REDACTED]");
        assert!(!debug_output.contains("jira-password"));
    }

    #[test]
    fn test_display_redacted() {
        let secret = SecretString::new("jira-password");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_redacted_inside_struct_debug() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Creds {
            user: String,
            password: SecretString,
        }

        let creds = Creds {
            user: "qa".into(),
            password: SecretString::new("s3cret"),
        };
        let out = format!("{:?}", creds);
        assert!(out.contains("qa"));
        assert!(!out.contains("s3cret"));
    }

    #[test]
    fn test_deserialize() {
        let secret: SecretString = serde_json::from_str(r#""api-token""#).unwrap();
        assert_eq!(secret.expose_secret(), "api-token");
        assert!(!secret.is_empty());
    }
}
