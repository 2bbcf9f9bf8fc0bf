//! Auth configuration types

use secrecy::{ExposeSecret, SecretString};
use std::time::Instant;

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// HTTP Basic authentication with a communication user
    Basic {
        /// Username
        username: String,
        /// Password (never printed)
        password: SecretString,
    },
}

impl AuthConfig {
    /// Create a basic auth config
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// The username, if any
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Basic { username, .. } => Some(username),
        }
    }

    /// Check whether the basic credentials are usable
    pub fn has_credentials(&self) -> bool {
        match self {
            Self::None => false,
            Self::Basic { username, password } => {
                !username.is_empty() && !password.expose_secret().is_empty()
            }
        }
    }
}

/// A CSRF token handed out by a service's `$metadata` endpoint
#[derive(Debug, Clone)]
pub struct CsrfToken {
    /// The token value
    pub value: String,
    /// When it was fetched
    pub fetched_at: Instant,
}

impl CsrfToken {
    /// Create a token fetched now
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            fetched_at: Instant::now(),
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert!(matches!(config, AuthConfig::None));
        assert!(!config.has_credentials());
        assert_eq!(config.username(), None);
    }

    #[test]
    fn test_basic_auth_config() {
        let config = AuthConfig::basic("COMM_USER", "s3cret");
        assert!(config.has_credentials());
        assert_eq!(config.username(), Some("COMM_USER"));
    }

    #[test]
    fn test_basic_auth_empty_password() {
        let config = AuthConfig::basic("COMM_USER", "");
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_password_not_in_debug_output() {
        let config = AuthConfig::basic("COMM_USER", "s3cret");
        let debug = format!("{config:?}");
        assert!(debug.contains("COMM_USER"));
        assert!(!debug.contains("s3cret"));
    }
}
