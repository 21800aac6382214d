use std::fmt;
use std::sync::Arc;

use crate::config::errors::SecretError;
use crate::config::{EnvironmentProvider, SecretKind, SystemEnvironment};

/// Centralized manager for application secrets
pub struct SecretManager {
    jwt_secret: String,
    pepper: String,
}

impl SecretManager {
    /// Load and validate all secrets from the process environment
    pub fn init() -> Result<Self, SecretError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    /// Load and validate all secrets from the given provider
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or too short
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, SecretError> {
        let jwt_secret = SecretKind::JwtSecret.load(env_provider.as_ref())?;
        let pepper = SecretKind::PasswordPepper.load(env_provider.as_ref())?;

        Ok(Self { jwt_secret, pepper })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Pepper mixed into every password hash
    pub fn pepper(&self) -> &str {
        &self.pepper
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("pepper", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 2 }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    const JWT: &str = "this-is-a-valid-jwt-secret-with-32-characters";
    const PEPPER: &str = "valid-pepper-16ch";

    #[test]
    fn test_successful_initialization_with_valid_secrets() {
        let env = Arc::new(
            MockEnvironment::empty().with_vars(&[("JWT_SECRET", JWT), ("PASSWORD_PEPPER", PEPPER)]),
        );

        let manager = SecretManager::from_env_provider(env).unwrap();
        assert_eq!(manager.jwt_secret(), JWT);
        assert_eq!(manager.pepper(), PEPPER);
    }

    #[test]
    fn test_missing_jwt_secret() {
        let env = Arc::new(MockEnvironment::empty().with_var("PASSWORD_PEPPER", PEPPER));

        match SecretManager::from_env_provider(env) {
            Err(SecretError::Missing { secret_name }) => assert_eq!(secret_name, "JWT_SECRET"),
            other => panic!("Expected Missing error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_short_pepper_is_rejected() {
        let env = Arc::new(
            MockEnvironment::empty().with_vars(&[("JWT_SECRET", JWT), ("PASSWORD_PEPPER", "short")]),
        );

        match SecretManager::from_env_provider(env) {
            Err(SecretError::InvalidLength {
                secret_name,
                expected,
                actual,
            }) => {
                assert_eq!(secret_name, "PASSWORD_PEPPER");
                assert_eq!(expected, 16);
                assert_eq!(actual, 5);
            }
            other => panic!("Expected InvalidLength error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_debug_and_display_redact_secrets() {
        let env = Arc::new(
            MockEnvironment::empty().with_vars(&[("JWT_SECRET", JWT), ("PASSWORD_PEPPER", PEPPER)]),
        );
        let manager = SecretManager::from_env_provider(env).unwrap();

        let debug = format!("{:?}", manager);
        let display = format!("{}", manager);

        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(JWT));
        assert!(!debug.contains(PEPPER));
        assert!(!display.contains(JWT));
    }
}
