use crate::config::EnvironmentProvider;
use crate::config::errors::SecretError;

/// Secrets the service refuses to start without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    /// HS256 signing key for access tokens
    JwtSecret,
    /// Server-side value mixed into every Argon2 hash
    PasswordPepper,
}

impl SecretKind {
    pub fn env_var(self) -> &'static str {
        match self {
            SecretKind::JwtSecret => "JWT_SECRET",
            SecretKind::PasswordPepper => "PASSWORD_PEPPER",
        }
    }

    pub fn min_length(self) -> usize {
        match self {
            SecretKind::JwtSecret => 32,
            SecretKind::PasswordPepper => 16,
        }
    }

    /// Read this secret from `env`, enforcing its minimum length
    pub fn load(self, env: &(dyn EnvironmentProvider + Send + Sync)) -> Result<String, SecretError> {
        let name = self.env_var();
        let value = env.get_var(name).ok_or_else(|| SecretError::missing(name))?;

        if value.len() < self.min_length() {
            return Err(SecretError::invalid_length(name, self.min_length(), value.len()));
        }

        Ok(value)
    }
}
