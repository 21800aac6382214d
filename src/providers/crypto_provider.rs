use std::sync::Arc;

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::Rng;

use crate::config::SecretManager;
use crate::errors::InternalError;

/// Password hashing and generation
///
/// Hashes are Argon2id with the server pepper passed as the Argon2 secret,
/// so a leaked database alone is not enough to test guesses offline.
pub struct CryptoProvider {
    secret_manager: Arc<SecretManager>,
}

impl CryptoProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self { secret_manager }
    }

    fn argon2(pepper: &[u8]) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(pepper, Algorithm::Argon2id, Version::V0x13, Params::default())
            .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a plaintext password
    ///
    /// Runs on the blocking pool; Argon2 is deliberately slow.
    pub async fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let pepper = self.secret_manager.pepper().to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut rand_core::OsRng);
            Self::argon2(pepper.as_bytes())?
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| InternalError::crypto("password_hash", e.to_string()))
        })
        .await
        .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?
    }

    /// Check a plaintext password against a stored hash
    ///
    /// # Returns
    /// * `Ok(true)` / `Ok(false)` - Match or mismatch
    /// * `Err(InternalError)` - The stored hash is malformed
    pub async fn verify_password(&self, password_hash: &str, password: &str) -> Result<bool, InternalError> {
        let pepper = self.secret_manager.pepper().to_string();
        let password_hash = password_hash.to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&password_hash)
                .map_err(|e| InternalError::crypto("password_hash_parse", e.to_string()))?;

            Ok(Self::argon2(pepper.as_bytes())?
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|e| InternalError::crypto("password_verify", e.to_string()))?
    }

    /// Generate a 20-character random password for bootstrap accounts
    pub fn generate_secure_password(&self) -> String {
        const PASSWORD_LENGTH: usize = 20;
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                 abcdefghijklmnopqrstuvwxyz\
                                 0123456789\
                                 !@#$%^&*()_+-=[]{}|;:,.<>?";

        let mut rng = rand::rng();
        (0..PASSWORD_LENGTH)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }
}
