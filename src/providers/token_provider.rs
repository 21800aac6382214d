use std::fmt;
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::SecretManager;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::internal::{Account, Claims};

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: String,
    /// Unix timestamp
    pub expires_at: i64,
}

/// Issues and verifies HS256 bearer tokens
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
    ttl: Duration,
}

impl TokenProvider {
    pub fn new(secret_manager: Arc<SecretManager>, ttl_hours: i64) -> Self {
        Self {
            secret_manager,
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Token lifetime in seconds, as reported to clients
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Sign a token for the account with the configured lifetime
    pub fn issue(&self, account: &Account) -> Result<IssuedToken, InternalError> {
        self.issue_with_ttl(account, self.ttl)
    }

    /// Sign a token for the account with an explicit lifetime
    pub fn issue_with_ttl(&self, account: &Account, ttl: Duration) -> Result<IssuedToken, InternalError> {
        let now = Utc::now().timestamp();
        let expires_at = now + ttl.num_seconds();
        let jti = Uuid::new_v4().to_string();

        let claims = Claims {
            sub: account.id.clone(),
            email: account.email.clone(),
            role: account.role,
            lab_id: account.lab_id.clone(),
            account_type: account.account_type,
            iat: now,
            exp: expires_at,
            jti: jti.clone(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", format!("Failed to generate JWT: {}", e)))?;

        tracing::debug!(account_id = %account.id, jti = %jti, "Token issued");

        Ok(IssuedToken {
            token,
            jti,
            expires_at,
        })
    }

    /// Check signature and expiry and return the claims
    ///
    /// # Returns
    /// * `Err(InternalError)` - `ExpiredToken` past `exp` (no leeway), `InvalidToken` otherwise
    pub fn verify(&self, token: &str) -> Result<Claims, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => InternalError::from(CredentialError::ExpiredToken),
            _ => InternalError::from(CredentialError::invalid_token(e.to_string())),
        })
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("secret_manager", &"<redacted>")
            .field("ttl_seconds", &self.ttl.num_seconds())
            .finish()
    }
}

impl fmt::Display for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenProvider {{ ttl: {}h }}", self.ttl.num_hours())
    }
}
