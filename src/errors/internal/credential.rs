use thiserror::Error;

/// Authentication and account failures
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("No token provided")]
    MissingToken,

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Token expired")]
    ExpiredToken,

    /// Token verified but the account is gone or deactivated
    #[error("Account not found or inactive: {account_id}")]
    AccountInactive { account_id: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Password validation failed: {0}")]
    PasswordValidationFailed(String),

    #[error("Account already exists: {0}")]
    DuplicateEmail(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Role does not fit the account table, or a lab-scoped role has no lab
    #[error("Invalid account: {0}")]
    InvalidAccountShape(String),
}

impl CredentialError {
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        CredentialError::InvalidToken {
            reason: reason.into(),
        }
    }
}
