use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::AppData;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::{CryptoProvider, IssuedToken, TokenProvider};
use crate::stores::AccountStore;
use crate::types::internal::{Account, AccountType, RequestContext};

/// Minimum length for a new password
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Orchestrates login, profile lookup and password changes
pub struct AuthCoordinator {
    db: DatabaseConnection,
    account_store: Arc<AccountStore>,
    crypto_provider: Arc<CryptoProvider>,
    token_provider: Arc<TokenProvider>,
}

impl AuthCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            account_store: Arc::clone(&app_data.account_store),
            crypto_provider: Arc::clone(&app_data.crypto_provider),
            token_provider: Arc::clone(&app_data.token_provider),
        }
    }

    pub fn token_ttl_seconds(&self) -> i64 {
        self.token_provider.ttl_seconds()
    }

    /// Verify credentials against the table for `account_type` and issue a token
    ///
    /// Unknown email, wrong password and deactivated account are all reported
    /// as `InvalidCredentials`.
    pub async fn login(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
        account_type: AccountType,
    ) -> Result<(IssuedToken, Account), InternalError> {
        let account = match self.account_store.find_by_email(&self.db, account_type, email).await? {
            Some(account) if account.is_active => account,
            _ => {
                tracing::info!(request_id = %ctx.request_id, ip = ?ctx.ip_address, account_type = %account_type, "Login rejected");
                return Err(CredentialError::InvalidCredentials.into());
            }
        };

        if !self
            .crypto_provider
            .verify_password(&account.password_hash, password)
            .await?
        {
            tracing::info!(
                request_id = %ctx.request_id,
                ip = ?ctx.ip_address,
                account_id = %account.id,
                "Login rejected: wrong password"
            );
            return Err(CredentialError::InvalidCredentials.into());
        }

        let issued = self.token_provider.issue(&account)?;
        tracing::info!(
            request_id = %ctx.request_id,
            ip = ?ctx.ip_address,
            account_id = %account.id,
            must_change_password = account.must_change_password,
            "Login succeeded"
        );

        Ok((issued, account))
    }

    /// Current account of an authenticated context
    pub async fn me(&self, ctx: &RequestContext) -> Result<Account, InternalError> {
        let claims = ctx.claims()?;
        self.account_store
            .find_active(&self.db, claims.account_type, &claims.sub)
            .await
    }

    /// Replace the caller's password and clear `must_change_password`
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), InternalError> {
        let claims = ctx.claims()?;
        let account = self
            .account_store
            .find_active(&self.db, claims.account_type, &claims.sub)
            .await?;

        if !self
            .crypto_provider
            .verify_password(&account.password_hash, current_password)
            .await?
        {
            return Err(CredentialError::IncorrectPassword.into());
        }

        validate_new_password(current_password, new_password)?;

        let new_hash = self.crypto_provider.hash_password(new_password).await?;
        self.account_store
            .update_password(&self.db, account.account_type, &account.id, &new_hash)
            .await?;

        tracing::info!(request_id = %ctx.request_id, ip = ?ctx.ip_address, account_id = %account.id, "Password changed");
        Ok(())
    }
}

fn validate_new_password(current_password: &str, new_password: &str) -> Result<(), InternalError> {
    if new_password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CredentialError::PasswordValidationFailed(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ))
        .into());
    }
    if new_password == current_password {
        return Err(CredentialError::PasswordValidationFailed(
            "New password must differ from the current password".to_string(),
        )
        .into());
    }
    Ok(())
}
