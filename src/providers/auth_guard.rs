use std::sync::Arc;

use poem::Request;
use poem_openapi::auth::{Bearer, BearerAuthorization};
use sea_orm::ConnectionTrait;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::TokenProvider;
use crate::stores::AccountStore;
use crate::types::internal::{ContextResult, RequestContext};

/// Turns a bearer token into an authenticated request context
///
/// The token alone is not trusted: the account it names must still exist and
/// be active in the table selected by the `account_type` claim.
pub struct AuthGuard {
    token_provider: Arc<TokenProvider>,
    account_store: Arc<AccountStore>,
}

impl AuthGuard {
    pub fn new(token_provider: Arc<TokenProvider>, account_store: Arc<AccountStore>) -> Self {
        Self {
            token_provider,
            account_store,
        }
    }

    /// Authenticate the request
    ///
    /// # Returns
    /// * `Ok(ContextResult::Ok)` - Authenticated
    /// * `Ok(ContextResult::PasswordChangeRequired)` - Authenticated, but the account is flagged
    /// * `Err(InternalError)` - Missing, invalid or expired token, or inactive account
    pub async fn authenticate(
        &self,
        conn: &impl ConnectionTrait,
        req: &Request,
    ) -> Result<ContextResult, InternalError> {
        let token = Self::bearer_token(req)?;
        let claims = self.token_provider.verify(&token)?;

        let account = self
            .account_store
            .find_active(conn, claims.account_type, &claims.sub)
            .await?;

        let ctx = RequestContext::for_api(RequestContext::extract_ip_address(req)).with_claims(claims);

        if account.must_change_password {
            tracing::debug!(account_id = %account.id, "Password change pending");
            Ok(ContextResult::PasswordChangeRequired(ctx))
        } else {
            Ok(ContextResult::Ok(ctx))
        }
    }

    /// Bearer token from the Authorization header; empty counts as missing
    fn bearer_token(req: &Request) -> Result<String, InternalError> {
        match Bearer::from_request(req) {
            Ok(bearer) if !bearer.token.trim().is_empty() => Ok(bearer.token),
            _ => Err(CredentialError::MissingToken.into()),
        }
    }
}
