use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::helpers;
use crate::coordinators::AuthCoordinator;
use crate::errors::ApiError;
use crate::types::dto::auth::{
    ChangePasswordRequest, ChangePasswordResponse, LoginRequest, MeResponse, TokenResponse,
};

/// Authentication API endpoints
pub struct AuthApi {
    app_data: Arc<AppData>,
    auth_coordinator: Arc<AuthCoordinator>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: Arc::new(AuthCoordinator::new(app_data.clone())),
            app_data,
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with email, password and portal to receive a bearer token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, req: &Request, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, ApiError> {
        let ctx = helpers::anonymous_context(req);

        let (issued, account) = self
            .auth_coordinator
            .login(&ctx, &body.email, &body.password, body.account_type)
            .await?;

        Ok(Json(TokenResponse {
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in: self.auth_coordinator.token_ttl_seconds(),
            role: account.role,
            must_change_password: account.must_change_password,
        }))
    }

    /// Profile of the authenticated account
    ///
    /// Reachable while a password change is pending.
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, req: &Request) -> Result<Json<MeResponse>, ApiError> {
        let ctx = helpers::authenticate(&self.app_data, req).await?;
        let account = self.auth_coordinator.me(&ctx).await?;
        let claims = ctx.claims()?;

        Ok(Json(MeResponse::new(account, claims)))
    }

    /// Change the caller's password and clear any pending-change flag
    #[oai(path = "/change-password", method = "post", tag = "AuthTags::Authentication")]
    async fn change_password(
        &self,
        req: &Request,
        body: Json<ChangePasswordRequest>,
    ) -> Result<Json<ChangePasswordResponse>, ApiError> {
        let ctx = helpers::authenticate(&self.app_data, req).await?;

        self.auth_coordinator
            .change_password(&ctx, &body.current_password, &body.new_password)
            .await?;

        Ok(Json(ChangePasswordResponse {
            message: "Password changed successfully".to_string(),
        }))
    }
}
