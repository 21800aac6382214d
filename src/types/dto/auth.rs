use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::{Account, AccountType, Claims, Role};

/// Request model for login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,

    /// Password for authentication
    pub password: String,

    /// Which portal the account belongs to
    pub account_type: AccountType,
}

/// Response model containing the issued token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT for the Authorization header
    pub token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the token expires
    pub expires_in: i64,

    pub role: Role,

    /// When true every route except the password-change flow is blocked
    pub must_change_password: bool,
}

/// Profile of the authenticated account
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub account_type: AccountType,
    pub lab_id: Option<String>,
    pub must_change_password: bool,

    /// Token expiration time (Unix timestamp)
    pub expires_at: i64,
}

/// Request model for changing the caller's password
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ChangePasswordResponse {
    /// Success message
    pub message: String,
}

impl MeResponse {
    pub fn new(account: Account, claims: &Claims) -> Self {
        Self {
            id: account.id,
            email: account.email,
            role: account.role,
            account_type: account.account_type,
            lab_id: account.lab_id,
            must_change_password: account.must_change_password,
            expires_at: claims.exp,
        }
    }
}
