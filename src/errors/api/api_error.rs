use poem_openapi::{ApiResponse, Object, payload::Json};

use crate::errors::internal::{
    AccessError, CredentialError, DiscountError, InternalError, LabError,
};

/// Error body returned by every endpoint
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,

    /// Machine-readable error code
    pub code: String,

    /// HTTP status code
    pub status_code: u16,

    /// Set on the password-gate rejection so clients can redirect to the reset flow
    #[oai(skip_serializing_if_is_none)]
    pub must_change_password: Option<bool>,
}

/// API error types
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Missing or out-of-range input
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Missing, invalid or expired token, or inactive account
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Role or lab mismatch, or a pending mandatory password change
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn body(error: impl Into<String>, code: &str, status_code: u16) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.into(),
        code: code.to_string(),
        status_code,
        must_change_password: None,
    })
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::BadRequest(body(message, "validation_error", 400))
    }

    pub fn no_token() -> Self {
        ApiError::Unauthorized(body("No token provided", "no_token", 401))
    }

    pub fn invalid_token() -> Self {
        ApiError::Unauthorized(body("Invalid token", "invalid_token", 401))
    }

    pub fn token_expired() -> Self {
        ApiError::Unauthorized(body("Token expired", "token_expired", 401))
    }

    pub fn account_inactive() -> Self {
        ApiError::Unauthorized(body(
            "Account not found or inactive",
            "account_inactive",
            401,
        ))
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized(body("Invalid credentials", "invalid_credentials", 401))
    }

    pub fn incorrect_password() -> Self {
        ApiError::Unauthorized(body(
            "Current password is incorrect",
            "incorrect_password",
            401,
        ))
    }

    pub fn insufficient_role() -> Self {
        ApiError::Forbidden(body("Insufficient permissions", "insufficient_role", 403))
    }

    pub fn lab_access_denied() -> Self {
        ApiError::Forbidden(body("Access denied for this lab", "lab_access_denied", 403))
    }

    pub fn password_change_required() -> Self {
        ApiError::Forbidden(Json(ErrorResponse {
            error: "Password change required".to_string(),
            code: "password_change_required".to_string(),
            status_code: 403,
            must_change_password: Some(true),
        }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(body(message, "not_found", 404))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(body(message, "conflict", 409))
    }

    /// Generic internal error; never carries internal details
    pub fn internal_server_error() -> Self {
        ApiError::InternalError(body("Internal server error", "internal_error", 500))
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            // Infrastructure errors - always log and return generic error
            InternalError::Database(_) => {
                tracing::error!("Database failure: {}", err);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }

            InternalError::Credential(credential) => match credential {
                CredentialError::MissingToken => Self::no_token(),
                CredentialError::InvalidToken { reason } => {
                    tracing::debug!("Rejected token: {}", reason);
                    Self::invalid_token()
                }
                CredentialError::ExpiredToken => Self::token_expired(),
                CredentialError::AccountInactive { account_id } => {
                    tracing::info!("Token presented for inactive account {}", account_id);
                    Self::account_inactive()
                }
                CredentialError::InvalidCredentials => Self::invalid_credentials(),
                CredentialError::IncorrectPassword => Self::incorrect_password(),
                CredentialError::PasswordValidationFailed(reason) => Self::validation(reason.clone()),
                CredentialError::DuplicateEmail(email) => {
                    Self::conflict(format!("Account already exists: {}", email))
                }
                CredentialError::AccountNotFound(id) => {
                    Self::not_found(format!("Account not found: {}", id))
                }
                CredentialError::InvalidAccountShape(reason) => Self::validation(reason.clone()),
            },

            InternalError::Access(access) => match access {
                AccessError::RoleNotAllowed { role } => {
                    tracing::debug!("Role {} denied", role);
                    Self::insufficient_role()
                }
                AccessError::NoLabAssociation | AccessError::LabMismatch { .. } => {
                    tracing::debug!("Lab scope denied: {}", access);
                    Self::lab_access_denied()
                }
                AccessError::PasswordChangeRequired => Self::password_change_required(),
            },

            InternalError::Discount(discount) => match discount {
                DiscountError::MissingAmount
                | DiscountError::NonPositiveAmount(_)
                | DiscountError::RateOutOfRange(_)
                | DiscountError::AmountTooLarge(_)
                | DiscountError::NotANumber(_) => Self::validation(discount.to_string()),
            },

            InternalError::Lab(lab) => match lab {
                LabError::NotFound(_) => Self::not_found(lab.to_string()),
                LabError::DuplicateCode(_) => Self::conflict(lab.to_string()),
            },
        }
    }

    fn response(&self) -> &ErrorResponse {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::InternalError(json) => &json.0,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> &str {
        &self.response().error
    }

    /// Get the machine-readable code from the error variant
    pub fn code(&self) -> &str {
        &self.response().code
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        self.response().status_code
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message(), self.status_code())
    }
}
