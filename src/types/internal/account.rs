use chrono::Utc;
use uuid::Uuid;

use super::auth::{AccountType, Role};

/// Account row as seen by providers and coordinators
///
/// Table-agnostic: the same shape is loaded from `admins`, `users` and
/// `lab_staff`, with `account_type` recording where it came from.
#[derive(Clone, PartialEq)]
pub struct Account {
    pub id: String,
    pub account_type: AccountType,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub lab_id: Option<String>,
    pub is_active: bool,
    pub must_change_password: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Account {
    /// Build a fresh, active account with a generated id
    pub fn new(
        account_type: AccountType,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
        lab_id: Option<String>,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            account_type,
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            lab_id,
            is_active: true,
            must_change_password: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_must_change_password(mut self, required: bool) -> Self {
        self.must_change_password = required;
        self
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("account_type", &self.account_type)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("lab_id", &self.lab_id)
            .field("is_active", &self.is_active)
            .field("must_change_password", &self.must_change_password)
            .finish()
    }
}
