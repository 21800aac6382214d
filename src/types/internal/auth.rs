use std::fmt;
use std::str::FromStr;

use poem_openapi::Enum;
use serde::{Deserialize, Serialize};

use crate::errors::InternalError;

/// Role carried in the token and stored on every account row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
#[oai(rename_all = "snake_case")]
pub enum Role {
    /// Full access, bypasses lab scoping
    SuperAdmin,
    /// Administers a single lab
    BranchAdmin,
    /// Front-desk lab staff
    Receptionist,
    /// Portal end user
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::BranchAdmin => "branch_admin",
            Role::Receptionist => "receptionist",
            Role::User => "user",
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "super_admin" => Ok(Role::SuperAdmin),
            "branch_admin" => Ok(Role::BranchAdmin),
            "receptionist" => Ok(Role::Receptionist),
            "user" => Ok(Role::User),
            other => Err(InternalError::parse("role", format!("unknown role '{}'", other))),
        }
    }
}

/// Which account table a token subject lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
#[oai(rename_all = "snake_case")]
pub enum AccountType {
    Admin,
    User,
    LabStaff,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Admin => "admin",
            AccountType::User => "user",
            AccountType::LabStaff => "lab_staff",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(AccountType::Admin),
            "user" => Ok(AccountType::User),
            "lab_staff" => Ok(AccountType::LabStaff),
            other => Err(InternalError::parse(
                "account_type",
                format!("unknown account type '{}'", other),
            )),
        }
    }
}

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,

    pub email: String,

    pub role: Role,

    /// Lab the account is scoped to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_id: Option<String>,

    /// Selects the account table used for the liveness check
    pub account_type: AccountType,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Token id
    pub jti: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::SuperAdmin, Role::BranchAdmin, Role::Receptionist, Role::User] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!("admin".parse::<Role>().is_err());
        assert!("SuperAdmin".parse::<Role>().is_err());
    }

    #[test]
    fn test_account_type_serializes_snake_case() {
        let json = serde_json::to_string(&AccountType::LabStaff).unwrap();
        assert_eq!(json, "\"lab_staff\"");
        assert_eq!("lab_staff".parse::<AccountType>().unwrap(), AccountType::LabStaff);
    }

    #[test]
    fn test_claims_omit_missing_lab_id() {
        let claims = Claims {
            sub: "id-1".to_string(),
            email: "a@example.com".to_string(),
            role: Role::User,
            lab_id: None,
            account_type: AccountType::User,
            iat: 0,
            exp: 10,
            jti: "jti".to_string(),
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("lab_id").is_none());
        assert_eq!(json["role"], "user");
    }
}
