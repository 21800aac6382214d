use thiserror::Error;

use crate::types::internal::Role;

/// Authorization failures; all of these surface as 403
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Role {role} is not permitted for this operation")]
    RoleNotAllowed { role: Role },

    #[error("Account is not associated with a lab")]
    NoLabAssociation,

    #[error("Lab mismatch: account belongs to {account_lab}, request targets {requested_lab}")]
    LabMismatch {
        account_lab: String,
        requested_lab: String,
    },

    #[error("Password change required")]
    PasswordChangeRequired,
}
