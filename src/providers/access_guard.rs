use crate::errors::InternalError;
use crate::errors::internal::AccessError;
use crate::types::internal::{Claims, Role};

/// Fail unless the caller's role is one of `allowed`
pub fn require_roles(claims: &Claims, allowed: &[Role]) -> Result<(), InternalError> {
    if allowed.contains(&claims.role) {
        Ok(())
    } else {
        Err(AccessError::RoleNotAllowed { role: claims.role }.into())
    }
}

/// Fail unless the caller may act on `requested_lab_id`
///
/// Super admins bypass lab scoping. Everyone else needs a `lab_id` claim
/// equal to the requested lab.
pub fn require_lab_ownership(claims: &Claims, requested_lab_id: &str) -> Result<(), InternalError> {
    if claims.role.is_super_admin() {
        return Ok(());
    }

    match claims.lab_id.as_deref() {
        None => Err(AccessError::NoLabAssociation.into()),
        Some(lab_id) if lab_id == requested_lab_id => Ok(()),
        Some(lab_id) => Err(AccessError::LabMismatch {
            account_lab: lab_id.to_string(),
            requested_lab: requested_lab_id.to_string(),
        }
        .into()),
    }
}
