use crate::errors::InternalError;
use crate::errors::internal::AccessError;

use super::request_context::RequestContext;

/// Routes an account with a pending mandatory password change may still call
///
/// Paths are relative to the API mount point (`/api`) and matched exactly;
/// a path that merely contains one of these strings is still gated.
pub const PASSWORD_GATE_EXEMPT_ROUTES: &[&str] = &[
    "/auth/login",
    "/auth/me",
    "/auth/change-password",
];

/// Result of authenticating a request, before the password gate is applied
#[derive(Debug)]
pub enum ContextResult {
    /// Context created successfully, no password change required
    Ok(RequestContext),
    /// Password change required - context is included so exempt routes can use it
    PasswordChangeRequired(RequestContext),
}

impl ContextResult {
    pub fn is_exempt_route(path: &str) -> bool {
        PASSWORD_GATE_EXEMPT_ROUTES.contains(&path)
    }

    /// Apply the password gate for the route being served
    ///
    /// # Returns
    /// * `Ok(ctx)` - No change pending, or the route is exempt
    /// * `Err(AccessError::PasswordChangeRequired)` - Account must change its password first
    pub fn into_result_for_route(self, path: &str) -> Result<RequestContext, InternalError> {
        match self {
            ContextResult::Ok(ctx) => Ok(ctx),
            ContextResult::PasswordChangeRequired(ctx) if Self::is_exempt_route(path) => Ok(ctx),
            ContextResult::PasswordChangeRequired(ctx) => {
                tracing::debug!(
                    "Password change pending for {}, rejecting {}",
                    ctx.actor_id,
                    path
                );
                Err(AccessError::PasswordChangeRequired.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gated() -> ContextResult {
        ContextResult::PasswordChangeRequired(RequestContext::for_api(None))
    }

    #[test]
    fn test_ok_context_passes_any_route() {
        let result = ContextResult::Ok(RequestContext::for_api(None));
        assert!(result.into_result_for_route("/discount/settings").is_ok());
    }

    #[test]
    fn test_gated_context_rejected_on_regular_route() {
        let result = gated().into_result_for_route("/discount/calculate");
        assert!(matches!(
            result,
            Err(InternalError::Access(AccessError::PasswordChangeRequired))
        ));
    }

    #[test]
    fn test_gated_context_allowed_on_exempt_routes() {
        for route in PASSWORD_GATE_EXEMPT_ROUTES {
            assert!(gated().into_result_for_route(route).is_ok(), "{} should be exempt", route);
        }
    }

    #[test]
    fn test_exemption_is_exact_match_only() {
        assert!(!ContextResult::is_exempt_route("/labs/change-password"));
        assert!(!ContextResult::is_exempt_route("/auth/change-password/extra"));
        assert!(!ContextResult::is_exempt_route("/authx/me"));
        assert!(!ContextResult::is_exempt_route("/discount/settings?next=/auth/me"));
    }
}
