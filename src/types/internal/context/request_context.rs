use std::net::IpAddr;

use poem::Request;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::internal::auth::Claims;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Contains contextual information about the current request that is needed
/// for logging and authorization across API, coordinator, and store layers.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Verified token claims, present once the auth guard has run
    pub claims: Option<Claims>,

    /// Source of the request (API, CLI, or System)
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Create an unauthenticated context for an API request
    pub fn for_api(ip_address: Option<IpAddr>) -> Self {
        Self {
            ip_address,
            request_id: RequestId::new(),
            claims: None,
            source: RequestSource::API,
            actor_id: "anonymous".to_owned(),
        }
    }

    /// Create a RequestContext for CLI operations
    ///
    /// # Arguments
    /// * `command_name` - Name of the CLI command being executed
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            claims: None,
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Attach verified claims; the subject becomes the actor
    pub fn with_claims(mut self, claims: Claims) -> Self {
        self.actor_id = claims.sub.clone();
        self.claims = Some(claims);
        self
    }

    /// Claims of the authenticated caller
    ///
    /// # Errors
    /// `CredentialError::MissingToken` when the context was never authenticated
    pub fn claims(&self) -> Result<&Claims, InternalError> {
        self.claims
            .as_ref()
            .ok_or_else(|| InternalError::from(CredentialError::MissingToken))
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    pub fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                if let Ok(ip) = ip.trim().parse() {
                    return Some(ip);
                }
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            if let Ok(ip) = real_ip.trim().parse() {
                return Some(ip);
            }
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::auth::{AccountType, Role};

    fn sample_claims() -> Claims {
        Claims {
            sub: "account-42".to_string(),
            email: "staff@lab.test".to_string(),
            role: Role::Receptionist,
            lab_id: Some("lab-1".to_string()),
            account_type: AccountType::LabStaff,
            iat: 0,
            exp: 60,
            jti: "jti-1".to_string(),
        }
    }

    #[test]
    fn test_unauthenticated_context_has_no_claims() {
        let ctx = RequestContext::for_api(None);

        assert!(ctx.claims.is_none());
        assert!(matches!(
            ctx.claims(),
            Err(InternalError::Credential(CredentialError::MissingToken))
        ));
    }

    #[test]
    fn test_with_claims_sets_actor() {
        let ctx = RequestContext::for_api(None).with_claims(sample_claims());

        assert!(ctx.claims.is_some());
        assert_eq!(ctx.actor_id, "account-42");
        assert_eq!(ctx.claims().unwrap().lab_id.as_deref(), Some("lab-1"));
    }

    #[test]
    fn test_cli_context_actor() {
        let ctx = RequestContext::for_cli("bootstrap");
        assert_eq!(ctx.actor_id, "cli:bootstrap");
        assert_eq!(ctx.source, RequestSource::CLI);
    }

    #[test]
    fn test_forwarded_for_takes_first_address() {
        let req = Request::builder()
            .header("X-Forwarded-For", "10.0.0.7, 172.16.0.1")
            .finish();

        let ip = RequestContext::extract_ip_address(&req);
        assert_eq!(ip, Some("10.0.0.7".parse().unwrap()));
    }
}
