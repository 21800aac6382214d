use poem::Request;

use crate::AppData;
use crate::errors::ApiError;
use crate::types::internal::RequestContext;

/// Authenticate the request and apply the password gate for its route
///
/// The gate is checked against the path below the `/api` mount point
/// (`/auth/me`), which is what the nested route tree hands to handlers.
pub async fn authenticate(app_data: &AppData, req: &Request) -> Result<RequestContext, ApiError> {
    let path = req.uri().path();

    let result = app_data
        .auth_guard
        .authenticate(&app_data.db, req)
        .await
        .map_err(ApiError::from_internal_error)?;

    result.into_result_for_route(path).map_err(|err| {
        tracing::debug!(path, "Blocked by password gate");
        ApiError::from_internal_error(err)
    })
}

/// Context for endpoints that do not require a token
pub fn anonymous_context(req: &Request) -> RequestContext {
    RequestContext::for_api(RequestContext::extract_ip_address(req))
}
