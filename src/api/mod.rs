// API layer - HTTP endpoints
pub mod auth;
pub mod discount;
pub mod health;
pub mod helpers;
pub mod labs;

use std::sync::Arc;

use poem::middleware::Tracing;
use poem::{Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;
use poem_openapi::error::{ParseParamError, ParsePathError, ParseRequestPayloadError};

pub use auth::AuthApi;
pub use discount::DiscountApi;
pub use health::HealthApi;
pub use labs::LabsApi;

use crate::AppData;
use crate::errors::ApiError;

/// Build the full route tree: the API under `/api`, Swagger UI under `/swagger`
///
/// Request bodies and parameters that fail schema parsing are answered with
/// the regular JSON error body instead of poem's plain-text rejection.
pub fn create_app(app_data: Arc<AppData>) -> impl Endpoint {
    let server_url = format!("http://{}/api", app_data.settings.server_address());

    let api_service = OpenApiService::new(
        (
            HealthApi::new(app_data.clone()),
            AuthApi::new(app_data.clone()),
            DiscountApi::new(app_data.clone()),
            LabsApi::new(app_data),
        ),
        "Healthcard Backend API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);

    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .catch_error(|err: ParseRequestPayloadError| async move { malformed_request(err.to_string()) })
        .catch_error(|err: ParseParamError| async move { malformed_request(err.to_string()) })
        .catch_error(|err: ParsePathError| async move { malformed_request(err.to_string()) })
        .with(Tracing)
}

fn malformed_request(reason: String) -> ApiError {
    tracing::debug!("Rejected malformed request: {}", reason);
    ApiError::validation(reason)
}
