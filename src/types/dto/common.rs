use poem_openapi::Object;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// `reachable` or `unreachable`
    pub database: String,

    /// Crate version serving the request
    pub version: String,

    /// RFC 3339 time of the check
    pub timestamp: String,
}
