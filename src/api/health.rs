use std::sync::Arc;

use chrono::Utc;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::types::dto::common::HealthResponse;

#[derive(Tags)]
enum HealthTags {
    /// Liveness and database reachability
    Health,
}

pub struct HealthApi {
    app_data: Arc<AppData>,
}

impl HealthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

#[OpenApi]
impl HealthApi {
    /// Service status; no token required
    ///
    /// `status` is `degraded` when the database does not answer a ping.
    #[oai(path = "/health", method = "get", tag = "HealthTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        let database_reachable = match self.app_data.db.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Health check database ping failed: {}", e);
                false
            }
        };

        Json(HealthResponse {
            status: if database_reachable { "healthy" } else { "degraded" }.to_string(),
            database: if database_reachable { "reachable" } else { "unreachable" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
