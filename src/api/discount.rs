use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::helpers;
use crate::coordinators::DiscountCoordinator;
use crate::errors::ApiError;
use crate::types::dto::discount::{
    CalculateDiscountRequest, DiscountResultResponse, DiscountSettingsResponse,
    UpdateDiscountSettingsRequest,
};

/// Discount settings and calculation endpoints
pub struct DiscountApi {
    app_data: Arc<AppData>,
    discount_coordinator: Arc<DiscountCoordinator>,
}

impl DiscountApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            discount_coordinator: Arc::new(DiscountCoordinator::new(app_data.clone())),
            app_data,
        }
    }
}

#[derive(Tags)]
enum DiscountTags {
    /// Discount configuration and calculation
    Discount,
}

#[OpenApi(prefix_path = "/discount")]
impl DiscountApi {
    /// Current global discount settings
    #[oai(path = "/settings", method = "get", tag = "DiscountTags::Discount")]
    async fn get_settings(&self, req: &Request) -> Result<Json<DiscountSettingsResponse>, ApiError> {
        let ctx = helpers::authenticate(&self.app_data, req).await?;
        let settings = self.discount_coordinator.get_settings(&ctx).await?;

        Ok(Json(settings.into()))
    }

    /// Replace the global discount settings (super admin only)
    #[oai(path = "/settings", method = "put", tag = "DiscountTags::Discount")]
    async fn update_settings(
        &self,
        req: &Request,
        body: Json<UpdateDiscountSettingsRequest>,
    ) -> Result<Json<DiscountSettingsResponse>, ApiError> {
        let ctx = helpers::authenticate(&self.app_data, req).await?;
        let settings = self
            .discount_coordinator
            .update_settings(&ctx, body.default_discount_rate, body.apply_to_expired)
            .await?;

        Ok(Json(settings.into()))
    }

    /// Apply the resolved discount rate to an amount
    #[oai(path = "/calculate", method = "post", tag = "DiscountTags::Discount")]
    async fn calculate(
        &self,
        req: &Request,
        body: Json<CalculateDiscountRequest>,
    ) -> Result<Json<DiscountResultResponse>, ApiError> {
        let ctx = helpers::authenticate(&self.app_data, req).await?;
        let (result, source) = self
            .discount_coordinator
            .calculate(&ctx, body.amount, body.lab_id.as_deref())
            .await?;

        Ok(Json(DiscountResultResponse::new(result, source)))
    }
}
