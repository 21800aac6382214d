use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::AppData;
use crate::api::helpers;
use crate::coordinators::LabCoordinator;
use crate::errors::ApiError;
use crate::types::dto::lab::{LabDiscountResponse, UpdateLabDiscountRequest};

/// Per-lab discount override endpoints
pub struct LabsApi {
    app_data: Arc<AppData>,
    lab_coordinator: Arc<LabCoordinator>,
}

impl LabsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            lab_coordinator: Arc::new(LabCoordinator::new(app_data.clone())),
            app_data,
        }
    }
}

#[derive(Tags)]
enum LabTags {
    /// Lab discount overrides
    Labs,
}

#[OpenApi(prefix_path = "/labs")]
impl LabsApi {
    /// Lab discount override and the rate in effect for the lab
    #[oai(path = "/:lab_id/discount", method = "get", tag = "LabTags::Labs")]
    async fn get_discount(&self, req: &Request, lab_id: Path<String>) -> Result<Json<LabDiscountResponse>, ApiError> {
        let ctx = helpers::authenticate(&self.app_data, req).await?;
        let (lab, effective) = self.lab_coordinator.get_lab_discount(&ctx, &lab_id.0).await?;

        Ok(Json(LabDiscountResponse::new(lab, effective)))
    }

    /// Set or clear the lab's discount override
    #[oai(path = "/:lab_id/discount", method = "put", tag = "LabTags::Labs")]
    async fn update_discount(
        &self,
        req: &Request,
        lab_id: Path<String>,
        body: Json<UpdateLabDiscountRequest>,
    ) -> Result<Json<LabDiscountResponse>, ApiError> {
        let ctx = helpers::authenticate(&self.app_data, req).await?;
        let (lab, effective) = self
            .lab_coordinator
            .set_lab_discount(&ctx, &lab_id.0, body.discount_rate)
            .await?;

        Ok(Json(LabDiscountResponse::new(lab, effective)))
    }
}
