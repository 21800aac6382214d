use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::AppData;
use crate::errors::InternalError;
use crate::providers::access_guard::{require_lab_ownership, require_roles};
use crate::providers::{RateResolver, discount_calculator};
use crate::stores::LabStore;
use crate::types::db::lab;
use crate::types::internal::{RequestContext, ResolvedRate, Role, decimal_from_f64};

/// Orchestrates per-lab discount overrides
pub struct LabCoordinator {
    db: DatabaseConnection,
    lab_store: Arc<LabStore>,
    rate_resolver: Arc<RateResolver>,
}

impl LabCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            lab_store: Arc::clone(&app_data.lab_store),
            rate_resolver: Arc::clone(&app_data.rate_resolver),
        }
    }

    /// Lab row plus the rate that would apply to it
    pub async fn get_lab_discount(
        &self,
        ctx: &RequestContext,
        lab_id: &str,
    ) -> Result<(lab::Model, ResolvedRate), InternalError> {
        require_lab_ownership(ctx.claims()?, lab_id)?;

        let lab = self.lab_store.get(&self.db, lab_id).await?;
        let effective = self.rate_resolver.resolve_with_source(&self.db, Some(lab_id)).await?;

        Ok((lab, effective))
    }

    /// Set or clear the lab's override
    ///
    /// Super admins and branch admins only; branch admins are limited to their own lab.
    pub async fn set_lab_discount(
        &self,
        ctx: &RequestContext,
        lab_id: &str,
        discount_rate: Option<f64>,
    ) -> Result<(lab::Model, ResolvedRate), InternalError> {
        let claims = ctx.claims()?;
        require_roles(claims, &[Role::SuperAdmin, Role::BranchAdmin])?;
        require_lab_ownership(claims, lab_id)?;

        let rate = discount_rate.map(decimal_from_f64).transpose()?;
        if let Some(rate) = rate {
            discount_calculator::validate_rate(rate)?;
        }

        let lab = self.lab_store.set_discount_rate(&self.db, lab_id, rate).await?;
        tracing::info!(
            request_id = %ctx.request_id,
            actor_id = %ctx.actor_id,
            ip = ?ctx.ip_address,
            lab_id,
            rate = ?rate,
            "Lab discount rate changed"
        );

        let effective = self.rate_resolver.resolve_with_source(&self.db, Some(lab_id)).await?;
        Ok((lab, effective))
    }
}
