use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::AppData;
use crate::errors::InternalError;
use crate::errors::internal::DiscountError;
use crate::providers::access_guard::require_roles;
use crate::providers::{RateResolver, discount_calculator};
use crate::stores::DiscountSettingsStore;
use crate::types::internal::{
    DiscountResult, DiscountSettings, RateSource, RequestContext, Role, decimal_from_f64,
};

/// Orchestrates the discount settings and calculation endpoints
pub struct DiscountCoordinator {
    db: DatabaseConnection,
    settings_store: Arc<DiscountSettingsStore>,
    rate_resolver: Arc<RateResolver>,
}

impl DiscountCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            settings_store: Arc::clone(&app_data.discount_settings_store),
            rate_resolver: Arc::clone(&app_data.rate_resolver),
        }
    }

    /// Settings in effect; any authenticated caller
    pub async fn get_settings(&self, ctx: &RequestContext) -> Result<DiscountSettings, InternalError> {
        ctx.claims()?;
        self.settings_store.effective_settings(&self.db).await
    }

    /// Replace the global settings; super admin only
    ///
    /// The rate is validated before anything is written.
    pub async fn update_settings(
        &self,
        ctx: &RequestContext,
        default_discount_rate: f64,
        apply_to_expired: bool,
    ) -> Result<DiscountSettings, InternalError> {
        require_roles(ctx.claims()?, &[Role::SuperAdmin])?;

        let rate = decimal_from_f64(default_discount_rate)?;
        discount_calculator::validate_rate(rate)?;

        self.settings_store
            .upsert_settings(&self.db, rate, apply_to_expired)
            .await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor_id = %ctx.actor_id,
            ip = ?ctx.ip_address,
            rate = %rate,
            apply_to_expired,
            "Discount settings changed"
        );

        self.settings_store.effective_settings(&self.db).await
    }

    /// Apply the rate resolved for `lab_id` to `amount`
    pub async fn calculate(
        &self,
        ctx: &RequestContext,
        amount: Option<f64>,
        lab_id: Option<&str>,
    ) -> Result<(DiscountResult, RateSource), InternalError> {
        ctx.claims()?;

        let amount = decimal_from_f64(amount.ok_or(DiscountError::MissingAmount)?)?;
        discount_calculator::validate_amount(amount)?;

        let resolved = self.rate_resolver.resolve_with_source(&self.db, lab_id).await?;
        let result = discount_calculator::apply(amount, resolved.rate)?;

        Ok((result, resolved.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::AccessError;
    use crate::test::utils::{authenticated_context, seed_account, seed_lab, setup_test_app_data};
    use crate::types::internal::AccountType;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_get_settings_defaults_before_first_write() {
        let app_data = setup_test_app_data().await;
        let (account, _) = seed_account(&app_data, AccountType::User, Role::User, None, false).await;
        let ctx = authenticated_context(&app_data, &account);

        let settings = DiscountCoordinator::new(app_data).get_settings(&ctx).await.unwrap();
        assert_eq!(settings, DiscountSettings::default());
    }

    #[tokio::test]
    async fn test_update_settings_requires_super_admin() {
        let app_data = setup_test_app_data().await;
        let (branch_admin, _) =
            seed_account(&app_data, AccountType::Admin, Role::BranchAdmin, None, false).await;
        let coordinator = DiscountCoordinator::new(app_data.clone());

        let result = coordinator
            .update_settings(&authenticated_context(&app_data, &branch_admin), 20.0, false)
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Access(AccessError::RoleNotAllowed { role: Role::BranchAdmin }))
        ));
        assert!(app_data.discount_settings_store.get_settings(&app_data.db).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_out_of_range_rate_writes_nothing() {
        let app_data = setup_test_app_data().await;
        let (admin, _) = seed_account(&app_data, AccountType::Admin, Role::SuperAdmin, None, false).await;
        let coordinator = DiscountCoordinator::new(app_data.clone());
        let ctx = authenticated_context(&app_data, &admin);

        coordinator.update_settings(&ctx, 20.0, true).await.unwrap();

        for rate in [150.0, -1.0, f64::NAN] {
            assert!(matches!(
                coordinator.update_settings(&ctx, rate, false).await,
                Err(InternalError::Discount(_))
            ));
        }

        let stored = coordinator.get_settings(&ctx).await.unwrap();
        assert_eq!(stored.default_discount_rate, Decimal::from(20));
        assert!(stored.apply_to_expired);
    }

    #[tokio::test]
    async fn test_calculate_uses_resolved_rate() {
        let app_data = setup_test_app_data().await;
        let lab = seed_lab(&app_data.db, "LAB-A", Some(Decimal::from(15))).await;
        let (staff, _) = seed_account(
            &app_data,
            AccountType::LabStaff,
            Role::Receptionist,
            Some(lab.id.clone()),
            false,
        )
        .await;
        let coordinator = DiscountCoordinator::new(app_data.clone());
        let ctx = authenticated_context(&app_data, &staff);

        let (with_lab, source) = coordinator.calculate(&ctx, Some(99.99), Some(&lab.id)).await.unwrap();
        assert_eq!(source, RateSource::Lab);
        assert_eq!(with_lab.discount_amount, Decimal::new(1500, 2));
        assert_eq!(with_lab.final_amount, Decimal::new(8499, 2));

        let (without_lab, source) = coordinator.calculate(&ctx, Some(1000.0), None).await.unwrap();
        assert_eq!(source, RateSource::Default);
        assert_eq!(without_lab.discount_amount, Decimal::from(300));
        assert_eq!(without_lab.final_amount, Decimal::from(700));
    }

    #[tokio::test]
    async fn test_calculate_rejects_missing_and_non_positive_amount() {
        let app_data = setup_test_app_data().await;
        let (user, _) = seed_account(&app_data, AccountType::User, Role::User, None, false).await;
        let coordinator = DiscountCoordinator::new(app_data.clone());
        let ctx = authenticated_context(&app_data, &user);

        assert!(matches!(
            coordinator.calculate(&ctx, None, None).await,
            Err(InternalError::Discount(DiscountError::MissingAmount))
        ));
        assert!(matches!(
            coordinator.calculate(&ctx, Some(0.0), None).await,
            Err(InternalError::Discount(DiscountError::NonPositiveAmount(_)))
        ));
        assert!(matches!(
            coordinator.calculate(&ctx, Some(-5.0), None).await,
            Err(InternalError::Discount(DiscountError::NonPositiveAmount(_)))
        ));
    }
}
