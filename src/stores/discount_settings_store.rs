use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Set};

use crate::errors::InternalError;
use crate::types::db::discount_settings::{self, ActiveModel, Column, Entity as DiscountSettingsEntity};
use crate::types::internal::{DiscountSettings, decimal_from_f64, decimal_to_f64};

const SETTINGS_ROW_ID: i32 = 1;

/// DiscountSettingsStore manages the singleton discount_settings row
///
/// The row is created lazily by the first write; until then readers see
/// `DiscountSettings::default()`. Writes are last-writer-wins.
pub struct DiscountSettingsStore {}

impl DiscountSettingsStore {
    pub fn new() -> Self {
        Self {}
    }

    /// Raw row, `None` before the first write
    pub async fn get_settings(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Option<discount_settings::Model>, InternalError> {
        DiscountSettingsEntity::find_by_id(SETTINGS_ROW_ID)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_discount_settings", e))
    }

    /// Settings in effect, with the built-in default when no row exists
    pub async fn effective_settings(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<DiscountSettings, InternalError> {
        match self.get_settings(conn).await? {
            Some(row) => Ok(DiscountSettings {
                default_discount_rate: decimal_from_f64(row.default_discount_rate)
                    .map_err(|e| InternalError::parse("discount_settings.default_discount_rate", e.to_string()))?,
                apply_to_expired: row.apply_to_expired,
                updated_at: Some(row.updated_at),
            }),
            None => Ok(DiscountSettings::default()),
        }
    }

    /// Insert the singleton row, or update it in place
    ///
    /// The write is a single `INSERT .. ON CONFLICT (id) DO UPDATE`, so two
    /// first-time writers racing each other both succeed and the later one
    /// wins. Writing the values already stored leaves the row (including
    /// `updated_at`) untouched. Callers validate the rate range first.
    pub async fn upsert_settings(
        &self,
        conn: &impl ConnectionTrait,
        default_discount_rate: Decimal,
        apply_to_expired: bool,
    ) -> Result<discount_settings::Model, InternalError> {
        let rate = decimal_to_f64(default_discount_rate);

        if let Some(existing) = self.get_settings(conn).await? {
            if existing.default_discount_rate == rate && existing.apply_to_expired == apply_to_expired {
                return Ok(existing);
            }
        }

        let row = ActiveModel {
            id: Set(SETTINGS_ROW_ID),
            default_discount_rate: Set(rate),
            apply_to_expired: Set(apply_to_expired),
            updated_at: Set(Utc::now().timestamp()),
        };

        DiscountSettingsEntity::insert(row)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([Column::DefaultDiscountRate, Column::ApplyToExpired, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(|e| InternalError::database("upsert_discount_settings", e))?;

        tracing::info!(rate, apply_to_expired, "Discount settings written");

        self.get_settings(conn).await?.ok_or_else(|| {
            InternalError::database(
                "upsert_discount_settings",
                DbErr::RecordNotFound("discount_settings row missing after upsert".to_string()),
            )
        })
    }
}

impl Default for DiscountSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
