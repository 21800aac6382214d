use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;

use crate::errors::InternalError;
use crate::stores::{DiscountSettingsStore, LabStore};
use crate::types::internal::{DEFAULT_DISCOUNT_RATE, RateSource, ResolvedRate, decimal_from_f64};

/// Precedence: lab override, then the settings row, then the built-in default
pub fn pick_rate(lab_rate: Option<Decimal>, settings_rate: Option<Decimal>) -> ResolvedRate {
    match (lab_rate, settings_rate) {
        (Some(rate), _) => ResolvedRate {
            rate,
            source: RateSource::Lab,
        },
        (None, Some(rate)) => ResolvedRate {
            rate,
            source: RateSource::Settings,
        },
        (None, None) => ResolvedRate {
            rate: DEFAULT_DISCOUNT_RATE,
            source: RateSource::Default,
        },
    }
}

fn stored_rate(value: f64, column: &str) -> Result<Decimal, InternalError> {
    decimal_from_f64(value).map_err(|e| InternalError::parse(column, e.to_string()))
}

/// Resolves the discount rate for a lab
pub struct RateResolver {
    lab_store: Arc<LabStore>,
    settings_store: Arc<DiscountSettingsStore>,
}

impl RateResolver {
    pub fn new(lab_store: Arc<LabStore>, settings_store: Arc<DiscountSettingsStore>) -> Self {
        Self {
            lab_store,
            settings_store,
        }
    }

    pub async fn resolve(
        &self,
        conn: &impl ConnectionTrait,
        lab_id: Option<&str>,
    ) -> Result<Decimal, InternalError> {
        Ok(self.resolve_with_source(conn, lab_id).await?.rate)
    }

    /// Resolve and report which tier answered
    ///
    /// An unknown lab id is not an error; it falls through to the next tier.
    pub async fn resolve_with_source(
        &self,
        conn: &impl ConnectionTrait,
        lab_id: Option<&str>,
    ) -> Result<ResolvedRate, InternalError> {
        let lab_rate = match lab_id {
            Some(lab_id) => match self.lab_store.find_by_id(conn, lab_id).await? {
                Some(lab) => lab
                    .discount_rate
                    .map(|rate| stored_rate(rate, "labs.discount_rate"))
                    .transpose()?,
                None => {
                    tracing::debug!(lab_id, "Unknown lab, falling back to global discount rate");
                    None
                }
            },
            None => None,
        };

        // settings row is only consulted when the lab has no override
        let settings_rate = match lab_rate {
            Some(_) => None,
            None => self
                .settings_store
                .get_settings(conn)
                .await?
                .map(|row| stored_rate(row.default_discount_rate, "discount_settings.default_discount_rate"))
                .transpose()?,
        };

        let resolved = pick_rate(lab_rate, settings_rate);
        tracing::debug!(
            lab_id = lab_id.unwrap_or("-"),
            rate = %resolved.rate,
            source = resolved.source.as_str(),
            "Discount rate resolved"
        );
        Ok(resolved)
    }
}
