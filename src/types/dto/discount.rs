use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::{DiscountResult, DiscountSettings, RateSource, decimal_to_f64};

/// Global discount settings as exposed over the API
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct DiscountSettingsResponse {
    /// Percentage applied when a lab has no rate of its own
    pub default_discount_rate: f64,

    /// Whether the discount also applies to expired cards
    pub apply_to_expired: bool,

    /// Last update (Unix timestamp); absent while the built-in default is in effect
    #[oai(skip_serializing_if_is_none)]
    pub updated_at: Option<i64>,
}

/// Request model for replacing the global discount settings
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateDiscountSettingsRequest {
    /// Percentage between 0 and 100 inclusive
    pub default_discount_rate: f64,

    pub apply_to_expired: bool,
}

/// Request model for a discount calculation
///
/// `amount` is optional at the schema level so a missing value is reported
/// with the same error body as a non-positive one.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CalculateDiscountRequest {
    pub amount: Option<f64>,

    /// Lab whose rate should be preferred over the global default
    pub lab_id: Option<String>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DiscountResultResponse {
    pub original_amount: f64,
    pub discount_percentage: f64,
    pub discount_amount: f64,
    pub final_amount: f64,

    /// Which tier supplied the rate: "lab", "settings" or "default"
    pub rate_source: String,
}

impl From<DiscountSettings> for DiscountSettingsResponse {
    fn from(settings: DiscountSettings) -> Self {
        Self {
            default_discount_rate: decimal_to_f64(settings.default_discount_rate),
            apply_to_expired: settings.apply_to_expired,
            updated_at: settings.updated_at,
        }
    }
}

impl DiscountResultResponse {
    pub fn new(result: DiscountResult, source: RateSource) -> Self {
        Self {
            original_amount: decimal_to_f64(result.original_amount),
            discount_percentage: decimal_to_f64(result.discount_percentage),
            discount_amount: decimal_to_f64(result.discount_amount),
            final_amount: decimal_to_f64(result.final_amount),
            rate_source: source.as_str().to_string(),
        }
    }
}
