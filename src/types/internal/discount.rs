use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::errors::internal::DiscountError;

/// Rate applied when neither the lab nor the settings row provides one
pub const DEFAULT_DISCOUNT_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Global discount configuration
///
/// `updated_at` is `None` when no settings row has been written yet and the
/// built-in default is in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountSettings {
    pub default_discount_rate: Decimal,
    pub apply_to_expired: bool,
    pub updated_at: Option<i64>,
}

impl Default for DiscountSettings {
    fn default() -> Self {
        Self {
            default_discount_rate: DEFAULT_DISCOUNT_RATE,
            apply_to_expired: false,
            updated_at: None,
        }
    }
}

/// Which tier answered a rate lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    Lab,
    Settings,
    Default,
}

impl RateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateSource::Lab => "lab",
            RateSource::Settings => "settings",
            RateSource::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRate {
    pub rate: Decimal,
    pub source: RateSource,
}

/// Outcome of applying a rate to an amount; all values rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountResult {
    pub original_amount: Decimal,
    pub discount_percentage: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
}

/// Convert a wire/database float into a `Decimal`, shedding binary noise
/// (`0.1f64` becomes exactly `0.1`)
pub fn decimal_from_f64(value: f64) -> Result<Decimal, DiscountError> {
    if !value.is_finite() {
        return Err(DiscountError::NotANumber(value.to_string()));
    }
    Decimal::from_f64(value).ok_or_else(|| DiscountError::NotANumber(value.to_string()))
}

/// Convert a cent-rounded `Decimal` back to a float for JSON and storage
pub fn decimal_to_f64(value: Decimal) -> f64 {
    // to_f64 only fails for integers wider than i128, which Decimal cannot hold
    value.to_f64().unwrap_or_default()
}
