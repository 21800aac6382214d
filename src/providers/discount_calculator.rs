use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::InternalError;
use crate::errors::internal::DiscountError;
use crate::types::internal::DiscountResult;

/// Round to cents, half away from zero (half-up for the positive amounts we accept)
pub fn round2(value: Decimal) -> Decimal {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // no negative zero
    if rounded.is_zero() { Decimal::ZERO } else { rounded }
}

/// Rates are percentages in `[0, 100]`
pub fn validate_rate(rate: Decimal) -> Result<(), InternalError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(DiscountError::RateOutOfRange(rate.normalize().to_string()).into());
    }
    Ok(())
}

pub fn validate_amount(amount: Decimal) -> Result<(), InternalError> {
    if amount <= Decimal::ZERO {
        return Err(DiscountError::NonPositiveAmount(amount.normalize().to_string()).into());
    }
    Ok(())
}

/// Apply a percentage discount to an amount
///
/// `discount = round2(amount * rate / 100)`, `final = round2(amount - discount)`.
/// The discount and final amount always sum to the rounded original.
/// Amounts whose product with the rate exceeds `Decimal` range are rejected.
pub fn apply(amount: Decimal, rate: Decimal) -> Result<DiscountResult, InternalError> {
    validate_amount(amount)?;
    validate_rate(rate)?;

    let discount_amount = amount
        .checked_mul(rate)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .map(round2)
        .ok_or_else(|| DiscountError::AmountTooLarge(amount.normalize().to_string()))?;
    let final_amount = round2(amount - discount_amount);

    Ok(DiscountResult {
        original_amount: round2(amount),
        discount_percentage: round2(rate),
        discount_amount,
        final_amount,
    })
}
