use thiserror::Error;

/// Input validation failures for discount operations; surface as 400
#[derive(Error, Debug)]
pub enum DiscountError {
    #[error("Amount is required")]
    MissingAmount,

    #[error("Amount must be greater than 0, got {0}")]
    NonPositiveAmount(String),

    #[error("Discount rate must be between 0 and 100, got {0}")]
    RateOutOfRange(String),

    #[error("Amount is too large to discount: {0}")]
    AmountTooLarge(String),

    #[error("Value is not a finite number: {0}")]
    NotANumber(String),
}
