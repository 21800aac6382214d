pub mod account;
pub mod auth;
pub mod context;
pub mod discount;

pub use account::Account;
pub use auth::{AccountType, Claims, Role};
pub use context::{ContextResult, RequestContext, RequestId, RequestSource};
pub use discount::{
    DEFAULT_DISCOUNT_RATE, DiscountResult, DiscountSettings, RateSource, ResolvedRate, decimal_from_f64,
    decimal_to_f64,
};
