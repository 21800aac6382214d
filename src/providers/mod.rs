// Providers layer - work performers and business logic
//
// Providers hold the reusable logic (token handling, hashing, rate
// resolution, discount math, access checks) that coordinators compose.

pub mod access_guard;
pub mod auth_guard;
pub mod crypto_provider;
pub mod discount_calculator;
pub mod rate_resolver;
pub mod token_provider;

pub use auth_guard::AuthGuard;
pub use crypto_provider::CryptoProvider;
pub use rate_resolver::RateResolver;
pub use token_provider::{IssuedToken, TokenProvider};
