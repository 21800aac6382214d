// Stores layer - data access, one store per table group
pub mod account_store;
pub mod discount_settings_store;
pub mod lab_store;

pub use account_store::AccountStore;
pub use discount_settings_store::DiscountSettingsStore;
pub use lab_store::LabStore;
