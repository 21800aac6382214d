// Database entities - SeaORM models
pub mod admin;
pub mod discount_settings;
pub mod lab;
pub mod lab_staff;
pub mod user;

use sea_orm::EntityTrait;

use crate::errors::InternalError;
use crate::types::internal::{Account, AccountType};

/// Shared shape of the three account tables
///
/// Lets `AccountStore` run the same queries against `admins`, `users` and
/// `lab_staff` without repeating them per table.
pub trait AccountEntity: EntityTrait {
    const ACCOUNT_TYPE: AccountType;

    fn id_column() -> Self::Column;
    fn email_column() -> Self::Column;
    fn password_hash_column() -> Self::Column;
    fn is_active_column() -> Self::Column;
    fn must_change_password_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;

    fn to_account(model: Self::Model) -> Result<Account, InternalError>;
    fn active_model_for(account: &Account) -> Self::ActiveModel;
}
