use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::errors::InternalError;
use crate::types::db::AccountEntity;
use crate::types::internal::{Account, AccountType};

/// Administrator accounts (super admins and branch admins)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub lab_id: Option<String>,
    pub is_active: bool,
    pub must_change_password: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl AccountEntity for Entity {
    const ACCOUNT_TYPE: AccountType = AccountType::Admin;

    fn id_column() -> Column {
        Column::Id
    }

    fn email_column() -> Column {
        Column::Email
    }

    fn password_hash_column() -> Column {
        Column::PasswordHash
    }

    fn is_active_column() -> Column {
        Column::IsActive
    }

    fn must_change_password_column() -> Column {
        Column::MustChangePassword
    }

    fn updated_at_column() -> Column {
        Column::UpdatedAt
    }

    fn to_account(model: Model) -> Result<Account, InternalError> {
        Ok(Account {
            id: model.id,
            account_type: Self::ACCOUNT_TYPE,
            email: model.email,
            password_hash: model.password_hash,
            role: model.role.parse()?,
            lab_id: model.lab_id,
            is_active: model.is_active,
            must_change_password: model.must_change_password,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn active_model_for(account: &Account) -> ActiveModel {
        ActiveModel {
            id: Set(account.id.clone()),
            email: Set(account.email.clone()),
            password_hash: Set(account.password_hash.clone()),
            role: Set(account.role.as_str().to_string()),
            lab_id: Set(account.lab_id.clone()),
            is_active: Set(account.is_active),
            must_change_password: Set(account.must_change_password),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
        }
    }
}
