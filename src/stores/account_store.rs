use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::db::{AccountEntity, admin, lab_staff, user};
use crate::types::internal::{Account, AccountType};

/// Data access for the three account tables
///
/// Every operation takes the `AccountType` that selects the table; the
/// queries themselves are shared through `AccountEntity`.
pub struct AccountStore {}

impl AccountStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        account_type: AccountType,
        id: &str,
    ) -> Result<Option<Account>, InternalError> {
        match account_type {
            AccountType::Admin => find_by_id_in::<admin::Entity>(conn, id).await,
            AccountType::User => find_by_id_in::<user::Entity>(conn, id).await,
            AccountType::LabStaff => find_by_id_in::<lab_staff::Entity>(conn, id).await,
        }
    }

    pub async fn find_by_email(
        &self,
        conn: &impl ConnectionTrait,
        account_type: AccountType,
        email: &str,
    ) -> Result<Option<Account>, InternalError> {
        match account_type {
            AccountType::Admin => find_by_email_in::<admin::Entity>(conn, email).await,
            AccountType::User => find_by_email_in::<user::Entity>(conn, email).await,
            AccountType::LabStaff => find_by_email_in::<lab_staff::Entity>(conn, email).await,
        }
    }

    /// Load an account that must exist and be active
    ///
    /// # Returns
    /// * `Ok(Account)` - The active account
    /// * `Err(InternalError)` - `AccountInactive` when missing or deactivated
    pub async fn find_active(
        &self,
        conn: &impl ConnectionTrait,
        account_type: AccountType,
        id: &str,
    ) -> Result<Account, InternalError> {
        match self.find_by_id(conn, account_type, id).await? {
            Some(account) if account.is_active => Ok(account),
            _ => Err(CredentialError::AccountInactive {
                account_id: id.to_string(),
            }
            .into()),
        }
    }

    /// Insert a new account into the table selected by `account.account_type`
    ///
    /// # Returns
    /// * `Err(InternalError)` - `DuplicateEmail` if the email is taken in that table
    pub async fn insert_account(
        &self,
        conn: &impl ConnectionTrait,
        account: &Account,
    ) -> Result<(), InternalError> {
        if self
            .find_by_email(conn, account.account_type, &account.email)
            .await?
            .is_some()
        {
            return Err(CredentialError::DuplicateEmail(account.email.clone()).into());
        }

        match account.account_type {
            AccountType::Admin => insert_in::<admin::Entity>(conn, account).await,
            AccountType::User => insert_in::<user::Entity>(conn, account).await,
            AccountType::LabStaff => insert_in::<lab_staff::Entity>(conn, account).await,
        }?;

        tracing::info!(
            account_id = %account.id,
            account_type = %account.account_type,
            role = %account.role,
            "Account created"
        );
        Ok(())
    }

    /// Store a new password hash and clear `must_change_password`
    pub async fn update_password(
        &self,
        conn: &impl ConnectionTrait,
        account_type: AccountType,
        id: &str,
        password_hash: &str,
    ) -> Result<(), InternalError> {
        let rows = match account_type {
            AccountType::Admin => update_password_in::<admin::Entity>(conn, id, password_hash).await,
            AccountType::User => update_password_in::<user::Entity>(conn, id, password_hash).await,
            AccountType::LabStaff => {
                update_password_in::<lab_staff::Entity>(conn, id, password_hash).await
            }
        }?;

        if rows == 0 {
            return Err(CredentialError::AccountNotFound(id.to_string()).into());
        }
        Ok(())
    }

    /// Soft (de)activation; accounts are never deleted
    pub async fn set_active(
        &self,
        conn: &impl ConnectionTrait,
        account_type: AccountType,
        id: &str,
        active: bool,
    ) -> Result<(), InternalError> {
        let rows = match account_type {
            AccountType::Admin => set_active_in::<admin::Entity>(conn, id, active).await,
            AccountType::User => set_active_in::<user::Entity>(conn, id, active).await,
            AccountType::LabStaff => set_active_in::<lab_staff::Entity>(conn, id, active).await,
        }?;

        if rows == 0 {
            return Err(CredentialError::AccountNotFound(id.to_string()).into());
        }

        tracing::info!(account_id = %id, account_type = %account_type, active, "Account activation changed");
        Ok(())
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

async fn find_by_id_in<E: AccountEntity>(
    conn: &impl ConnectionTrait,
    id: &str,
) -> Result<Option<Account>, InternalError> {
    E::find()
        .filter(E::id_column().eq(id))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_account_by_id", e))?
        .map(E::to_account)
        .transpose()
}

async fn find_by_email_in<E: AccountEntity>(
    conn: &impl ConnectionTrait,
    email: &str,
) -> Result<Option<Account>, InternalError> {
    E::find()
        .filter(E::email_column().eq(email))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_account_by_email", e))?
        .map(E::to_account)
        .transpose()
}

async fn insert_in<E: AccountEntity>(
    conn: &impl ConnectionTrait,
    account: &Account,
) -> Result<(), InternalError> {
    E::insert(E::active_model_for(account))
        .exec(conn)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                InternalError::from(CredentialError::DuplicateEmail(account.email.clone()))
            } else {
                InternalError::database("insert_account", e)
            }
        })?;
    Ok(())
}

async fn update_password_in<E: AccountEntity>(
    conn: &impl ConnectionTrait,
    id: &str,
    password_hash: &str,
) -> Result<u64, InternalError> {
    let result = E::update_many()
        .col_expr(E::password_hash_column(), Expr::value(password_hash))
        .col_expr(E::must_change_password_column(), Expr::value(false))
        .col_expr(E::updated_at_column(), Expr::value(Utc::now().timestamp()))
        .filter(E::id_column().eq(id))
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("update_account_password", e))?;
    Ok(result.rows_affected)
}

async fn set_active_in<E: AccountEntity>(
    conn: &impl ConnectionTrait,
    id: &str,
    active: bool,
) -> Result<u64, InternalError> {
    let result = E::update_many()
        .col_expr(E::is_active_column(), Expr::value(active))
        .col_expr(E::updated_at_column(), Expr::value(Utc::now().timestamp()))
        .filter(E::id_column().eq(id))
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("set_account_active", e))?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{seed_lab, setup_test_db};
    use crate::types::internal::Role;

    fn admin(email: &str) -> Account {
        Account::new(AccountType::Admin, email, "hash", Role::SuperAdmin, None)
    }

    #[tokio::test]
    async fn test_insert_and_find_round_trip() {
        let db = setup_test_db().await;
        let store = AccountStore::new();
        let account = admin("root@example.com").with_must_change_password(true);

        store.insert_account(&db, &account).await.unwrap();

        let by_id = store.find_by_id(&db, AccountType::Admin, &account.id).await.unwrap().unwrap();
        let by_email = store
            .find_by_email(&db, AccountType::Admin, "root@example.com")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(by_id, account);
        assert_eq!(by_email.id, account.id);
        assert!(by_id.must_change_password);
    }

    #[tokio::test]
    async fn test_tables_are_isolated_by_account_type() {
        let db = setup_test_db().await;
        let store = AccountStore::new();
        let account = admin("root@example.com");
        store.insert_account(&db, &account).await.unwrap();

        let in_users = store.find_by_id(&db, AccountType::User, &account.id).await.unwrap();
        let in_staff = store
            .find_by_email(&db, AccountType::LabStaff, "root@example.com")
            .await
            .unwrap();

        assert!(in_users.is_none());
        assert!(in_staff.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_per_table() {
        let db = setup_test_db().await;
        let store = AccountStore::new();
        store.insert_account(&db, &admin("dup@example.com")).await.unwrap();

        let result = store.insert_account(&db, &admin("dup@example.com")).await;
        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::DuplicateEmail(_)))
        ));

        // same email in another table is fine
        let portal_user = Account::new(AccountType::User, "dup@example.com", "hash", Role::User, None);
        store.insert_account(&db, &portal_user).await.unwrap();
    }

    #[tokio::test]
    async fn test_lab_staff_keeps_lab_id() {
        let db = setup_test_db().await;
        let lab = seed_lab(&db, "LAB-A", None).await;
        let store = AccountStore::new();
        let staff = Account::new(
            AccountType::LabStaff,
            "desk@example.com",
            "hash",
            Role::Receptionist,
            Some(lab.id.clone()),
        );
        store.insert_account(&db, &staff).await.unwrap();

        let loaded = store.find_by_id(&db, AccountType::LabStaff, &staff.id).await.unwrap().unwrap();
        assert_eq!(loaded.lab_id, Some(lab.id));
        assert_eq!(loaded.role, Role::Receptionist);
    }

    #[tokio::test]
    async fn test_find_active_rejects_missing_and_inactive() {
        let db = setup_test_db().await;
        let store = AccountStore::new();
        let account = admin("root@example.com");
        store.insert_account(&db, &account).await.unwrap();

        assert!(store.find_active(&db, AccountType::Admin, &account.id).await.is_ok());

        store.set_active(&db, AccountType::Admin, &account.id, false).await.unwrap();
        let inactive = store.find_active(&db, AccountType::Admin, &account.id).await;
        assert!(matches!(
            inactive,
            Err(InternalError::Credential(CredentialError::AccountInactive { .. }))
        ));

        let missing = store.find_active(&db, AccountType::Admin, "no-such-id").await;
        assert!(matches!(
            missing,
            Err(InternalError::Credential(CredentialError::AccountInactive { .. }))
        ));
    }

    #[tokio::test]
    async fn test_update_password_clears_flag() {
        let db = setup_test_db().await;
        let store = AccountStore::new();
        let account = admin("root@example.com").with_must_change_password(true);
        store.insert_account(&db, &account).await.unwrap();

        store
            .update_password(&db, AccountType::Admin, &account.id, "new-hash")
            .await
            .unwrap();

        let loaded = store.find_by_id(&db, AccountType::Admin, &account.id).await.unwrap().unwrap();
        assert_eq!(loaded.password_hash, "new-hash");
        assert!(!loaded.must_change_password);
    }

    #[tokio::test]
    async fn test_update_password_unknown_account() {
        let db = setup_test_db().await;
        let result = AccountStore::new()
            .update_password(&db, AccountType::User, "missing", "hash")
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::AccountNotFound(_)))
        ));
    }
}
