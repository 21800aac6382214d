// Bootstrap command implementation
// Creates the first super admin during system setup

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::types::internal::{Account, AccountType, RequestContext, Role};

/// Create a super admin with a generated password
///
/// The password is printed once and must be changed on first login.
///
/// # Returns
/// * `Ok(Account)` - The created account
/// * `Err(InternalError)` - `DuplicateEmail` if an admin with that email exists
pub async fn bootstrap_super_admin(app_data: &AppData, email: &str) -> Result<Account, InternalError> {
    let ctx = RequestContext::for_cli("bootstrap");
    println!("\n=== Healthcard Bootstrap ===\n");

    let password = app_data.crypto_provider.generate_secure_password();
    let password_hash = app_data.crypto_provider.hash_password(&password).await?;

    let account = Account::new(AccountType::Admin, email, password_hash, Role::SuperAdmin, None)
        .with_must_change_password(true);
    app_data.account_store.insert_account(&app_data.db, &account).await?;

    tracing::info!(request_id = %ctx.request_id, account_id = %account.id, "Super admin bootstrapped");

    println!("Super admin created");
    println!("  Email:    {}", account.email);
    println!("  Password: {}", password);
    println!("\nThis password is shown only once and must be changed on first login.");

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_app_data;

    #[tokio::test]
    async fn test_bootstrap_creates_flagged_super_admin() {
        let app_data = setup_test_app_data().await;

        let account = bootstrap_super_admin(&app_data, "root@example.com").await.unwrap();
        assert_eq!(account.role, Role::SuperAdmin);
        assert!(account.must_change_password);

        let stored = app_data
            .account_store
            .find_by_email(&app_data.db, AccountType::Admin, "root@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.must_change_password);
        assert!(stored.is_active);
    }

    #[tokio::test]
    async fn test_bootstrap_twice_with_same_email_fails() {
        let app_data = setup_test_app_data().await;

        bootstrap_super_admin(&app_data, "root@example.com").await.unwrap();
        let result = bootstrap_super_admin(&app_data, "root@example.com").await;

        assert!(result.is_err());
    }
}
