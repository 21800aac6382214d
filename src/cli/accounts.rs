// Account management commands

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::internal::{Account, AccountType, RequestContext, Role};

/// Reject role/table combinations the portals cannot serve
fn check_account_shape(account_type: AccountType, role: Role, lab_id: Option<&str>) -> Result<(), InternalError> {
    let valid_role = match account_type {
        AccountType::User => role == Role::User,
        AccountType::Admin => role != Role::User,
        AccountType::LabStaff => matches!(role, Role::BranchAdmin | Role::Receptionist),
    };
    if !valid_role {
        return Err(CredentialError::InvalidAccountShape(format!(
            "role '{}' is not allowed for {} accounts",
            role, account_type
        ))
        .into());
    }

    let needs_lab = account_type == AccountType::LabStaff || matches!(role, Role::BranchAdmin | Role::Receptionist);
    if needs_lab && lab_id.is_none() {
        return Err(CredentialError::InvalidAccountShape(format!("role '{}' requires --lab-id", role)).into());
    }

    Ok(())
}

/// Create an account with a generated password, flagged for change on first login
pub async fn create_account(
    app_data: &AppData,
    account_type: AccountType,
    email: &str,
    role: Role,
    lab_id: Option<String>,
) -> Result<Account, InternalError> {
    let ctx = RequestContext::for_cli("create-account");
    check_account_shape(account_type, role, lab_id.as_deref())?;

    if let Some(lab_id) = &lab_id {
        app_data.lab_store.get(&app_data.db, lab_id).await?;
    }

    let password = app_data.crypto_provider.generate_secure_password();
    let password_hash = app_data.crypto_provider.hash_password(&password).await?;

    let account = Account::new(account_type, email, password_hash, role, lab_id).with_must_change_password(true);
    app_data.account_store.insert_account(&app_data.db, &account).await?;

    tracing::info!(request_id = %ctx.request_id, account_id = %account.id, "Account created from CLI");

    println!("Account created");
    println!("  Id:       {}", account.id);
    println!("  Type:     {}", account.account_type);
    println!("  Email:    {}", account.email);
    println!("  Role:     {}", account.role);
    println!("  Password: {}", password);
    println!("\nThis password is shown only once and must be changed on first login.");

    Ok(account)
}

pub async fn deactivate_account(app_data: &AppData, account_type: AccountType, id: &str) -> Result<(), InternalError> {
    let ctx = RequestContext::for_cli("deactivate-account");

    app_data
        .account_store
        .set_active(&app_data.db, account_type, id, false)
        .await?;

    tracing::info!(request_id = %ctx.request_id, account_id = %id, "Account deactivated from CLI");
    println!("Account {} deactivated", id);

    Ok(())
}
