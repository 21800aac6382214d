// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use crate::app_data::AppData;
use crate::config::{BootstrapSettings, MockEnvironment, SecretManager};
use crate::stores::LabStore;
use crate::types::db::lab;
use crate::types::internal::{Account, AccountType, RequestContext, Role};

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PASSWORD_PEPPER: &str = "test-pepper-for-unit-tests";

/// Environment with valid secrets and defaults for everything else
pub fn test_env() -> Arc<MockEnvironment> {
    Arc::new(MockEnvironment::empty().with_vars(&[
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("PASSWORD_PEPPER", TEST_PASSWORD_PEPPER),
        ("DATABASE_URL", "sqlite::memory:"),
    ]))
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    Arc::new(SecretManager::from_env_provider(test_env()).expect("Failed to load test secrets"))
}

/// In-memory SQLite database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Full AppData over a fresh in-memory database
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    let env = test_env();
    let settings = BootstrapSettings::from_env_provider(env.clone()).expect("Failed to load test settings");

    Arc::new(
        AppData::init(db, env, settings)
            .await
            .expect("Failed to initialize AppData"),
    )
}

pub async fn seed_lab(db: &DatabaseConnection, code: &str, discount_rate: Option<Decimal>) -> lab::Model {
    LabStore::new()
        .insert_lab(db, code, &format!("{} Laboratory", code), discount_rate)
        .await
        .expect("Failed to seed lab")
}

/// Create an account with a known password
///
/// Returns the stored account and its plaintext password.
pub async fn seed_account(
    app_data: &AppData,
    account_type: AccountType,
    role: Role,
    lab_id: Option<String>,
    must_change_password: bool,
) -> (Account, String) {
    let password = "seed-password-123".to_string();
    let hash = app_data
        .crypto_provider
        .hash_password(&password)
        .await
        .expect("Failed to hash seed password");

    let email = format!("{}-{}@example.com", role, &Uuid::new_v4().to_string()[..8]);
    let account = Account::new(account_type, email, hash, role, lab_id)
        .with_must_change_password(must_change_password);

    app_data
        .account_store
        .insert_account(&app_data.db, &account)
        .await
        .expect("Failed to seed account");

    (account, password)
}

/// Context as the auth guard would build it for `account`
pub fn authenticated_context(app_data: &AppData, account: &Account) -> RequestContext {
    let issued = app_data.token_provider.issue(account).expect("Failed to issue token");
    let claims = app_data
        .token_provider
        .verify(&issued.token)
        .expect("Failed to verify fresh token");

    RequestContext::for_api(None).with_claims(claims)
}
