// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use healthcard_backend::AppData;
use healthcard_backend::api::create_app;
use healthcard_backend::config::{BootstrapSettings, EnvironmentProvider};
use healthcard_backend::types::db::lab;
use healthcard_backend::types::internal::{Account, AccountType, Role};
use migration::{Migrator, MigratorTrait};
use poem::Endpoint;
use poem::test::TestClient;
use rust_decimal::Decimal;
use sea_orm::Database;

pub const TEST_PASSWORD: &str = "integration-password-1";

/// In-memory environment for integration tests
pub struct TestEnvironment {
    vars: HashMap<String, String>,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let vars = [
            ("JWT_SECRET", "integration-secret-key-at-least-32-chars"),
            ("PASSWORD_PEPPER", "integration-pepper-value"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self { vars }
    }
}

impl EnvironmentProvider for TestEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// AppData over a fresh, migrated in-memory database
pub async fn setup_app_data() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    let env = Arc::new(TestEnvironment::new());
    let settings = BootstrapSettings::from_env_provider(env.clone()).expect("Failed to load settings");

    Arc::new(
        AppData::init(db, env, settings)
            .await
            .expect("Failed to initialize AppData"),
    )
}

pub fn client(app_data: Arc<AppData>) -> TestClient<impl Endpoint> {
    TestClient::new(create_app(app_data))
}

pub async fn seed_lab(app_data: &AppData, code: &str, discount_rate: Option<Decimal>) -> lab::Model {
    app_data
        .lab_store
        .insert_lab(&app_data.db, code, &format!("{} Laboratory", code), discount_rate)
        .await
        .expect("Failed to seed lab")
}

/// Insert an account whose password is `TEST_PASSWORD`
pub async fn seed_account(
    app_data: &AppData,
    account_type: AccountType,
    email: &str,
    role: Role,
    lab_id: Option<String>,
    must_change_password: bool,
) -> Account {
    let hash = app_data
        .crypto_provider
        .hash_password(TEST_PASSWORD)
        .await
        .expect("Failed to hash password");

    let account = Account::new(account_type, email, hash, role, lab_id)
        .with_must_change_password(must_change_password);
    app_data
        .account_store
        .insert_account(&app_data.db, &account)
        .await
        .expect("Failed to seed account");

    account
}

/// Bearer header value for a freshly issued token
pub fn bearer(app_data: &AppData, account: &Account) -> String {
    let issued = app_data.token_provider.issue(account).expect("Failed to issue token");
    format!("Bearer {}", issued.token)
}
