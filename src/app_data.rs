use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{BootstrapSettings, EnvironmentProvider, SecretManager};
use crate::errors::InternalError;
use crate::providers::{AuthGuard, CryptoProvider, RateResolver, TokenProvider};
use crate::stores::{AccountStore, DiscountSettingsStore, LabStore};

/// Centralized application data following the main-owned stores pattern
///
/// Everything is created once at startup and shared with coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ├─ db (DatabaseConnection)
///   ├─ secret_manager
///   ├─ account_store / lab_store / discount_settings_store
///   └─ crypto_provider / token_provider / auth_guard / rate_resolver
///   ↓ wrapped in Arc<AppData>
///   ├─ AuthCoordinator::new(app_data)
///   ├─ DiscountCoordinator::new(app_data)
///   └─ LabCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    pub settings: Arc<BootstrapSettings>,
    pub secret_manager: Arc<SecretManager>,

    pub account_store: Arc<AccountStore>,
    pub lab_store: Arc<LabStore>,
    pub discount_settings_store: Arc<DiscountSettingsStore>,

    pub crypto_provider: Arc<CryptoProvider>,
    pub token_provider: Arc<TokenProvider>,
    pub auth_guard: Arc<AuthGuard>,
    pub rate_resolver: Arc<RateResolver>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when secrets are missing or invalid
    pub async fn init(
        db: DatabaseConnection,
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
        settings: BootstrapSettings,
    ) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        let secret_manager = Arc::new(
            SecretManager::from_env_provider(env_provider.clone())
                .map_err(|e| InternalError::parse("secret_manager", format!("Secret manager init failed: {}", e)))?,
        );
        tracing::debug!("Secret manager initialized: {}", secret_manager);

        let account_store = Arc::new(AccountStore::new());
        let lab_store = Arc::new(LabStore::new());
        let discount_settings_store = Arc::new(DiscountSettingsStore::new());

        let crypto_provider = Arc::new(CryptoProvider::new(secret_manager.clone()));
        let token_provider = Arc::new(TokenProvider::new(
            secret_manager.clone(),
            settings.token_ttl_hours(),
        ));
        let auth_guard = Arc::new(AuthGuard::new(token_provider.clone(), account_store.clone()));
        let rate_resolver = Arc::new(RateResolver::new(
            lab_store.clone(),
            discount_settings_store.clone(),
        ));

        tracing::info!("AppData initialization complete");

        Ok(Self {
            db,
            env_provider,
            settings: Arc::new(settings),
            secret_manager,
            account_store,
            lab_store,
            discount_settings_store,
            crypto_provider,
            token_provider,
            auth_guard,
            rate_resolver,
        })
    }
}
