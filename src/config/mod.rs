mod bootstrap_settings;
mod config_spec;
mod database;
mod env_provider;
mod errors;
mod logging;
mod secret_config;
mod secret_manager;

pub use bootstrap_settings::{BootstrapSettings, DEFAULT_TOKEN_TTL_HOURS};
pub use config_spec::{ConfigSpec, ConfigValue, ConfigValueSource};
pub use database::{init_database, migrate_database};
#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
pub use errors::{ConfigError, SecretError};
pub use logging::{LoggingConfig, LoggingError, init_logging};
pub use secret_config::SecretKind;
pub use secret_manager::SecretManager;
