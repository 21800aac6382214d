use std::fmt;
use std::sync::Arc;

use crate::config::EnvironmentProvider;
use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ConfigError;

/// Token lifetime when TOKEN_TTL_HOURS is unset
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Infrastructure settings read once at startup
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    token_ttl_hours: i64,
}

impl BootstrapSettings {
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ConfigError> {
        let database_url = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value("sqlite://healthcard.db?mode=rwc")
            .min_length(1)
            .load()?
            .value;

        let server_host = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address)
            .load()?
            .value;

        let port_value = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("3000")
            .validator(|value| ConfigSpec::validate_integer_range(value, 1, 65535))
            .load()?
            .value;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        let ttl_value = ConfigSpec::new(env_provider)
            .env_override("TOKEN_TTL_HOURS")
            .default_value("24")
            .validator(|value| ConfigSpec::validate_integer_range(value, 1, 720))
            .load()?
            .value;
        let token_ttl_hours = ConfigSpec::parse_integer(&ttl_value, "TOKEN_TTL_HOURS")?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            token_ttl_hours,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn token_ttl_hours(&self) -> i64 {
        self.token_ttl_hours
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}
