use std::sync::Arc;

use crate::config::EnvironmentProvider;
use crate::config::errors::ConfigError;

/// Where a loaded value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
}

#[derive(Debug, Clone)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

/// Declarative description of one setting: environment override, then default
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    env_override: Option<String>,
    default_value: Option<String>,
    min_length: Option<usize>,
    validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            min_length: None,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    fn setting_name(&self) -> &str {
        self.env_override.as_deref().unwrap_or("unknown_setting")
    }

    /// Load the value, preferring the environment over the default
    pub fn load(&self) -> Result<ConfigValue, ConfigError> {
        if let Some(name) = &self.env_override {
            if let Some(value) = self.env_provider.get_var(name) {
                self.validate_value(&value)?;
                return Ok(ConfigValue {
                    value,
                    source: ConfigValueSource::EnvironmentVariable { name: name.clone() },
                });
            }
        }

        match &self.default_value {
            Some(default) => {
                self.validate_value(default)?;
                Ok(ConfigValue {
                    value: default.clone(),
                    source: ConfigValueSource::Default,
                })
            }
            None => Err(ConfigError::invalid(
                self.setting_name(),
                "Required setting has no value from any source",
            )),
        }
    }

    fn validate_value(&self, value: &str) -> Result<(), ConfigError> {
        if let Some(min) = self.min_length {
            if value.len() < min {
                return Err(ConfigError::invalid(
                    self.setting_name(),
                    format!("Value must be at least {} characters long", min),
                ));
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| ConfigError::invalid(self.setting_name(), reason))?;
        }

        Ok(())
    }

    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, ConfigError> {
        value.parse::<u16>().map_err(|e| ConfigError::ParseError {
            setting_name: setting_name.to_string(),
            error: e.to_string(),
        })
    }

    pub fn parse_integer(value: &str, setting_name: &str) -> Result<i64, ConfigError> {
        value.parse::<i64>().map_err(|e| ConfigError::ParseError {
            setting_name: setting_name.to_string(),
            error: e.to_string(),
        })
    }

    pub fn validate_integer_range(value: &str, min: i64, max: i64) -> Result<(), String> {
        let parsed = value
            .parse::<i64>()
            .map_err(|_| format!("Expected integer between {} and {}, got '{}'", min, max, value))?;

        if parsed < min || parsed > max {
            return Err(format!(
                "Value {} is outside valid range {}-{}",
                parsed, min, max
            ));
        }
        Ok(())
    }

    pub fn validate_host_address(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Host address cannot be empty".to_string());
        }
        if value.contains(char::is_whitespace) {
            return Err(format!("Host address '{}' contains whitespace", value));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    #[test]
    fn test_env_value_wins_over_default() {
        let env = Arc::new(MockEnvironment::empty().with_var("HOST", "127.0.0.1"));
        let loaded = ConfigSpec::new(env)
            .env_override("HOST")
            .default_value("0.0.0.0")
            .load()
            .unwrap();

        assert_eq!(loaded.value, "127.0.0.1");
        assert_eq!(
            loaded.source,
            ConfigValueSource::EnvironmentVariable {
                name: "HOST".to_string()
            }
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        let env = Arc::new(MockEnvironment::empty());
        let loaded = ConfigSpec::new(env)
            .env_override("HOST")
            .default_value("0.0.0.0")
            .load()
            .unwrap();

        assert_eq!(loaded.value, "0.0.0.0");
        assert_eq!(loaded.source, ConfigValueSource::Default);
    }

    #[test]
    fn test_missing_without_default_fails() {
        let env = Arc::new(MockEnvironment::empty());
        let result = ConfigSpec::new(env).env_override("SOMETHING").load();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidSetting { ref setting_name, .. }) if setting_name == "SOMETHING"
        ));
    }

    #[test]
    fn test_integer_range_validator() {
        assert!(ConfigSpec::validate_integer_range("24", 1, 720).is_ok());
        assert!(ConfigSpec::validate_integer_range("0", 1, 720).unwrap_err().contains("outside valid range"));
        assert!(ConfigSpec::validate_integer_range("abc", 1, 720).is_err());
    }
}
