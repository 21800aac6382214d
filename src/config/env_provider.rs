use std::env::VarError;

/// Source of raw configuration values
///
/// Settings and secrets are read through this so tests can supply their own
/// values instead of mutating the process environment.
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Reads the process environment
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                tracing::warn!("Ignoring {}: value is not valid UTF-8", key);
                None
            }
        }
    }
}

#[cfg(test)]
pub use mock::MockEnvironment;
