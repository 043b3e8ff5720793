use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::DomainError;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Directory where downloaded datasets are cached
    pub data_dir: PathBuf,
    pub http_timeout: Duration,
}

impl Config {
    /// Read the configuration from the environment.
    ///
    /// `DATABASE_URL` has no default: a missing or empty value is an error.
    pub fn from_env() -> Result<Self, DomainError> {
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                DomainError::Configuration(
                    "DATABASE_URL environment variable is not set.".to_string(),
                )
            })?;

        Ok(Self {
            database_url,
            data_dir: env::var("DDS_GLOSSARY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            http_timeout: Duration::from_secs(
                env::var("DDS_GLOSSARY_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: every test touching these variables is #[serial]
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("DDS_GLOSSARY_DATA_DIR");
            env::remove_var("DDS_GLOSSARY_HTTP_TIMEOUT_SECS");
        }
    }

    #[test]
    #[serial]
    fn test_missing_database_url_is_an_error() {
        clear_env();

        let result = Config::from_env();
        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }

    #[test]
    #[serial]
    fn test_empty_database_url_is_an_error() {
        clear_env();
        unsafe { env::set_var("DATABASE_URL", "  ") };

        let result = Config::from_env();
        assert!(matches!(result, Err(DomainError::Configuration(_))));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        unsafe { env::set_var("DATABASE_URL", "sqlite::memory:") };

        let config = Config::from_env().unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        unsafe {
            env::set_var("DATABASE_URL", "sqlite://glossary.db?mode=rwc");
            env::set_var("DDS_GLOSSARY_DATA_DIR", "/tmp/glossary");
            env::set_var("DDS_GLOSSARY_HTTP_TIMEOUT_SECS", "5");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/glossary"));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        clear_env();
    }
}
