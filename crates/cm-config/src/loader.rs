//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "cloudmock.toml",
    "config.toml",
    "./config/cloudmock.toml",
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        self.load_with(|key| env::var(key).ok())
    }

    /// Same as [`load`](Self::load) but reads overrides through `lookup`.
    pub fn load_with<F>(&self, lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = self.find_config_file(&lookup) {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        apply_overrides(&mut config, &lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file<F>(&self, lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
            warn!(?path, "Configured file does not exist, falling back to search paths");
        }

        if let Some(path) = lookup("CLOUDMOCK_CONFIG").map(PathBuf::from) {
            if path.exists() {
                return Some(path);
            }
        }

        CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `CLOUDMOCK_*` overrides on top of file/default values
fn apply_overrides<F>(config: &mut AppConfig, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Directory
    if let Some(val) = lookup("CLOUDMOCK_ID_ASSIGNMENT") {
        config.directory.id_assignment = val.parse()?;
    }
    if let Some(val) = lookup("CLOUDMOCK_LOGIN_PREFIX") {
        config.directory.login_prefix = val;
    }
    if let Some(val) = lookup("CLOUDMOCK_POLICY_TOKEN_PLACEHOLDER") {
        config.directory.policy_token_placeholder = val;
    }
    if let Some(val) = lookup("CLOUDMOCK_CREDENTIAL_SUFFIX_MAX") {
        config.directory.credential_suffix_max = parse_number("CLOUDMOCK_CREDENTIAL_SUFFIX_MAX", &val)?;
    }
    if let Some(val) = lookup("CLOUDMOCK_SEED") {
        config.directory.seed = Some(parse_number("CLOUDMOCK_SEED", &val)?);
    }

    // Fixtures
    if let Some(val) = lookup("CLOUDMOCK_FIXTURE_SERVICE_ACCOUNTS") {
        config.fixtures.service_accounts = parse_number("CLOUDMOCK_FIXTURE_SERVICE_ACCOUNTS", &val)?;
    }
    if let Some(val) = lookup("CLOUDMOCK_FIXTURE_TOKENS_PER_SERVICE_ACCOUNT") {
        config.fixtures.tokens_per_service_account =
            parse_number("CLOUDMOCK_FIXTURE_TOKENS_PER_SERVICE_ACCOUNT", &val)?;
    }
    if let Some(val) = lookup("CLOUDMOCK_FIXTURE_CLOUD_API_KEYS") {
        config.fixtures.cloud_api_keys = parse_number("CLOUDMOCK_FIXTURE_CLOUD_API_KEYS", &val)?;
    }
    if let Some(val) = lookup("CLOUDMOCK_FIXTURE_ACCESS_POLICIES") {
        config.fixtures.access_policies = parse_number("CLOUDMOCK_FIXTURE_ACCESS_POLICIES", &val)?;
    }
    if let Some(val) = lookup("CLOUDMOCK_FIXTURE_TOKENS_PER_ACCESS_POLICY") {
        config.fixtures.tokens_per_access_policy =
            parse_number("CLOUDMOCK_FIXTURE_TOKENS_PER_ACCESS_POLICY", &val)?;
    }
    if let Some(val) = lookup("CLOUDMOCK_FIXTURE_KEY_PREFIX") {
        config.fixtures.key_prefix = val;
    }
    if let Some(val) = lookup("CLOUDMOCK_FIXTURE_POLICY_PREFIX") {
        config.fixtures.policy_prefix = val;
    }
    if let Some(val) = lookup("CLOUDMOCK_FIXTURE_REGION") {
        config.fixtures.region = val;
    }

    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("{} must be a number, got '{}'", key, value)))
}
