//! Cloudmock Configuration System
//!
//! TOML-based configuration with environment variable override support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub directory: DirectorySettings,
    pub fixtures: FixtureSettings,
}

/// How the directory numbers new records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdAssignmentSetting {
    /// `len + 1` of the collection at creation time
    #[default]
    CollectionLength,
    /// Per-collection counter that never goes backwards
    Monotonic,
}

impl std::str::FromStr for IdAssignmentSetting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collection_length" | "collection-length" => Ok(Self::CollectionLength),
            "monotonic" => Ok(Self::Monotonic),
            other => Err(ConfigError::ValidationError(format!(
                "unknown id_assignment '{}', expected collection_length or monotonic",
                other
            ))),
        }
    }
}

/// Resource directory configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorySettings {
    pub id_assignment: IdAssignmentSetting,
    /// Prefix prepended to a service account name to form its login
    pub login_prefix: String,
    /// Credential returned for every access policy token
    pub policy_token_placeholder: String,
    /// Upper bound (exclusive) of the random suffix on generated credentials
    pub credential_suffix_max: u32,
    /// Seed for the directory's random source; entropy when unset
    pub seed: Option<u64>,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            id_assignment: IdAssignmentSetting::CollectionLength,
            login_prefix: "sa-".to_string(),
            policy_token_placeholder: "MockToken".to_string(),
            credential_suffix_max: 99_999,
            seed: None,
        }
    }
}

/// Fixture volumes used when seeding a directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureSettings {
    pub service_accounts: usize,
    pub tokens_per_service_account: usize,
    pub cloud_api_keys: usize,
    pub access_policies: usize,
    pub tokens_per_access_policy: usize,
    pub key_prefix: String,
    pub policy_prefix: String,
    pub region: String,
}

impl Default for FixtureSettings {
    fn default() -> Self {
        Self {
            service_accounts: 3,
            tokens_per_service_account: 2,
            cloud_api_keys: 3,
            access_policies: 2,
            tokens_per_access_policy: 2,
            key_prefix: "key".to_string(),
            policy_prefix: "policy".to_string(),
            region: "us".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with environment variable override
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load()
    }

    /// Reject settings the directory cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directory.credential_suffix_max == 0 {
            return Err(ConfigError::ValidationError(
                "directory.credential_suffix_max must be greater than zero".to_string(),
            ));
        }
        if self.fixtures.region.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "fixtures.region must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# Cloudmock Configuration
# Environment variables (CLOUDMOCK_*) override these settings

[directory]
id_assignment = "collection_length"  # collection_length or monotonic
login_prefix = "sa-"
policy_token_placeholder = "MockToken"
credential_suffix_max = 99999
# seed = 42

[fixtures]
service_accounts = 3
tokens_per_service_account = 2
cloud_api_keys = 3
access_policies = 2
tokens_per_access_policy = 2
key_prefix = "key"
policy_prefix = "policy"
region = "us"
"#
        .to_string()
    }
}
