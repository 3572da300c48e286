//! The Resource Directory
//!
//! Owns the five collections and the random source used for credentials and
//! fixtures. Operations live next to their aggregates (`service_account`,
//! `cloud_api_key`, `access_policy`, `fixtures`) as `impl Directory` blocks.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::access_policy::entity::{CloudAccessPolicy, CloudAccessPolicyToken};
use crate::cloud_api_key::entity::CloudApiKey;
use crate::service_account::entity::{ServiceAccount, ServiceAccountToken};
use crate::shared::error::{DirectoryError, Result};
use crate::shared::ids::{IdAssignment, Sequences};

pub const DEFAULT_LOGIN_PREFIX: &str = "sa-";
pub const DEFAULT_POLICY_TOKEN: &str = "MockToken";
pub const DEFAULT_CREDENTIAL_SUFFIX_MAX: u32 = 99_999;

/// Construction-time settings of a [`Directory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryOptions {
    pub id_assignment: IdAssignment,
    pub login_prefix: String,
    pub policy_token_placeholder: String,
    /// Exclusive upper bound of the random credential suffix (at least 1)
    pub credential_suffix_max: u32,
    pub seed: Option<u64>,
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            id_assignment: IdAssignment::CollectionLength,
            login_prefix: DEFAULT_LOGIN_PREFIX.to_string(),
            policy_token_placeholder: DEFAULT_POLICY_TOKEN.to_string(),
            credential_suffix_max: DEFAULT_CREDENTIAL_SUFFIX_MAX,
            seed: None,
        }
    }
}

impl DirectoryOptions {
    pub fn with_id_assignment(mut self, id_assignment: IdAssignment) -> Self {
        self.id_assignment = id_assignment;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_login_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.login_prefix = prefix.into();
        self
    }

    pub fn with_policy_token_placeholder(mut self, token: impl Into<String>) -> Self {
        self.policy_token_placeholder = token.into();
        self
    }
}

/// A directory guarded by one lock, for harnesses that share an instance
/// across threads.
pub type SharedDirectory = Arc<Mutex<Directory>>;

/// In-memory stand-in for the administrative API.
///
/// Not internally synchronised: every mutating operation takes `&mut self`.
pub struct Directory {
    pub(crate) options: DirectoryOptions,
    pub(crate) rng: StdRng,
    pub(crate) sequences: Sequences,
    pub(crate) service_accounts: Vec<ServiceAccount>,
    pub(crate) service_account_tokens: Vec<ServiceAccountToken>,
    pub(crate) cloud_api_keys: Vec<CloudApiKey>,
    pub(crate) access_policies: Vec<CloudAccessPolicy>,
    pub(crate) access_policy_tokens: Vec<CloudAccessPolicyToken>,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory")
            .field("options", &self.options)
            .field("service_accounts", &self.service_accounts.len())
            .field("service_account_tokens", &self.service_account_tokens.len())
            .field("cloud_api_keys", &self.cloud_api_keys.len())
            .field("access_policies", &self.access_policies.len())
            .field("access_policy_tokens", &self.access_policy_tokens.len())
            .finish()
    }
}

impl Directory {
    /// Empty directory with default options and an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_options(DirectoryOptions::default())
    }

    pub fn with_options(options: DirectoryOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(options, rng)
    }

    /// Empty directory drawing all randomness from `rng`.
    pub fn with_rng(mut options: DirectoryOptions, rng: StdRng) -> Self {
        options.credential_suffix_max = options.credential_suffix_max.max(1);
        debug!(?options, "Creating resource directory");
        Self {
            options,
            rng,
            sequences: Sequences::default(),
            service_accounts: Vec::new(),
            service_account_tokens: Vec::new(),
            cloud_api_keys: Vec::new(),
            access_policies: Vec::new(),
            access_policy_tokens: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedDirectory {
        Arc::new(Mutex::new(self))
    }

    pub fn options(&self) -> &DirectoryOptions {
        &self.options
    }

    /// Accepted for parity with the real client; there is nothing to set up.
    pub fn initialize(&mut self, org: &str) -> Result<()> {
        debug!(org, "Initialize is a no-op for the in-memory directory");
        Ok(())
    }

    /// Every service account token, including ones whose account is gone.
    pub fn all_service_account_tokens(&self) -> &[ServiceAccountToken] {
        &self.service_account_tokens
    }

    /// Every access policy token across all policies.
    pub fn all_cloud_access_policy_tokens(&self) -> &[CloudAccessPolicyToken] {
        &self.access_policy_tokens
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        DirectorySnapshot {
            service_accounts: self.service_accounts.clone(),
            service_account_tokens: self.service_account_tokens.clone(),
            cloud_api_keys: self.cloud_api_keys.clone(),
            cloud_access_policies: self.access_policies.clone(),
            cloud_access_policy_tokens: self.access_policy_tokens.clone(),
        }
    }

    /// `<name>-<n>` with a random `n` below the configured bound.
    pub(crate) fn random_credential(&mut self, name: &str) -> String {
        let suffix = self.rng.gen_range(0..self.options.credential_suffix_max);
        format!("{}-{}", name, suffix)
    }

    pub(crate) fn require_region(region: &str) -> Result<()> {
        if region.is_empty() {
            debug!("Rejected access policy call without region");
            return Err(DirectoryError::RegionRequired);
        }
        Ok(())
    }
}

/// Copy of all collections, in collection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySnapshot {
    pub service_accounts: Vec<ServiceAccount>,
    pub service_account_tokens: Vec<ServiceAccountToken>,
    pub cloud_api_keys: Vec<CloudApiKey>,
    pub cloud_access_policies: Vec<CloudAccessPolicy>,
    pub cloud_access_policy_tokens: Vec<CloudAccessPolicyToken>,
}

impl DirectorySnapshot {
    pub fn total_records(&self) -> usize {
        self.service_accounts.len()
            + self.service_account_tokens.len()
            + self.cloud_api_keys.len()
            + self.cloud_access_policies.len()
            + self.cloud_access_policy_tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_directory_is_empty() {
        let directory = Directory::new();
        let snapshot = directory.snapshot();
        assert_eq!(snapshot.total_records(), 0);
        assert_eq!(directory.options().login_prefix, "sa-");
    }

    #[test]
    fn test_initialize_always_succeeds() {
        let mut directory = Directory::new();
        assert!(directory.initialize("").is_ok());
        assert!(directory.initialize("my-org").is_ok());
    }

    #[test]
    fn test_zero_suffix_bound_is_clamped() {
        let options = DirectoryOptions {
            credential_suffix_max: 0,
            ..DirectoryOptions::default()
        };
        let mut directory = Directory::with_options(options);
        assert_eq!(directory.random_credential("key"), "key-0");
    }

    #[test]
    fn test_seeded_directories_draw_the_same_credentials() {
        let mut a = Directory::with_options(DirectoryOptions::default().with_seed(11));
        let mut b = Directory::with_options(DirectoryOptions::default().with_seed(11));
        assert_eq!(a.random_credential("x"), b.random_credential("x"));
        assert_eq!(a.random_credential("y"), b.random_credential("y"));
    }

    #[test]
    fn test_require_region() {
        assert_eq!(Directory::require_region(""), Err(DirectoryError::RegionRequired));
        assert!(Directory::require_region("us").is_ok());
    }
}
