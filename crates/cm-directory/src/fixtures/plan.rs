//! Seeding a directory with a fixed volume of random records.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{random_realm, random_scope, random_string};
use crate::access_policy::entity::{CreateCloudAccessPolicyInput, CreateCloudAccessPolicyTokenInput};
use crate::directory::Directory;
use crate::shared::error::Result;

/// How many records of each kind to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixturePlan {
    pub service_accounts: usize,
    pub tokens_per_service_account: usize,
    pub cloud_api_keys: usize,
    pub access_policies: usize,
    pub tokens_per_access_policy: usize,
    pub key_prefix: String,
    pub policy_prefix: String,
    /// Region passed to the access policy operations
    pub region: String,
}

impl Default for FixturePlan {
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

/// Records created by [`FixturePlan::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureReport {
    pub service_accounts: usize,
    pub service_account_tokens: usize,
    pub cloud_api_keys: usize,
    pub access_policies: usize,
    pub access_policy_tokens: usize,
}

impl FixturePlan {
    /// Create everything the plan asks for. Stops at the first failed
    /// operation; records created before it stay in the directory.
    pub fn apply(&self, directory: &mut Directory) -> Result<FixtureReport> {
        let mut report = FixtureReport::default();

        for account in directory.generate_service_accounts(self.service_accounts)? {
            report.service_accounts += 1;
            report.service_account_tokens += directory
                .generate_service_account_tokens(account.id, self.tokens_per_service_account)?
                .len();
        }

        report.cloud_api_keys = directory
            .generate_cloud_api_keys(self.cloud_api_keys, &self.key_prefix, "")?
            .len();

        for _ in 0..self.access_policies {
            let input = self.random_policy_input(directory);
            let policy = directory.create_cloud_access_policy(&self.region, input)?;
            report.access_policies += 1;

            for _ in 0..self.tokens_per_access_policy {
                let name = random_string(&mut directory.rng, directory.access_policy_tokens.len() + 1);
                directory.create_cloud_access_policy_token(
                    &self.region,
                    CreateCloudAccessPolicyTokenInput::new(policy.id.as_str(), name),
                )?;
                report.access_policy_tokens += 1;
            }
        }

        info!(?report, region = %self.region, "Applied fixture plan");
        Ok(report)
    }

    fn random_policy_input(&self, directory: &mut Directory) -> CreateCloudAccessPolicyInput {
        let suffix = random_string(&mut directory.rng, directory.access_policies.len() + 1);
        let name = if self.policy_prefix.is_empty() {
            suffix
        } else {
            format!("{}-{}", self.policy_prefix, suffix)
        };
        CreateCloudAccessPolicyInput::new(
            name,
            vec![random_scope(&mut directory.rng)],
            vec![random_realm(&mut directory.rng)],
        )
    }
}
