//! Directory-backed generators.
//!
//! Empty `name`/`role` arguments are replaced with random values. Batch
//! variants stop at the first failure and return it.

use tracing::debug;

use super::{random_realm, random_role, random_scope, random_string};
use crate::access_policy::entity::{
    CloudAccessPolicy, CloudAccessPolicyToken, CreateCloudAccessPolicyInput,
    CreateCloudAccessPolicyTokenInput,
};
use crate::cloud_api_key::entity::{CloudApiKey, CreateCloudApiKeyInput};
use crate::directory::Directory;
use crate::service_account::entity::{
    CreateServiceAccountRequest, CreateServiceAccountTokenRequest,
    CreateServiceAccountTokenResponse, ServiceAccount,
};
use crate::shared::error::Result;

impl Directory {
    pub fn generate_service_account(&mut self, name: &str, role: &str) -> Result<ServiceAccount> {
        let name = self.name_or_random(name, self.service_accounts.len() + 1);
        let role = self.role_or_random(role);
        self.create_service_account(CreateServiceAccountRequest::new(name, role))
    }

    pub fn generate_service_accounts(&mut self, count: usize) -> Result<Vec<ServiceAccount>> {
        (0..count).map(|_| self.generate_service_account("", "")).collect()
    }

    pub fn generate_service_account_token(
        &mut self,
        name: &str,
        service_account_id: i64,
    ) -> Result<CreateServiceAccountTokenResponse> {
        let name = self.name_or_random(name, self.service_account_tokens.len() + 1);
        self.create_service_account_token(CreateServiceAccountTokenRequest::new(name, service_account_id))
    }

    pub fn generate_service_account_tokens(
        &mut self,
        service_account_id: i64,
        count: usize,
    ) -> Result<Vec<CreateServiceAccountTokenResponse>> {
        (0..count)
            .map(|_| self.generate_service_account_token("", service_account_id))
            .collect()
    }

    pub fn generate_cloud_api_key(&mut self, name: &str, role: &str) -> Result<CloudApiKey> {
        let name = self.name_or_random(name, self.cloud_api_keys.len() + 1);
        let role = self.role_or_random(role);
        self.create_cloud_api_key("", CreateCloudApiKeyInput::new(name, role))
    }

    /// With a non-empty `prefix` names are `<prefix>-<random>`.
    pub fn generate_cloud_api_keys(&mut self, count: usize, prefix: &str, role: &str) -> Result<Vec<CloudApiKey>> {
        (0..count)
            .map(|_| {
                let name = self.prefixed_name(prefix, self.cloud_api_keys.len() + 1);
                self.generate_cloud_api_key(&name, role)
            })
            .collect()
    }

    /// Policy with one random scope and one random realm. No region applies.
    pub fn generate_cloud_access_policy(&mut self, name: &str) -> Result<CloudAccessPolicy> {
        let name = self.name_or_random(name, self.access_policies.len() + 1);
        let input = CreateCloudAccessPolicyInput::new(
            name,
            vec![random_scope(&mut self.rng)],
            vec![random_realm(&mut self.rng)],
        );
        let policy = self.insert_access_policy(input)?;
        debug!(policy_id = %policy.id, name = %policy.name, "Generated cloud access policy");
        Ok(policy)
    }

    pub fn generate_cloud_access_policies(&mut self, count: usize, prefix: &str) -> Result<Vec<CloudAccessPolicy>> {
        (0..count)
            .map(|_| {
                let name = self.prefixed_name(prefix, self.access_policies.len() + 1);
                self.generate_cloud_access_policy(&name)
            })
            .collect()
    }

    /// Token under an existing policy. No region applies.
    pub fn generate_cloud_access_policy_token(
        &mut self,
        name: &str,
        access_policy_id: &str,
    ) -> Result<CloudAccessPolicyToken> {
        let name = self.name_or_random(name, self.access_policy_tokens.len() + 1);
        let token = self.insert_access_policy_token(CreateCloudAccessPolicyTokenInput::new(access_policy_id, name))?;
        debug!(token_id = %token.id, policy_id = access_policy_id, "Generated cloud access policy token");
        Ok(token)
    }

    pub fn generate_cloud_access_policy_tokens(
        &mut self,
        count: usize,
        prefix: &str,
        access_policy_id: &str,
    ) -> Result<Vec<CloudAccessPolicyToken>> {
        (0..count)
            .map(|_| {
                let name = self.prefixed_name(prefix, self.access_policy_tokens.len() + 1);
                self.generate_cloud_access_policy_token(&name, access_policy_id)
            })
            .collect()
    }

    fn name_or_random(&mut self, name: &str, counter: usize) -> String {
        if name.is_empty() {
            random_string(&mut self.rng, counter)
        } else {
            name.to_string()
        }
    }

    fn role_or_random(&mut self, role: &str) -> String {
        if role.is_empty() {
            random_role(&mut self.rng).to_string()
        } else {
            role.to_string()
        }
    }

    /// Empty when `prefix` is empty, so the single-item generator picks a
    /// fully random name.
    fn prefixed_name(&mut self, prefix: &str, counter: usize) -> String {
        if prefix.is_empty() {
            String::new()
        } else {
            format!("{}-{}", prefix, random_string(&mut self.rng, counter))
        }
    }
}
