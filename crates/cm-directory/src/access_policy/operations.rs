//! Cloud Access Policy Operations
//!
//! Every public operation checks the region first, before any other
//! validation and before touching state.

use chrono::Utc;
use tracing::{debug, info};

use super::entity::{
    CloudAccessPolicy, CloudAccessPolicyItems, CloudAccessPolicyToken,
    CloudAccessPolicyTokenItems, CreateCloudAccessPolicyInput, CreateCloudAccessPolicyTokenInput,
};
use crate::directory::Directory;
use crate::shared::error::{DirectoryError, Result};

impl Directory {
    /// Create a policy. The first realm with an unknown type aborts the call.
    pub fn create_cloud_access_policy(
        &mut self,
        region: &str,
        input: CreateCloudAccessPolicyInput,
    ) -> Result<CloudAccessPolicy> {
        Self::require_region(region)?;
        let policy = self.insert_access_policy(input)?;
        info!(region, policy_id = %policy.id, name = %policy.name, "Created cloud access policy");
        Ok(policy)
    }

    pub fn cloud_access_policies(&self, region: &str) -> Result<CloudAccessPolicyItems> {
        Self::require_region(region)?;
        Ok(CloudAccessPolicyItems {
            items: self.access_policies.clone(),
        })
    }

    /// Delete a policy and every token issued under it.
    ///
    /// Tokens are removed before the policy is looked up, so a call for an
    /// unknown policy id still drops tokens referencing that id. Only the
    /// first policy carrying `id` is removed; the rest keep their order.
    pub fn delete_cloud_access_policy(&mut self, region: &str, id: &str) -> Result<()> {
        Self::require_region(region)?;

        let tokens_before = self.access_policy_tokens.len();
        self.access_policy_tokens.retain(|token| token.access_policy_id != id);
        let cascaded = tokens_before - self.access_policy_tokens.len();

        let Some(position) = self.access_policies.iter().position(|policy| policy.id == id) else {
            debug!(region, policy_id = id, cascaded, "Cloud access policy to delete not found");
            return Err(DirectoryError::not_found("CloudAccessPolicy", id));
        };
        self.access_policies.remove(position);

        info!(region, policy_id = id, cascaded, "Deleted cloud access policy");
        Ok(())
    }

    /// Issue a token under an existing policy. The credential is the
    /// configured placeholder.
    pub fn create_cloud_access_policy_token(
        &mut self,
        region: &str,
        input: CreateCloudAccessPolicyTokenInput,
    ) -> Result<CloudAccessPolicyToken> {
        Self::require_region(region)?;
        let token = self.insert_access_policy_token(input)?;
        info!(region, token_id = %token.id, policy_id = %token.access_policy_id, "Created cloud access policy token");
        Ok(token)
    }

    /// Tokens of one policy. An empty or unknown policy id lists nothing.
    pub fn cloud_access_policy_tokens(
        &self,
        region: &str,
        access_policy_id: &str,
    ) -> Result<CloudAccessPolicyTokenItems> {
        Self::require_region(region)?;
        Ok(CloudAccessPolicyTokenItems {
            items: self
                .access_policy_tokens
                .iter()
                .filter(|token| token.access_policy_id == access_policy_id)
                .cloned()
                .collect(),
        })
    }

    pub fn cloud_access_policy_token_by_id(&self, region: &str, token_id: &str) -> Result<CloudAccessPolicyToken> {
        Self::require_region(region)?;
        self.access_policy_tokens
            .iter()
            .find(|token| token.id == token_id)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found("CloudAccessPolicyToken", token_id))
    }

    /// Delete by exact id, keeping the order of the remaining tokens.
    pub fn delete_cloud_access_policy_token(&mut self, region: &str, id: &str) -> Result<()> {
        Self::require_region(region)?;

        let before = self.access_policy_tokens.len();
        self.access_policy_tokens.retain(|token| token.id != id);
        if self.access_policy_tokens.len() == before {
            debug!(region, token_id = id, "Cloud access policy token to delete not found");
            return Err(DirectoryError::not_found("CloudAccessPolicyToken", id));
        }

        info!(region, token_id = id, "Deleted cloud access policy token");
        Ok(())
    }

    /// Validate realms and append the policy. Shared with the fixture
    /// generators, which carry no region.
    pub(crate) fn insert_access_policy(&mut self, input: CreateCloudAccessPolicyInput) -> Result<CloudAccessPolicy> {
        for realm in &input.realms {
            if let Err(err) = realm.kind() {
                debug!(realm_type = %realm.realm_type, "Rejected access policy with invalid realm");
                return Err(err);
            }
        }

        let id = self
            .sequences
            .access_policies
            .next(self.options.id_assignment, self.access_policies.len());
        let policy = CloudAccessPolicy {
            id: id.to_string(),
            name: input.name,
            display_name: input.display_name,
            scopes: input.scopes,
            realms: input.realms,
            created_at: Utc::now(),
            updated_at: None,
        };

        self.access_policies.push(policy.clone());
        Ok(policy)
    }

    /// Check the parent policy exists and append the token.
    pub(crate) fn insert_access_policy_token(
        &mut self,
        input: CreateCloudAccessPolicyTokenInput,
    ) -> Result<CloudAccessPolicyToken> {
        if !self.access_policies.iter().any(|policy| policy.id == input.access_policy_id) {
            debug!(policy_id = %input.access_policy_id, "Token requested for unknown access policy");
            return Err(DirectoryError::AccessPolicyNotFound {
                id: input.access_policy_id,
            });
        }

        let id = self
            .sequences
            .access_policy_tokens
            .next(self.options.id_assignment, self.access_policy_tokens.len());
        let token = CloudAccessPolicyToken {
            id: id.to_string(),
            access_policy_id: input.access_policy_id,
            name: input.name,
            display_name: input.display_name,
            expires_at: input.expires_at,
            first_used_at: None,
            created_at: Utc::now(),
            token: self.options.policy_token_placeholder.clone(),
        };

        self.access_policy_tokens.push(token.clone());
        Ok(token)
    }
}
