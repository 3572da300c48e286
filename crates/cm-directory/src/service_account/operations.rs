//! Service Account Operations

use chrono::Utc;
use tracing::{debug, info};

use super::entity::{
    CreateServiceAccountRequest, CreateServiceAccountTokenRequest,
    CreateServiceAccountTokenResponse, ServiceAccount, ServiceAccountToken,
    ServiceAccountTokenSummary,
};
use crate::directory::Directory;
use crate::shared::error::{DirectoryError, Result};

impl Directory {
    /// Create a service account. The name must not belong to a live account.
    pub fn create_service_account(
        &mut self,
        request: CreateServiceAccountRequest,
    ) -> Result<ServiceAccount> {
        if self.service_accounts.iter().any(|sa| sa.name == request.name) {
            debug!(name = %request.name, "Rejected duplicate service account name");
            return Err(DirectoryError::duplicate("ServiceAccount", "name", request.name));
        }

        let id = self
            .sequences
            .service_accounts
            .next(self.options.id_assignment, self.service_accounts.len());
        let account = ServiceAccount {
            id,
            login: format!("{}{}", self.options.login_prefix, request.name),
            name: request.name,
            org_id: 0,
            is_disabled: request.is_disabled,
            role: request.role,
            tokens: 0,
            avatar_url: None,
        };

        info!(service_account_id = id, name = %account.name, role = %account.role, "Created service account");
        self.service_accounts.push(account.clone());
        Ok(account)
    }

    /// All live service accounts in collection order.
    pub fn service_accounts(&self) -> Vec<ServiceAccount> {
        self.service_accounts.clone()
    }

    pub fn service_account(&self, id: i64) -> Option<&ServiceAccount> {
        self.service_accounts.iter().find(|sa| sa.id == id)
    }

    /// Remove an account by swapping the last account into its slot.
    /// Tokens owned by the account are left in place.
    pub fn delete_service_account(&mut self, id: i64) -> Result<()> {
        let Some(position) = self.service_accounts.iter().position(|sa| sa.id == id) else {
            debug!(service_account_id = id, "Service account to delete not found");
            return Err(DirectoryError::not_found("ServiceAccount", id));
        };

        let removed = self.service_accounts.swap_remove(position);
        let orphaned = self
            .service_account_tokens
            .iter()
            .filter(|token| token.service_account_id == id)
            .count();
        info!(service_account_id = id, name = %removed.name, orphaned_tokens = orphaned, "Deleted service account");
        Ok(())
    }

    /// Issue a token for an existing account. Token names are unique across
    /// every account.
    pub fn create_service_account_token(
        &mut self,
        request: CreateServiceAccountTokenRequest,
    ) -> Result<CreateServiceAccountTokenResponse> {
        let account_id = request.service_account_id;
        let Some(owner) = self.service_accounts.iter().position(|sa| sa.id == account_id) else {
            debug!(service_account_id = account_id, "Token requested for unknown service account");
            return Err(DirectoryError::ServiceAccountNotFound { id: account_id });
        };

        if self.service_account_tokens.iter().any(|t| t.name == request.name) {
            debug!(name = %request.name, "Rejected duplicate service account token name");
            return Err(DirectoryError::duplicate("ServiceAccountToken", "name", request.name));
        }

        let id = self
            .sequences
            .service_account_tokens
            .next(self.options.id_assignment, self.service_account_tokens.len());
        let created = Utc::now();
        let token = ServiceAccountToken {
            id,
            key: self.random_credential(&request.name),
            created,
            expiration: request.expiration_from(created),
            service_account_id: account_id,
            seconds_to_live: request.seconds_to_live,
            name: request.name,
        };
        let response = CreateServiceAccountTokenResponse {
            id: token.id,
            name: token.name.clone(),
            key: token.key.clone(),
        };

        self.service_account_tokens.push(token);
        self.service_accounts[owner].tokens += 1;

        info!(service_account_id = account_id, token_id = id, name = %response.name, "Created service account token");
        Ok(response)
    }

    /// Tokens whose owner id matches, whether or not the account still exists.
    pub fn service_account_tokens(&self, service_account_id: i64) -> Vec<ServiceAccountTokenSummary> {
        let now = Utc::now();
        self.service_account_tokens
            .iter()
            .filter(|token| token.service_account_id == service_account_id)
            .map(|token| token.summary(now))
            .collect()
    }

    /// Remove one token of an existing account by swapping the last token
    /// into its slot.
    pub fn delete_service_account_token(&mut self, service_account_id: i64, token_id: i64) -> Result<()> {
        let Some(owner) = self
            .service_accounts
            .iter()
            .position(|sa| sa.id == service_account_id)
        else {
            return Err(DirectoryError::ServiceAccountNotFound { id: service_account_id });
        };

        let Some(position) = self
            .service_account_tokens
            .iter()
            .position(|t| t.service_account_id == service_account_id && t.id == token_id)
        else {
            debug!(service_account_id, token_id, "Service account token to delete not found");
            return Err(DirectoryError::not_found("ServiceAccountToken", token_id));
        };

        self.service_account_tokens.swap_remove(position);
        let account = &mut self.service_accounts[owner];
        account.tokens = (account.tokens - 1).max(0);

        info!(service_account_id, token_id, "Deleted service account token");
        Ok(())
    }
}
