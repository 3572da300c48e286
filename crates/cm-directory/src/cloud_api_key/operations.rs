//! Cloud API Key Operations
//!
//! The `org` argument mirrors the real client's signature and is ignored.

use tracing::{debug, info};

use super::entity::{CloudApiKey, CreateCloudApiKeyInput, ListCloudApiKeysOutput};
use crate::directory::Directory;
use crate::shared::error::{DirectoryError, Result};

impl Directory {
    pub fn create_cloud_api_key(&mut self, org: &str, input: CreateCloudApiKeyInput) -> Result<CloudApiKey> {
        if self.cloud_api_keys.iter().any(|key| key.name == input.name) {
            debug!(org, name = %input.name, "Rejected duplicate cloud api key name");
            return Err(DirectoryError::duplicate("CloudApiKey", "name", input.name));
        }

        let id = self
            .sequences
            .cloud_api_keys
            .next(self.options.id_assignment, self.cloud_api_keys.len());
        let key = CloudApiKey {
            id,
            token: self.random_credential(&input.name),
            name: input.name,
            role: input.role,
            expiration: None,
        };

        info!(org, key_id = id, name = %key.name, role = %key.role, "Created cloud api key");
        self.cloud_api_keys.push(key.clone());
        Ok(key)
    }

    pub fn list_cloud_api_keys(&self, _org: &str) -> Result<ListCloudApiKeysOutput> {
        Ok(ListCloudApiKeysOutput {
            items: self.cloud_api_keys.clone(),
        })
    }

    /// Delete by name, keeping the order of the remaining keys. Deleting a
    /// name that does not exist succeeds without effect.
    pub fn delete_cloud_api_key(&mut self, org: &str, name: &str) -> Result<()> {
        match self.cloud_api_keys.iter().position(|key| key.name == name) {
            Some(position) => {
                let removed = self.cloud_api_keys.remove(position);
                info!(org, key_id = removed.id, name, "Deleted cloud api key");
            }
            None => debug!(org, name, "Cloud api key to delete not present"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cloud_api_key::entity::CreateCloudApiKeyInput;
    use crate::{Directory, DirectoryOptions};

    fn directory_with_keys(names: &[&str]) -> Directory {
        let mut dir = Directory::with_options(DirectoryOptions::default().with_seed(3));
        for name in names {
            dir.create_cloud_api_key("org", CreateCloudApiKeyInput::new(*name, "Viewer"))
                .unwrap();
        }
        dir
    }

    fn names(dir: &Directory) -> Vec<String> {
        dir.list_cloud_api_keys("org")
            .unwrap()
            .items
            .into_iter()
            .map(|key| key.name)
            .collect()
    }

    #[test]
    fn test_create_key() {
        let mut dir = directory_with_keys(&[]);
        let key = dir
            .create_cloud_api_key("org", CreateCloudApiKeyInput::new("ingest", "MetricsPublisher"))
            .unwrap();
        assert_eq!(key.id, 1);
        assert_eq!(key.role, "MetricsPublisher");
        assert!(key.token.starts_with("ingest-"));
    }

    #[test]
    fn test_duplicate_key_name_rejected() {
        let mut dir = directory_with_keys(&["ingest"]);
        let err = dir
            .create_cloud_api_key("org", CreateCloudApiKeyInput::new("ingest", "Admin"))
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(names(&dir), vec!["ingest"]);
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut dir = directory_with_keys(&["a", "b", "c", "d"]);
        dir.delete_cloud_api_key("org", "b").unwrap();
        assert_eq!(names(&dir), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_delete_missing_key_is_noop() {
        let mut dir = directory_with_keys(&["a", "b"]);
        assert!(dir.delete_cloud_api_key("org", "zzz").is_ok());
        assert_eq!(names(&dir), vec!["a", "b"]);
    }

    #[test]
    fn test_org_is_not_validated() {
        let mut dir = directory_with_keys(&[]);
        assert!(dir.create_cloud_api_key("", CreateCloudApiKeyInput::new("k", "Admin")).is_ok());
        assert_eq!(dir.list_cloud_api_keys("").unwrap().items.len(), 1);
    }
}
