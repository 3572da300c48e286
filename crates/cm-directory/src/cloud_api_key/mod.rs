//! Cloud API Key Aggregate
//!
//! Legacy org-scoped credentials. Flat collection, no parent.

pub mod entity;
pub mod operations;

pub use entity::{CloudApiKey, CreateCloudApiKeyInput, ListCloudApiKeysOutput};
