//! Service Account Aggregate
//!
//! Principal identities and the tokens issued to them.

pub mod entity;
pub mod operations;

pub use entity::{
    CreateServiceAccountRequest, CreateServiceAccountTokenRequest,
    CreateServiceAccountTokenResponse, Role, ServiceAccount, ServiceAccountToken,
    ServiceAccountTokenSummary,
};
