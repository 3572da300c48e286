//! Cloudmock Resource Directory
//!
//! In-memory stand-in for a monitoring platform's administrative API:
//! - Service accounts and their tokens
//! - Cloud API keys (legacy, org-scoped)
//! - Cloud access policies and their tokens (region-scoped)
//! - Random fixture generators for volume tests
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Records and request/response shapes
//! - `operations` - `impl Directory` blocks with the aggregate's operations
//!
//! ## Referential rules
//!
//! | Parent | Child | Parent delete |
//! |---|---|---|
//! | Service account | Service account token | tokens stay (dangling) |
//! | Cloud access policy | Policy token | tokens removed |

// Aggregates
pub mod service_account;
pub mod cloud_api_key;
pub mod access_policy;

// Directory and generators
pub mod directory;
pub mod fixtures;

// Shared infrastructure
pub mod shared;

pub use directory::{Directory, DirectoryOptions, DirectorySnapshot, SharedDirectory};
pub use shared::error::{DirectoryError, ErrorKind, Result};
pub use shared::ids::IdAssignment;

pub use service_account::entity::{
    CreateServiceAccountRequest, CreateServiceAccountTokenRequest,
    CreateServiceAccountTokenResponse, Role, ServiceAccount, ServiceAccountToken,
    ServiceAccountTokenSummary,
};
pub use cloud_api_key::entity::{CloudApiKey, CreateCloudApiKeyInput, ListCloudApiKeysOutput};
pub use access_policy::entity::{
    CloudAccessPolicy, CloudAccessPolicyItems, CloudAccessPolicyToken,
    CloudAccessPolicyTokenItems, CreateCloudAccessPolicyInput,
    CreateCloudAccessPolicyTokenInput, LabelPolicy, Realm, RealmType,
};
pub use fixtures::{FixturePlan, FixtureReport};
