//! Cloud Access Policy Aggregate
//!
//! Region-scoped permission grants and the tokens issued under them.
//! Deleting a policy removes its tokens.

pub mod entity;
pub mod operations;

pub use entity::{
    CloudAccessPolicy, CloudAccessPolicyItems, CloudAccessPolicyToken,
    CloudAccessPolicyTokenItems, CreateCloudAccessPolicyInput,
    CreateCloudAccessPolicyTokenInput, LabelPolicy, Realm, RealmType,
};
