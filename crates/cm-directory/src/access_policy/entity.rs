//! Cloud Access Policy Entities

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::DirectoryError;

/// Where a realm applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RealmType {
    Org,
    Stack,
}

impl RealmType {
    pub const ALL: [RealmType; 2] = [RealmType::Org, RealmType::Stack];

    pub fn as_str(&self) -> &'static str {
        match self {
            RealmType::Org => "org",
            RealmType::Stack => "stack",
        }
    }
}

impl FromStr for RealmType {
    type Err = DirectoryError;

    /// Exact, case-sensitive match on `org` / `stack`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "org" => Ok(RealmType::Org),
            "stack" => Ok(RealmType::Stack),
            other => Err(DirectoryError::invalid_realm(other)),
        }
    }
}

impl std::fmt::Display for RealmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label selector refining a realm, e.g. `{env="dev"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPolicy {
    pub selector: String,
}

/// Applicability scope of a policy.
///
/// `realm_type` stays a string so requests with unknown types can be
/// represented and rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Realm {
    #[serde(rename = "type")]
    pub realm_type: String,
    pub identifier: String,
    #[serde(default)]
    pub label_policies: Vec<LabelPolicy>,
}

impl Realm {
    /// Realm with one label policy per selector.
    pub fn new<I, S>(realm_type: impl Into<String>, identifier: impl Into<String>, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            realm_type: realm_type.into(),
            identifier: identifier.into(),
            label_policies: selectors
                .into_iter()
                .map(|selector| LabelPolicy {
                    selector: selector.into(),
                })
                .collect(),
        }
    }

    pub fn kind(&self) -> Result<RealmType, DirectoryError> {
        self.realm_type.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudAccessPolicy {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub scopes: Vec<String>,
    pub realms: Vec<Realm>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCloudAccessPolicyInput {
    pub name: String,
    pub display_name: String,
    pub scopes: Vec<String>,
    pub realms: Vec<Realm>,
}

impl CreateCloudAccessPolicyInput {
    /// Input whose display name equals its name.
    pub fn new(name: impl Into<String>, scopes: Vec<String>, realms: Vec<Realm>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            scopes,
            realms,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudAccessPolicyItems {
    pub items: Vec<CloudAccessPolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudAccessPolicyToken {
    pub id: String,
    pub access_policy_id: String,
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCloudAccessPolicyTokenInput {
    pub access_policy_id: String,
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateCloudAccessPolicyTokenInput {
    /// Input whose display name equals its name and that never expires.
    pub fn new(access_policy_id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            access_policy_id: access_policy_id.into(),
            display_name: name.clone(),
            name,
            expires_at: None,
        }
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudAccessPolicyTokenItems {
    pub items: Vec<CloudAccessPolicyToken>,
}
