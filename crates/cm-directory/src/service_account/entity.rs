//! Service Account Entities
//!
//! Wire shapes follow the administrative API (camelCase field names).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Roles the real API knows about. Requests carry plain strings and are not
/// checked against this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Viewer,
    Editor,
    MetricsPublisher,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Viewer, Role::Editor, Role::MetricsPublisher];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Viewer => "Viewer",
            Role::Editor => "Editor",
            Role::MetricsPublisher => "MetricsPublisher",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service account record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccount {
    pub id: i64,
    pub name: String,
    pub login: String,
    #[serde(default)]
    pub org_id: i64,
    #[serde(default)]
    pub is_disabled: bool,
    pub role: String,
    /// Number of tokens issued to this account
    #[serde(default)]
    pub tokens: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Token issued to a service account.
///
/// `service_account_id` is a plain reference: deleting the account leaves
/// the token in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountToken {
    pub id: i64,
    pub name: String,
    pub created: DateTime<Utc>,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
    pub service_account_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_to_live: Option<i64>,
}

impl ServiceAccountToken {
    pub fn has_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration.is_some_and(|expiration| expiration <= now)
    }

    pub fn summary(&self, now: DateTime<Utc>) -> ServiceAccountTokenSummary {
        ServiceAccountTokenSummary {
            id: self.id,
            name: self.name.clone(),
            created: self.created,
            expiration: self.expiration,
            has_expired: self.has_expired(now),
        }
    }
}

/// Input of `create_service_account`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceAccountRequest {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub is_disabled: bool,
}

impl CreateServiceAccountRequest {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            is_disabled: false,
        }
    }
}

/// Input of `create_service_account_token`.
///
/// The account id is a path parameter in the real API and is not part of
/// the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceAccountTokenRequest {
    pub name: String,
    #[serde(skip)]
    pub service_account_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_to_live: Option<i64>,
}

impl CreateServiceAccountTokenRequest {
    pub fn new(name: impl Into<String>, service_account_id: i64) -> Self {
        Self {
            name: name.into(),
            service_account_id,
            seconds_to_live: None,
        }
    }

    pub fn with_seconds_to_live(mut self, seconds: i64) -> Self {
        self.seconds_to_live = Some(seconds);
        self
    }

    /// Expiry for a token created at `created`; none unless the TTL is positive.
    pub(crate) fn expiration_from(&self, created: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.seconds_to_live
            .filter(|seconds| *seconds > 0)
            .map(|seconds| created + Duration::seconds(seconds))
    }
}

/// Returned once on token creation; the only place the key is exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceAccountTokenResponse {
    pub id: i64,
    pub name: String,
    pub key: String,
}

/// Element of `service_account_tokens`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountTokenSummary {
    pub id: i64,
    pub name: String,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
    pub has_expired: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names() {
        let names: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
        assert_eq!(names, vec!["Admin", "Viewer", "Editor", "MetricsPublisher"]);
        assert_eq!(Role::MetricsPublisher.to_string(), "MetricsPublisher");
    }

    #[test]
    fn test_token_request_body_omits_account_id() {
        let request = CreateServiceAccountTokenRequest::new("ci", 42).with_seconds_to_live(60);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "ci", "secondsToLive": 60 }));
    }

    #[test]
    fn test_expiration_requires_positive_ttl() {
        let created = Utc::now();
        let request = CreateServiceAccountTokenRequest::new("ci", 1);
        assert_eq!(request.expiration_from(created), None);
        assert_eq!(request.clone().with_seconds_to_live(0).expiration_from(created), None);
        assert_eq!(
            request.with_seconds_to_live(30).expiration_from(created),
            Some(created + Duration::seconds(30))
        );
    }

    #[test]
    fn test_summary_reports_expiry() {
        let now = Utc::now();
        let token = ServiceAccountToken {
            id: 1,
            name: "old".to_string(),
            created: now - Duration::hours(2),
            key: "old-1".to_string(),
            expiration: Some(now - Duration::hours(1)),
            service_account_id: 1,
            seconds_to_live: Some(3600),
        };
        let summary = token.summary(now);
        assert!(summary.has_expired);
        assert_eq!(summary.name, "old");
    }

    #[test]
    fn test_account_serializes_camel_case() {
        let account = ServiceAccount {
            id: 1,
            name: "ops".to_string(),
            login: "sa-ops".to_string(),
            org_id: 0,
            is_disabled: false,
            role: "Admin".to_string(),
            tokens: 0,
            avatar_url: None,
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["orgId"], 0);
        assert_eq!(json["isDisabled"], false);
        assert!(json.get("avatarUrl").is_none());
    }
}
