//! Directory Error Types

use thiserror::Error;

/// Every failure the directory can report. All of them are deterministic
/// precondition violations; none leave partial state behind except the
/// token cascade of `delete_cloud_access_policy`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("region required")]
    RegionRequired,

    #[error("invalid realm type: {realm_type:?}")]
    InvalidRealm { realm_type: String },

    #[error("Duplicate entity: {entity_type} with {field}={value}")]
    Duplicate { entity_type: String, field: String, value: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Service account not found: {id}")]
    ServiceAccountNotFound { id: i64 },

    #[error("Access policy not found: {id}")]
    AccessPolicyNotFound { id: String },
}

/// Coarse category of a [`DirectoryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is malformed; the caller must correct it.
    Validation,
    /// A name is already taken.
    Duplicate,
    /// The referenced record does not exist.
    NotFound,
}

impl DirectoryError {
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn duplicate(
        entity_type: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Duplicate {
            entity_type: entity_type.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn invalid_realm(realm_type: impl Into<String>) -> Self {
        Self::InvalidRealm {
            realm_type: realm_type.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RegionRequired | Self::InvalidRealm { .. } => ErrorKind::Validation,
            Self::Duplicate { .. } => ErrorKind::Duplicate,
            Self::NotFound { .. }
            | Self::ServiceAccountNotFound { .. }
            | Self::AccessPolicyNotFound { .. } => ErrorKind::NotFound,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_duplicate(&self) -> bool {
        self.kind() == ErrorKind::Duplicate
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
