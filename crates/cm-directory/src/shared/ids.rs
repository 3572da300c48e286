//! Per-collection id assignment.

use serde::{Deserialize, Serialize};

/// Numbering scheme for new records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdAssignment {
    /// `len + 1` of the collection at creation time. After a deletion the
    /// next record can receive an id that is still (or was previously) in use.
    #[default]
    CollectionLength,
    /// One past the highest id ever issued by the collection.
    Monotonic,
}

/// Id counter owned by one collection.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdSequence {
    highest_issued: i64,
}

impl IdSequence {
    pub(crate) fn next(&mut self, scheme: IdAssignment, live_len: usize) -> i64 {
        let id = match scheme {
            IdAssignment::CollectionLength => live_len as i64 + 1,
            IdAssignment::Monotonic => self.highest_issued + 1,
        };
        self.highest_issued = self.highest_issued.max(id);
        id
    }
}

/// One sequence per collection; ids are never shared across collections.
#[derive(Debug, Clone, Default)]
pub(crate) struct Sequences {
    pub(crate) service_accounts: IdSequence,
    pub(crate) service_account_tokens: IdSequence,
    pub(crate) cloud_api_keys: IdSequence,
    pub(crate) access_policies: IdSequence,
    pub(crate) access_policy_tokens: IdSequence,
}
