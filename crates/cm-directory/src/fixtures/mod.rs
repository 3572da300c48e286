//! Fixture Generators
//!
//! Random but plausible records for volume tests. The free functions take
//! any `Rng`; the `generate_*` methods on [`Directory`](crate::Directory)
//! draw from the directory's own random source and go through the same
//! checks as the create operations, so a colliding name fails the call.

pub mod generate;
pub mod plan;

use rand::Rng;

use crate::access_policy::entity::{Realm, RealmType};
use crate::service_account::entity::Role;

pub const SCOPE_RESOURCES: [&str; 5] = ["metrics", "logs", "traces", "alerts", "rules"];
pub const SCOPE_PERMISSIONS: [&str; 2] = ["read", "write"];

const RANDOM_STRING_MAX: u32 = 99_999;

pub use plan::{FixturePlan, FixtureReport};

pub fn random_role<R: Rng + ?Sized>(rng: &mut R) -> Role {
    Role::ALL[rng.gen_range(0..Role::ALL.len())]
}

/// `<resource>:<permission>`, e.g. `logs:write`
pub fn random_scope<R: Rng + ?Sized>(rng: &mut R) -> String {
    let resource = SCOPE_RESOURCES[rng.gen_range(0..SCOPE_RESOURCES.len())];
    let permission = SCOPE_PERMISSIONS[rng.gen_range(0..SCOPE_PERMISSIONS.len())];
    format!("{}:{}", resource, permission)
}

pub fn random_realm_type<R: Rng + ?Sized>(rng: &mut R) -> RealmType {
    RealmType::ALL[rng.gen_range(0..RealmType::ALL.len())]
}

/// Realm of a random type with a random identifier and no label policies.
pub fn random_realm<R: Rng + ?Sized>(rng: &mut R) -> Realm {
    let realm_type = random_realm_type(rng);
    let identifier = random_string(rng, 0);
    Realm::new(realm_type.as_str(), identifier, Vec::<String>::new())
}

/// `randomString-<counter><5 digits>`.
///
/// Two calls can only collide when they share `counter`.
pub fn random_string<R: Rng + ?Sized>(rng: &mut R, counter: usize) -> String {
    format!("randomString-{}{:05}", counter, rng.gen_range(0..RANDOM_STRING_MAX))
}
