//! Resource Directory Integration Tests
//!
//! Cross-collection behaviour: uniqueness, ownership, cascades and id
//! assignment, exercised through the public API only.

use std::thread;

use cm_directory::{
    CreateCloudAccessPolicyInput, CreateCloudAccessPolicyTokenInput, CreateCloudApiKeyInput,
    CreateServiceAccountRequest, CreateServiceAccountTokenRequest, Directory, DirectoryError,
    DirectoryOptions, ErrorKind, IdAssignment, Realm,
};

const REGION: &str = "us";

fn seeded() -> Directory {
    Directory::with_options(DirectoryOptions::default().with_seed(2024))
}

fn policy_input(name: &str, realm_type: &str) -> CreateCloudAccessPolicyInput {
    CreateCloudAccessPolicyInput::new(
        name,
        vec!["testScope".to_string()],
        vec![Realm::new(realm_type, "clabs", [r#"{env="dev"}"#])],
    )
}

mod service_account_tests {
    use super::*;

    #[test]
    fn test_duplicate_account_leaves_single_entry() {
        let mut dir = seeded();
        dir.create_service_account(CreateServiceAccountRequest::new("dup", "Admin"))
            .unwrap();
        let err = dir
            .create_service_account(CreateServiceAccountRequest::new("dup", "Viewer"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Duplicate);
        let matching: Vec<_> = dir
            .service_accounts()
            .into_iter()
            .filter(|sa| sa.name == "dup")
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].role, "Admin");
    }

    #[test]
    fn test_generate_then_delete_one() {
        let mut dir = seeded();
        let accounts = dir.generate_service_accounts(10).unwrap();
        let victim = accounts[3].id;

        dir.delete_service_account(victim).unwrap();

        let remaining = dir.service_accounts();
        assert_eq!(remaining.len(), 9);
        assert!(remaining.iter().all(|sa| sa.id != victim));
    }

    #[test]
    fn test_extra_accounts_survive_delete() {
        let mut dir = seeded();
        let a = dir.generate_service_account("a", "").unwrap();
        let b = dir.generate_service_account("b", "").unwrap();
        dir.delete_service_account(a.id).unwrap();
        assert_eq!(dir.service_accounts(), vec![b]);
    }

    #[test]
    fn test_tokens_outlive_their_account() {
        let mut dir = seeded();
        let sa = dir.generate_service_account("", "").unwrap();
        dir.generate_service_account_tokens(sa.id, 2).unwrap();

        dir.delete_service_account(sa.id).unwrap();

        assert_eq!(dir.all_service_account_tokens().len(), 2);
        assert_eq!(dir.service_account_tokens(sa.id).len(), 2);
        assert!(matches!(
            dir.delete_service_account_token(sa.id, 1),
            Err(DirectoryError::ServiceAccountNotFound { .. })
        ));
    }

    #[test]
    fn test_token_checks_account_before_name() {
        let mut dir = seeded();
        let sa = dir.generate_service_account("", "").unwrap();
        dir.generate_service_account_token("taken", sa.id).unwrap();

        let err = dir
            .create_service_account_token(CreateServiceAccountTokenRequest::new("taken", 999))
            .unwrap_err();
        assert_eq!(err, DirectoryError::ServiceAccountNotFound { id: 999 });
    }

    #[test]
    fn test_token_counter_tracks_live_tokens() {
        let mut dir = seeded();
        let sa = dir.generate_service_account("", "").unwrap();
        let tokens = dir.generate_service_account_tokens(sa.id, 3).unwrap();
        dir.delete_service_account_token(sa.id, tokens[0].id).unwrap();

        assert_eq!(dir.service_account(sa.id).unwrap().tokens, 2);
    }
}

mod cloud_api_key_tests {
    use super::*;

    #[test]
    fn test_delete_unknown_key_is_idempotent() {
        let mut dir = seeded();
        dir.generate_cloud_api_keys(3, "k", "").unwrap();
        let before = dir.list_cloud_api_keys("org").unwrap();

        assert!(dir.delete_cloud_api_key("org", "does-not-exist").is_ok());
        assert!(dir.delete_cloud_api_key("org", "does-not-exist").is_ok());

        assert_eq!(dir.list_cloud_api_keys("org").unwrap(), before);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut dir = seeded();
        dir.create_cloud_api_key("org", CreateCloudApiKeyInput::new("k", "Admin"))
            .unwrap();
        let err = dir
            .create_cloud_api_key("org", CreateCloudApiKeyInput::new("k", "Viewer"))
            .unwrap_err();
        assert!(err.is_duplicate());
    }
}

mod access_policy_tests {
    use super::*;

    #[test]
    fn test_invalid_realm_leaves_no_policy() {
        let mut dir = seeded();
        let result = dir.create_cloud_access_policy(REGION, policy_input("p", "invalid"));

        assert!(result.is_err());
        assert_eq!(dir.cloud_access_policies(REGION).unwrap().items.len(), 0);
    }

    #[test]
    fn test_delete_policy_removes_exactly_its_tokens() {
        let mut dir = seeded();
        let doomed = dir.create_cloud_access_policy(REGION, policy_input("doomed", "org")).unwrap();
        let kept = dir.create_cloud_access_policy(REGION, policy_input("kept", "stack")).unwrap();
        const K: usize = 4;
        dir.generate_cloud_access_policy_tokens(K, "d", &doomed.id).unwrap();
        dir.generate_cloud_access_policy_tokens(2, "k", &kept.id).unwrap();
        let before = dir.all_cloud_access_policy_tokens().len();

        dir.delete_cloud_access_policy(REGION, &doomed.id).unwrap();

        assert_eq!(dir.all_cloud_access_policy_tokens().len(), before - K);
        assert!(dir
            .cloud_access_policy_tokens(REGION, &doomed.id)
            .unwrap()
            .items
            .is_empty());
        assert_eq!(dir.cloud_access_policies(REGION).unwrap().items, vec![kept]);
    }

    #[test]
    fn test_token_round_trip_by_id() {
        let mut dir = seeded();
        let policy = dir.create_cloud_access_policy(REGION, policy_input("p", "org")).unwrap();
        let mut input = CreateCloudAccessPolicyTokenInput::new(policy.id.as_str(), "TestTokenName");
        input.display_name = "Test Token Display".to_string();

        let created = dir.create_cloud_access_policy_token(REGION, input).unwrap();
        let found = dir.cloud_access_policy_token_by_id(REGION, &created.id).unwrap();

        assert_eq!(found.name, "TestTokenName");
        assert_eq!(found.display_name, "Test Token Display");
        assert_eq!(found, created);
    }

    #[test]
    fn test_empty_region_fails_first_everywhere() {
        let mut dir = seeded();
        // Each call would also fail another precondition if region were set.
        let results: Vec<DirectoryError> = vec![
            dir.create_cloud_access_policy("", policy_input("p", "invalid")).unwrap_err(),
            dir.cloud_access_policies("").unwrap_err(),
            dir.delete_cloud_access_policy("", "missing").unwrap_err(),
            dir.create_cloud_access_policy_token("", CreateCloudAccessPolicyTokenInput::new("missing", "t"))
                .unwrap_err(),
            dir.cloud_access_policy_tokens("", "").unwrap_err(),
            dir.cloud_access_policy_token_by_id("", "missing").unwrap_err(),
            dir.delete_cloud_access_policy_token("", "missing").unwrap_err(),
        ];

        assert!(results.iter().all(|err| *err == DirectoryError::RegionRequired));
        assert!(results.iter().all(DirectoryError::is_validation));
    }
}

mod id_assignment_tests {
    use super::*;

    #[test]
    fn test_collection_length_ids_can_repeat() {
        let mut dir = seeded();
        dir.generate_service_accounts(3).unwrap();
        dir.delete_service_account(1).unwrap();

        // two live accounts, so the next id is 3 again
        let next = dir.generate_service_account("", "").unwrap();
        assert_eq!(next.id, 3);
        let with_id_three = dir.service_accounts().iter().filter(|sa| sa.id == 3).count();
        assert_eq!(with_id_three, 2);
    }

    #[test]
    fn test_monotonic_ids_never_repeat() {
        let mut dir = Directory::with_options(
            DirectoryOptions::default()
                .with_seed(1)
                .with_id_assignment(IdAssignment::Monotonic),
        );
        dir.generate_service_accounts(3).unwrap();
        dir.delete_service_account(1).unwrap();

        let next = dir.generate_service_account("", "").unwrap();
        assert_eq!(next.id, 4);
    }

    fn policies_sharing_id_two(dir: &mut Directory) {
        dir.create_cloud_access_policy(REGION, policy_input("p1", "org")).unwrap();
        dir.create_cloud_access_policy(REGION, policy_input("p2", "org")).unwrap();
        dir.delete_cloud_access_policy(REGION, "1").unwrap();
        dir.create_cloud_access_policy(REGION, policy_input("p3", "stack")).unwrap();
    }

    #[test]
    fn test_policy_ids_can_repeat() {
        let mut dir = seeded();
        policies_sharing_id_two(&mut dir);

        let policies = dir.cloud_access_policies(REGION).unwrap().items;
        let ids: Vec<&str> = policies.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "2"]);
    }

    #[test]
    fn test_delete_shared_policy_id_removes_one() {
        let mut dir = seeded();
        policies_sharing_id_two(&mut dir);

        dir.delete_cloud_access_policy(REGION, "2").unwrap();

        let policies = dir.cloud_access_policies(REGION).unwrap().items;
        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].name, "p3");
        assert_eq!(policies[0].id, "2");
    }

    #[test]
    fn test_policy_token_ids_can_repeat() {
        let mut dir = seeded();
        let policy = dir.create_cloud_access_policy(REGION, policy_input("p", "org")).unwrap();
        for name in ["t1", "t2"] {
            dir.create_cloud_access_policy_token(REGION, CreateCloudAccessPolicyTokenInput::new(policy.id.as_str(), name))
                .unwrap();
        }
        dir.delete_cloud_access_policy_token(REGION, "1").unwrap();

        let t3 = dir
            .create_cloud_access_policy_token(REGION, CreateCloudAccessPolicyTokenInput::new(policy.id.as_str(), "t3"))
            .unwrap();

        assert_eq!(t3.id, "2");
        let with_id_two = dir
            .all_cloud_access_policy_tokens()
            .iter()
            .filter(|t| t.id == "2")
            .count();
        assert_eq!(with_id_two, 2);
    }

    #[test]
    fn test_ids_are_per_collection() {
        let mut dir = seeded();
        let sa = dir.generate_service_account("", "").unwrap();
        let key = dir.generate_cloud_api_key("", "").unwrap();
        let policy = dir.generate_cloud_access_policy("").unwrap();
        assert_eq!(sa.id, 1);
        assert_eq!(key.id, 1);
        assert_eq!(policy.id, "1");
    }
}

mod shared_directory_tests {
    use super::*;

    #[test]
    fn test_shared_directory_serialises_writers() {
        let shared = seeded().into_shared();

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let name = format!("worker{}-{}", worker, i);
                        shared
                            .lock()
                            .create_cloud_api_key("org", CreateCloudApiKeyInput::new(name, "Viewer"))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let keys = shared.lock().list_cloud_api_keys("org").unwrap().items;
        assert_eq!(keys.len(), 100);
        let mut ids: Vec<i64> = keys.iter().map(|k| k.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }
}

mod snapshot_tests {
    use super::*;

    #[test]
    fn test_snapshot_serializes_all_collections() {
        let mut dir = seeded();
        let sa = dir.generate_service_account("ops", "Admin").unwrap();
        dir.generate_service_account_token("ci", sa.id).unwrap();
        dir.generate_cloud_api_key("legacy", "Viewer").unwrap();
        let policy = dir.create_cloud_access_policy(REGION, policy_input("p", "stack")).unwrap();
        dir.create_cloud_access_policy_token(REGION, CreateCloudAccessPolicyTokenInput::new(policy.id.as_str(), "t"))
            .unwrap();

        let json = serde_json::to_value(dir.snapshot()).unwrap();

        assert_eq!(json["serviceAccounts"][0]["login"], "sa-ops");
        assert_eq!(json["serviceAccountTokens"][0]["serviceAccountId"], sa.id);
        assert_eq!(json["cloudApiKeys"][0]["name"], "legacy");
        assert_eq!(json["cloudAccessPolicies"][0]["realms"][0]["type"], "stack");
        assert_eq!(json["cloudAccessPolicyTokens"][0]["accessPolicyId"], policy.id);
        assert_eq!(json["cloudAccessPolicyTokens"][0]["token"], "MockToken");
    }
}
