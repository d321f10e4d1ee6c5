mod common;

use common::create_test_pool;

use relay_db::ConnectionRepository;

use googletest::prelude::*;
use uuid::Uuid;

#[tokio::test]
async fn given_registered_id_when_registered_again_then_exactly_one_entry_remains() {
    // Given: A registered connection
    let pool = create_test_pool().await;
    let repo = ConnectionRepository::new(pool);
    let id = Uuid::new_v4().to_string();

    repo.register(&id).await.unwrap();

    // When: Registering the same id again
    repo.register(&id).await.unwrap();

    // Then: list_live contains exactly one entry for the id
    let live = repo.list_live().await.unwrap();
    assert_that!(live, unordered_elements_are![eq(&id)]);
}

#[tokio::test]
async fn given_registered_id_when_registered_again_then_registered_at_is_refreshed() {
    // Given: A registered connection
    let pool = create_test_pool().await;
    let repo = ConnectionRepository::new(pool);
    let id = Uuid::new_v4().to_string();

    repo.register(&id).await.unwrap();
    let first = repo.find(&id).await.unwrap().unwrap();

    // When: Registering the same id again
    repo.register(&id).await.unwrap();

    // Then: registration time is last-write-wins
    let second = repo.find(&id).await.unwrap().unwrap();
    assert_that!(second.registered_at, ge(first.registered_at));
}

#[tokio::test]
async fn given_unknown_id_when_deregistered_then_no_error_and_others_untouched() {
    // Given: One registered connection
    let pool = create_test_pool().await;
    let repo = ConnectionRepository::new(pool);
    let registered = Uuid::new_v4().to_string();

    repo.register(&registered).await.unwrap();

    // When: Deregistering an id that was never registered
    let never_registered = Uuid::new_v4().to_string();
    let result = repo.deregister(&never_registered).await;

    // Then: No error, and the registered connection is unaffected
    assert_that!(result, ok(anything()));
    let live = repo.list_live().await.unwrap();
    assert_that!(live, unordered_elements_are![eq(&registered)]);
}

#[tokio::test]
async fn given_several_connections_when_listing_then_snapshot_has_all_of_them() {
    // Given: Three registered connections
    let pool = create_test_pool().await;
    let repo = ConnectionRepository::new(pool);

    let mut ids: Vec<String> = (0..3).map(|_| Uuid::new_v4().to_string()).collect();
    for id in &ids {
        repo.register(id).await.unwrap();
    }

    // When: Taking a snapshot
    let mut live = repo.list_live().await.unwrap();

    // Then: Every registered id is present, nothing else
    ids.sort();
    live.sort();
    assert_eq!(live, ids);
}

#[tokio::test]
async fn given_two_connections_when_one_deregistered_then_only_it_is_removed() {
    // Given: Two registered connections
    let pool = create_test_pool().await;
    let repo = ConnectionRepository::new(pool);
    let keep = Uuid::new_v4().to_string();
    let stale = Uuid::new_v4().to_string();

    repo.register(&keep).await.unwrap();
    repo.register(&stale).await.unwrap();

    // When: Deregistering one of them
    repo.deregister(&stale).await.unwrap();

    // Then: Only the other remains
    let live = repo.list_live().await.unwrap();
    assert_that!(live, unordered_elements_are![eq(&keep)]);
}

#[tokio::test]
async fn given_empty_registry_when_finding_unknown_id_then_returns_none() {
    let pool = create_test_pool().await;
    let repo = ConnectionRepository::new(pool);

    let result = repo.find("no-such-connection").await.unwrap();

    assert_that!(result, none());
}
