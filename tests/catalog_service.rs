use std::sync::Arc;

use creature_catalog::{
    CatalogService, CreatureDraft, CreatureId, CreaturePatch, DomainError,
    infrastructure::{CreatureStore, InMemoryCreatureStore},
};

fn service_with_store(default_limit: i64) -> (CatalogService, Arc<InMemoryCreatureStore>) {
    let store = Arc::new(InMemoryCreatureStore::new());
    (CatalogService::new(store.clone(), default_limit), store)
}

async fn create(service: &CatalogService, no: i64, name: &str) -> creature_catalog::Creature {
    service
        .create(CreatureDraft::new(no, name))
        .await
        .expect("create should succeed")
}

#[tokio::test]
async fn every_kind_of_key_resolves_to_the_same_creature() {
    let (service, _) = service_with_store(10);
    let created = create(&service, 1, "Bulbasaur").await;

    let by_number = service.find_one("1").await.expect("by number");
    let by_id = service
        .find_one(&created.id.to_string())
        .await
        .expect("by id");
    let by_name = service.find_one("BULBASAUR").await.expect("by name");

    assert_eq!(created.name, "bulbasaur");
    assert_eq!(by_number.id, created.id);
    assert_eq!(by_id.id, created.id);
    assert_eq!(by_name.id, created.id);
}

#[tokio::test]
async fn unknown_term_is_not_found() {
    let (service, _) = service_with_store(10);
    create(&service, 1, "bulbasaur").await;

    let error = service
        .find_one("no-such-term")
        .await
        .expect_err("should not resolve");

    assert!(matches!(error, DomainError::NotFound(_)));
}

#[tokio::test]
async fn duplicate_name_in_any_casing_conflicts() {
    let (service, store) = service_with_store(10);
    create(&service, 1, "bulbasaur").await;

    let error = service
        .create(CreatureDraft::new(2, "  BulbaSAUR "))
        .await
        .expect_err("second create should conflict");

    match error {
        DomainError::Conflict { field, value } => {
            assert_eq!(field, "name");
            assert_eq!(value, "bulbasaur");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(store.count().await.expect("count"), 1);
}

#[tokio::test]
async fn duplicate_number_conflicts() {
    let (service, _) = service_with_store(10);
    create(&service, 1, "bulbasaur").await;

    let error = service
        .create(CreatureDraft::new(1, "ivysaur"))
        .await
        .expect_err("second create should conflict");

    assert!(matches!(error, DomainError::Conflict { ref field, .. } if field == "no"));
}

#[tokio::test]
async fn list_pages_by_ascending_number() {
    let (service, _) = service_with_store(10);
    for (no, name) in [(3, "venusaur"), (1, "bulbasaur"), (4, "charmander"), (2, "ivysaur")] {
        create(&service, no, name).await;
    }

    let page = service.list(Some(2), 1).await.expect("list");
    let numbers: Vec<i64> = page.iter().map(|creature| creature.sequence_no).collect();

    assert_eq!(numbers, vec![2, 3]);
}

#[tokio::test]
async fn list_without_limit_uses_configured_default() {
    let (service, _) = service_with_store(3);
    for no in 1..=5 {
        create(&service, no, &format!("creature-{no}")).await;
    }

    let page = service.list(None, 0).await.expect("list");

    assert_eq!(page.len(), 3);
    assert_eq!(page[0].sequence_no, 1);
}

#[tokio::test]
async fn explicit_non_positive_limit_is_passed_through_uncapped() {
    let (service, _) = service_with_store(2);
    for no in 1..=4 {
        create(&service, no, &format!("creature-{no}")).await;
    }

    let page = service.list(Some(0), 0).await.expect("list");

    assert_eq!(page.len(), 4);
}

#[tokio::test]
async fn rename_moves_the_name_key() {
    let (service, _) = service_with_store(10);
    let created = create(&service, 1, "bulbasaur").await;

    let updated = service
        .update(
            "bulbasaur",
            CreaturePatch {
                name: Some("NewName".to_string()),
                ..CreaturePatch::default()
            },
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "newname");
    assert_eq!(updated.sequence_no, 1);

    let found = service.find_one("newname").await.expect("new name resolves");
    assert_eq!(found.id, created.id);

    let error = service
        .find_one("bulbasaur")
        .await
        .expect_err("old name should be gone");
    assert!(error.is_not_found());
}

#[tokio::test]
async fn update_returns_merged_view() {
    let (service, _) = service_with_store(10);
    create(&service, 4, "charmander").await;

    let updated = service
        .update(
            "4",
            CreaturePatch {
                types: Some(vec!["fire".to_string()]),
                ..CreaturePatch::default()
            },
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.name, "charmander");
    assert_eq!(updated.types, vec!["fire".to_string()]);
}

#[tokio::test]
async fn update_into_taken_name_conflicts() {
    let (service, _) = service_with_store(10);
    create(&service, 1, "bulbasaur").await;
    create(&service, 2, "ivysaur").await;

    let error = service
        .update(
            "2",
            CreaturePatch {
                name: Some("Bulbasaur".to_string()),
                ..CreaturePatch::default()
            },
        )
        .await
        .expect_err("rename should conflict");

    assert!(error.is_conflict());
    assert_eq!(
        service.find_one("2").await.expect("still there").name,
        "ivysaur"
    );
}

#[tokio::test]
async fn update_of_unknown_term_is_not_found() {
    let (service, _) = service_with_store(10);

    let error = service
        .update(
            "missingno",
            CreaturePatch {
                name: Some("anything".to_string()),
                ..CreaturePatch::default()
            },
        )
        .await
        .expect_err("nothing to update");

    assert!(error.is_not_found());
}

#[tokio::test]
async fn remove_deletes_by_id() {
    let (service, store) = service_with_store(10);
    let created = create(&service, 1, "bulbasaur").await;

    service.remove(created.id).await.expect("remove should succeed");

    assert_eq!(store.count().await.expect("count"), 0);
    assert!(service.find_one("1").await.is_err());
}

#[tokio::test]
async fn remove_of_unknown_id_is_not_found_and_deletes_nothing() {
    let (service, store) = service_with_store(10);
    create(&service, 1, "bulbasaur").await;

    let error = service
        .remove(CreatureId::new())
        .await
        .expect_err("unknown id");

    assert!(matches!(error, DomainError::NotFound(_)));
    assert_eq!(store.count().await.expect("count"), 1);
}
