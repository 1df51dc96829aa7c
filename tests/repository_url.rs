mod common;

use sqlx::PgPool;
use std::sync::Arc;
use base62_url_shortener::domain::entities::{NewUrlRecord, OwnerId};
use base62_url_shortener::domain::repositories::UrlRepository;
use base62_url_shortener::infrastructure::persistence::PgUrlRepository;

fn new_record(url: &str, owner: Option<i64>) -> NewUrlRecord {
    NewUrlRecord {
        url: url.to_string(),
        owner: owner.map(OwnerId::new),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_assigns_increasing_ids(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let first = repo.insert(new_record("https://a.com", None)).await.unwrap();
    let second = repo.insert(new_record("https://a.com", None)).await.unwrap();

    assert!(first.id >= 1);
    assert!(second.id > first.id);
    assert_eq!(first.url, "https://a.com");
    assert!(first.owner.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_id(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let inserted = repo
        .insert(new_record("https://www.google.com", None))
        .await
        .unwrap();

    let found = repo.find_by_id(inserted.id).await.unwrap().unwrap();
    assert_eq!(found, inserted);

    assert!(repo.find_by_id(inserted.id + 1000).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_id_beyond_bigint_is_none(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert!(repo.find_by_id(u64::MAX).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_by_owner(pool: PgPool) {
    let alice = common::create_pg_user(&pool, "alice").await;
    let bob = common::create_pg_user(&pool, "bob").await;
    let repo = PgUrlRepository::new(Arc::new(pool));

    let a1 = repo.insert(new_record("https://a.com/1", Some(alice))).await.unwrap();
    repo.insert(new_record("https://b.com", Some(bob))).await.unwrap();
    repo.insert(new_record("https://anon.com", None)).await.unwrap();
    let a2 = repo.insert(new_record("https://a.com/2", Some(alice))).await.unwrap();

    let listed = repo.list_by_owner(OwnerId::new(alice)).await.unwrap();

    assert_eq!(listed, vec![a1, a2]);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_count(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert_eq!(repo.count().await.unwrap(), 0);

    repo.insert(new_record("https://a.com", None)).await.unwrap();
    repo.insert(new_record("https://b.com", None)).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_state_over_postgres_round_trip(pool: PgPool) {
    let state = common::create_pg_state(pool);

    let record = state
        .url_service
        .create("https://www.google.com", None)
        .await
        .unwrap();

    let resolved = state
        .url_service
        .resolve(&record.short_code())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(resolved.url, "https://www.google.com");
}
