mod common;

use sqlx::PgPool;
use std::sync::Arc;
use base62_url_shortener::domain::repositories::UserRepository;
use base62_url_shortener::error::AppError;
use base62_url_shortener::infrastructure::persistence::PgUserRepository;

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create("alice").await.unwrap();
    let found = repo.find_by_name("alice").await.unwrap().unwrap();

    assert_eq!(found.id, user.id);
    assert_eq!(found.name, "alice");
    assert!(repo.find_by_name("nobody").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_name_conflicts(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create("alice").await.unwrap();
    let err = repo.create("alice").await.unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_users_in_creation_order(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create("alice").await.unwrap();
    repo.create("bob").await.unwrap();

    let names: Vec<_> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.name)
        .collect();

    assert_eq!(names, vec!["alice", "bob"]);
}
