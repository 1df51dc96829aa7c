//! End-to-end behaviour of the URL registry over in-memory storage.

use std::collections::HashSet;
use std::sync::Arc;

use base62_url_shortener::application::services::UrlService;
use base62_url_shortener::domain::entities::OwnerId;
use base62_url_shortener::domain::repositories::UrlRepository;
use base62_url_shortener::error::AppError;
use base62_url_shortener::infrastructure::memory::MemoryUrlRepository;

const BASE_URL: &str = "https://s.example.com";

fn registry(repo: MemoryUrlRepository) -> (UrlService<MemoryUrlRepository>, Arc<MemoryUrlRepository>) {
    let repo = Arc::new(repo);
    (UrlService::new(repo.clone(), BASE_URL), repo)
}

#[tokio::test]
async fn test_create_and_resolve_google() {
    let (service, _) = registry(MemoryUrlRepository::starting_at(100));

    let record = service.create("https://www.google.com", None).await.unwrap();
    assert_eq!(record.short_code(), "1C");
    assert_eq!(service.short_url(&record), "https://s.example.com/1C");

    let resolved = service.resolve("1C").await.unwrap().unwrap();
    assert_eq!(resolved.url, "https://www.google.com");
    assert_eq!(resolved.id, 100);
}

#[tokio::test]
async fn test_invalid_url_creates_nothing() {
    let (service, repo) = registry(MemoryUrlRepository::new());

    let err = service.create("not a url", None).await.unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(repo.count().await.unwrap(), 0);

    // The next valid create still gets the first id.
    let record = service.create("https://example.com", None).await.unwrap();
    assert_eq!(record.id, 1);
}

#[tokio::test]
async fn test_unknown_and_garbage_codes_are_not_found() {
    let (service, _) = registry(MemoryUrlRepository::new());
    service.create("https://example.com", None).await.unwrap();

    assert!(service.resolve("zzz").await.unwrap().is_none());
    assert!(service.resolve("#@!").await.unwrap().is_none());
    assert!(service.resolve("").await.unwrap().is_none());
}

#[tokio::test]
async fn test_owner_listing_is_complete_ordered_and_exclusive() {
    let (service, _) = registry(MemoryUrlRepository::new());
    let alice = OwnerId::new(1);
    let bob = OwnerId::new(2);

    let a1 = service.create("https://a.com/1", Some(alice)).await.unwrap();
    service.create("https://b.com/1", Some(bob)).await.unwrap();
    service.create("https://anon.com", None).await.unwrap();
    let a2 = service.create("https://a.com/2", Some(alice)).await.unwrap();

    let listed = service.list_by_owner(alice).await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, a1.id);
    assert_eq!(listed[1].id, a2.id);
    assert!(listed.iter().all(|r| r.is_owned_by(alice)));

    assert!(service.list_by_owner(OwnerId::new(99)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resolution_does_not_check_owner() {
    let (service, _) = registry(MemoryUrlRepository::new());

    let record = service
        .create("https://private.example.com", Some(OwnerId::new(1)))
        .await
        .unwrap();

    let resolved = service.resolve(&record.short_code()).await.unwrap();
    assert_eq!(resolved.unwrap().url, "https://private.example.com");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_codes() {
    let (service, repo) = registry(MemoryUrlRepository::new());
    let service = Arc::new(service);

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create(&format!("https://example.com/{}", i), None)
                    .await
                    .unwrap()
                    .short_code()
            })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        assert!(codes.insert(handle.await.unwrap()));
    }

    assert_eq!(codes.len(), 64);
    assert_eq!(repo.count().await.unwrap(), 64);

    for code in &codes {
        assert!(service.resolve(code).await.unwrap().is_some());
    }
}
