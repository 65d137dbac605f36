//! Tests for bootstrap wiring.

use culture::{CultureConfig, build_registry, open_favorites};
use culture_core::{PostId, UserId};
use culture_interface::FavoritesRepository;

fn config(database_url: &str) -> CultureConfig {
    CultureConfig::from_sources(
        None,
        [
            ("BOT_TOKEN", "token"),
            ("GELBOORU_API_KEY", "key"),
            ("GELBOORU_API_USER", "1"),
            ("DATABASE_URL", database_url),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string())),
    )
    .expect("Failed to load config")
}

#[tokio::test]
async fn test_sqlite_favorites_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = dir.path().join("data").join("db.sqlite");
    let config = config(url.to_str().unwrap());

    let favorites = open_favorites(&config, false).unwrap();
    assert!(favorites.add_favorite(UserId(1), PostId(10)).await.unwrap());
    drop(favorites);

    let reopened = open_favorites(&config, false).unwrap();
    assert_eq!(
        reopened.favorites(UserId(1)).await.unwrap(),
        vec![PostId(10)]
    );
}

#[tokio::test]
async fn test_ephemeral_favorites_skip_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = dir.path().join("never").join("db.sqlite");
    let config = config(url.to_str().unwrap());

    let favorites = open_favorites(&config, true).unwrap();
    assert!(favorites.add_favorite(UserId(1), PostId(10)).await.unwrap());
    assert!(!url.exists());
}

#[tokio::test]
async fn test_registry_starts_empty() {
    let config = config(":memory:");
    let favorites = open_favorites(&config, true).unwrap();

    let registry = build_registry(&config, favorites).unwrap();

    assert!(registry.is_empty());
    assert_eq!(
        registry.services().post_page(PostId(5)),
        "https://gelbooru.com/index.php?page=post&s=view&id=5"
    );
}
