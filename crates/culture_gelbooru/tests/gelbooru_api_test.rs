//! Live Gelbooru lookups. Run with `--features api` and
//! `GELBOORU_API_KEY` / `GELBOORU_API_USER` set (a `.env` file works).

use culture_core::{PostId, SearchQuery};
use culture_gelbooru::{GelbooruClient, GelbooruConfig};
use culture_interface::PostSource;
use std::env;

fn live_client() -> GelbooruClient {
    dotenvy::dotenv().ok();
    let config = GelbooruConfig::default()
        .with_api_key(env::var("GELBOORU_API_KEY").expect("GELBOORU_API_KEY not set"))
        .with_api_user(env::var("GELBOORU_API_USER").expect("GELBOORU_API_USER not set"));
    GelbooruClient::new(config).expect("Failed to build Gelbooru client")
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_search_then_lookup_by_id() {
    let client = live_client();

    let posts = client
        .search(&SearchQuery::new("rating:general sort:score", 2))
        .await
        .expect("Search failed");
    assert!(!posts.is_empty());
    assert!(posts.len() <= 2);

    let first = &posts[0];
    let found = client
        .post_by_id(*first.id())
        .await
        .expect("Lookup failed")
        .expect("Searched post should resolve by id");
    assert_eq!(found.id(), first.id());
    assert_eq!(found.file_url(), first.file_url());
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_lookup_of_unknown_id_is_none() {
    let client = live_client();

    let missing = client
        .post_by_id(PostId(999_999_999))
        .await
        .expect("Lookup failed");
    assert!(missing.is_none());
}
