//! Shared fixtures for the Discord integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use culture_cache::CacheConfig;
use culture_carousel::{CarouselRegistry, CarouselServices};
use culture_core::{Color, Post, PostId, PostRating, SearchQuery};
use culture_database::InMemoryFavoritesRepository;
use culture_error::CultureResult;
use culture_interface::{ColorSource, PostSource};
use std::sync::Arc;

pub const POST_PAGE: &str = "https://booru.test/view?id=";
pub const COLOR: Color = Color::from_rgb(0x33, 0x66, 0x99);

/// A board holding a fixed list of posts.
#[derive(Debug, Default)]
pub struct StaticPosts(pub Vec<Post>);

#[async_trait]
impl PostSource for StaticPosts {
    async fn search(&self, query: &SearchQuery) -> CultureResult<Vec<Post>> {
        Ok(self.0.iter().take(*query.limit() as usize).cloned().collect())
    }

    async fn post_by_id(&self, id: PostId) -> CultureResult<Option<Post>> {
        Ok(self.0.iter().find(|post| *post.id() == id).cloned())
    }
}

#[derive(Debug)]
pub struct FixedColor;

#[async_trait]
impl ColorSource for FixedColor {
    async fn dominant_color(&self, _preview_url: &str) -> Color {
        COLOR
    }
}

pub fn post(id: u64, extension: &str) -> Post {
    Post::builder()
        .id(PostId(id))
        .created_at("Sat Oct 12 01:23:45 -0500 2024")
        .score(7)
        .rating(PostRating::Sensitive)
        .file_url(format!("https://img.test/{id}.{extension}"))
        .preview_url(format!("https://img.test/thumb_{id}.jpg"))
        .build()
        .expect("Failed to build test post")
}

/// A registry over `posts`, with empty favorites and unbounded retention.
pub fn registry(posts: Vec<Post>) -> Arc<CarouselRegistry> {
    let services = CarouselServices::new(
        Arc::new(StaticPosts(posts)),
        Arc::new(InMemoryFavoritesRepository::new()),
        Arc::new(FixedColor),
        POST_PAGE,
    );
    Arc::new(CarouselRegistry::new(services, CacheConfig::default()))
}
