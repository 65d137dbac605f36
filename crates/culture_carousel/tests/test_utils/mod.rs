//! Test utilities for carousel tests.
//!
//! This module provides mock collaborators and post fixtures.

#![allow(dead_code)]

pub mod mock_booru;

use culture_carousel::CarouselServices;
use culture_core::{Post, PostId, PostRating};
use culture_database::InMemoryFavoritesRepository;
use culture_interface::FavoritesRepository;
use std::sync::Arc;

#[allow(unused_imports)]
pub use mock_booru::{FailingFavorites, FixedColor, MockPostSource};

pub const POST_PAGE: &str = "https://booru.test/view?id=";

/// A displayable post with the given id.
pub fn post(id: u64) -> Post {
    Post::builder()
        .id(PostId(id))
        .created_at("Sat Oct 12 01:23:45 -0500 2024")
        .score(id as i64)
        .rating(PostRating::General)
        .file_url(format!("https://img.test/{id}.png"))
        .preview_url(format!("https://img.test/thumb_{id}.jpg"))
        .build()
        .expect("Failed to build test post")
}

/// Services over the given source and favorites store.
pub fn services(
    posts: Arc<MockPostSource>,
    favorites: Arc<dyn FavoritesRepository>,
) -> CarouselServices {
    CarouselServices::new(posts, favorites, Arc::new(FixedColor::default()), POST_PAGE)
}

/// Services with an empty in-memory favorites store.
pub fn services_with_memory(posts: Arc<MockPostSource>) -> CarouselServices {
    services(posts, Arc::new(InMemoryFavoritesRepository::new()))
}
