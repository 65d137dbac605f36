//! Collaborators shared by every carousel.

use culture_interface::{ColorSource, FavoritesRepository, PostSource};
use std::sync::Arc;

/// Handles to the image API, the favorites store and the color extractor,
/// plus the URL prefix of a post's web page.
#[derive(Clone)]
pub struct CarouselServices {
    posts: Arc<dyn PostSource>,
    favorites: Arc<dyn FavoritesRepository>,
    colors: Arc<dyn ColorSource>,
    post_page_url: String,
}

impl CarouselServices {
    /// Bundle the collaborators. `post_page_url` is followed by the post id
    /// to build the link of the 🔎 button.
    pub fn new(
        posts: Arc<dyn PostSource>,
        favorites: Arc<dyn FavoritesRepository>,
        colors: Arc<dyn ColorSource>,
        post_page_url: impl Into<String>,
    ) -> Self {
        Self {
            posts,
            favorites,
            colors,
            post_page_url: post_page_url.into(),
        }
    }

    /// Image API.
    pub fn posts(&self) -> &Arc<dyn PostSource> {
        &self.posts
    }

    /// Favorites store.
    pub fn favorites(&self) -> &Arc<dyn FavoritesRepository> {
        &self.favorites
    }

    /// Dominant color extractor.
    pub fn colors(&self) -> &Arc<dyn ColorSource> {
        &self.colors
    }

    /// Web page of a post.
    pub fn post_page(&self, id: culture_core::PostId) -> String {
        format!("{}{}", self.post_page_url, id)
    }
}

impl std::fmt::Debug for CarouselServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselServices")
            .field("post_page_url", &self.post_page_url)
            .finish_non_exhaustive()
    }
}
