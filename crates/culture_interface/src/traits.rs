//! Collaborator traits.

use async_trait::async_trait;
use culture_core::{Color, Post, PostId, SearchQuery, UserId};
use culture_error::CultureResult;

/// Read access to the image board.
///
/// Implementations report transport and decoding failures as errors; the
/// carousel converts them into `FetchOutcome::TransientError`.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Search posts matching `query`, returning at most `query.limit()` posts.
    async fn search(&self, query: &SearchQuery) -> CultureResult<Vec<Post>>;

    /// Look up a single post. `Ok(None)` means the board has no such post.
    async fn post_by_id(&self, id: PostId) -> CultureResult<Option<Post>>;
}

/// Per-user favorite post sets.
///
/// Membership changes are single atomic primitives at the persistence
/// boundary, so two concurrent toggles for the same user never overwrite
/// each other's snapshot.
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Favorites of `user` in the order they were added. Unknown users have
    /// an empty list.
    async fn favorites(&self, user: UserId) -> CultureResult<Vec<PostId>>;

    /// Add `post` to the favorites of `user`. Returns `false` when it was
    /// already present.
    async fn add_favorite(&self, user: UserId, post: PostId) -> CultureResult<bool>;

    /// Remove `post` from the favorites of `user`. Returns `false` when it was
    /// not present.
    async fn remove_favorite(&self, user: UserId, post: PostId) -> CultureResult<bool>;

    /// Whether `post` is a favorite of `user`.
    async fn is_favorite(&self, user: UserId, post: PostId) -> CultureResult<bool>;
}

/// Dominant color of a preview image.
///
/// Infallible by contract: implementations degrade to a default color.
#[async_trait]
pub trait ColorSource: Send + Sync {
    /// Dominant color of the image at `preview_url`.
    async fn dominant_color(&self, preview_url: &str) -> Color;
}
