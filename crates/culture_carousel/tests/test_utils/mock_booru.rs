//! Mock collaborators.

use async_trait::async_trait;
use culture_core::{Color, Post, PostId, SearchQuery, UserId};
use culture_error::{CultureResult, DatabaseError, DatabaseErrorKind, HttpError};
use culture_interface::{ColorSource, FavoritesRepository, PostSource};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory image board with failure injection and call counting.
#[derive(Debug, Default)]
pub struct MockPostSource {
    search_results: Mutex<Vec<Post>>,
    posts: Mutex<HashMap<PostId, Post>>,
    failing: AtomicBool,
    search_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
    last_query: Mutex<Option<SearchQuery>>,
}

impl MockPostSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose searches return `posts` and whose lookups find them.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let source = Self::new();
        source.set_search_results(posts.clone());
        for post in posts {
            source.insert(post);
        }
        source
    }

    pub fn set_search_results(&self, posts: Vec<Post>) {
        *self.search_results.lock() = posts;
    }

    pub fn insert(&self, post: Post) {
        self.posts.lock().insert(*post.id(), post);
    }

    pub fn delete(&self, id: PostId) {
        self.posts.lock().remove(&id);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<SearchQuery> {
        self.last_query.lock().clone()
    }

    fn check_failing(&self) -> CultureResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(HttpError::with_status(503, "Service unavailable").into());
        }
        Ok(())
    }
}

#[async_trait]
impl PostSource for MockPostSource {
    async fn search(&self, query: &SearchQuery) -> CultureResult<Vec<Post>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock() = Some(query.clone());
        self.check_failing()?;

        let results = self.search_results.lock();
        Ok(results
            .iter()
            .take(*query.limit() as usize)
            .cloned()
            .collect())
    }

    async fn post_by_id(&self, id: PostId) -> CultureResult<Option<Post>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        Ok(self.posts.lock().get(&id).cloned())
    }
}

/// Color source returning one color for every image.
#[derive(Debug)]
pub struct FixedColor(pub Color);

impl Default for FixedColor {
    fn default() -> Self {
        Self(Color::from_rgb(0x33, 0x66, 0x99))
    }
}

#[async_trait]
impl ColorSource for FixedColor {
    async fn dominant_color(&self, _preview_url: &str) -> Color {
        self.0
    }
}

/// Favorites store that is always down.
#[derive(Debug, Default)]
pub struct FailingFavorites;

impl FailingFavorites {
    fn unavailable<T>() -> CultureResult<T> {
        Err(DatabaseError::new(DatabaseErrorKind::Connection("database is locked".to_string())).into())
    }
}

#[async_trait]
impl FavoritesRepository for FailingFavorites {
    async fn favorites(&self, _user: UserId) -> CultureResult<Vec<PostId>> {
        Self::unavailable()
    }

    async fn add_favorite(&self, _user: UserId, _post: PostId) -> CultureResult<bool> {
        Self::unavailable()
    }

    async fn remove_favorite(&self, _user: UserId, _post: PostId) -> CultureResult<bool> {
        Self::unavailable()
    }

    async fn is_favorite(&self, _user: UserId, _post: PostId) -> CultureResult<bool> {
        Self::unavailable()
    }
}
