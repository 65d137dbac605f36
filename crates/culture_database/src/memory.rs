//! Process-local favorites store.

use async_trait::async_trait;
use culture_core::{PostId, UserId};
use culture_error::CultureResult;
use culture_interface::FavoritesRepository;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Favorites kept in memory, lost at shutdown.
///
/// Each operation takes the lock once, so membership changes are atomic in
/// the same way as the SQLite implementation.
#[derive(Debug, Default)]
pub struct InMemoryFavoritesRepository {
    entries: RwLock<HashMap<UserId, Vec<PostId>>>,
}

impl InMemoryFavoritesRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with favorites, in order.
    pub fn with_favorites(user: UserId, posts: impl IntoIterator<Item = PostId>) -> Self {
        let mut list: Vec<PostId> = Vec::new();
        for post in posts {
            if !list.contains(&post) {
                list.push(post);
            }
        }
        Self {
            entries: RwLock::new(HashMap::from([(user, list)])),
        }
    }
}

#[async_trait]
impl FavoritesRepository for InMemoryFavoritesRepository {
    async fn favorites(&self, user: UserId) -> CultureResult<Vec<PostId>> {
        Ok(self.entries.read().get(&user).cloned().unwrap_or_default())
    }

    async fn add_favorite(&self, user: UserId, post: PostId) -> CultureResult<bool> {
        let mut entries = self.entries.write();
        let list = entries.entry(user).or_default();
        if list.contains(&post) {
            return Ok(false);
        }
        list.push(post);
        Ok(true)
    }

    async fn remove_favorite(&self, user: UserId, post: PostId) -> CultureResult<bool> {
        let mut entries = self.entries.write();
        let Some(list) = entries.get_mut(&user) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|existing| *existing != post);
        Ok(list.len() != before)
    }

    async fn is_favorite(&self, user: UserId, post: PostId) -> CultureResult<bool> {
        Ok(self
            .entries
            .read()
            .get(&user)
            .is_some_and(|list| list.contains(&post)))
    }
}
