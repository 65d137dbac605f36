//! FavoritesRepository trait implementation backed by SQLite.

use crate::schema::favorites;
use crate::{DatabaseResult, FavoriteRow, NewFavorite, SqlitePool};
use async_trait::async_trait;
use culture_core::{PostId, UserId};
use culture_error::{CultureResult, DatabaseError, DatabaseErrorKind};
use culture_interface::FavoritesRepository;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::{debug, instrument};

/// Database-backed favorites repository.
///
/// Every operation is a single statement against the `(user_id, post_id)`
/// unique key, so concurrent toggles for the same user cannot lose updates.
#[derive(Clone)]
pub struct SqliteFavoritesRepository {
    pool: SqlitePool,
}

impl std::fmt::Debug for SqliteFavoritesRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteFavoritesRepository")
            .field("state", &self.pool.state())
            .finish()
    }
}

impl SqliteFavoritesRepository {
    /// Create a new favorites repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run a blocking query on a pooled connection.
    async fn with_connection<T, F>(&self, query: F) -> CultureResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> DatabaseResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            query(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Task(e.to_string())))?;

        Ok(result?)
    }
}

fn user_key(user: UserId) -> i64 {
    user.get() as i64
}

fn post_key(post: PostId) -> i64 {
    post.get() as i64
}

#[async_trait]
impl FavoritesRepository for SqliteFavoritesRepository {
    #[instrument(skip(self), fields(user_id = %user))]
    async fn favorites(&self, user: UserId) -> CultureResult<Vec<PostId>> {
        let rows = self
            .with_connection(move |conn| {
                favorites::table
                    .filter(favorites::user_id.eq(user_key(user)))
                    .order(favorites::id.asc())
                    .select(FavoriteRow::as_select())
                    .load(conn)
                    .map_err(DatabaseError::from)
            })
            .await?;

        debug!(
            count = rows.len(),
            latest = ?rows.last().map(|row| row.created_at),
            "Loaded favorites"
        );
        Ok(rows.into_iter().map(|row| PostId(row.post_id as u64)).collect())
    }

    #[instrument(skip(self), fields(user_id = %user, post_id = %post))]
    async fn add_favorite(&self, user: UserId, post: PostId) -> CultureResult<bool> {
        let inserted = self
            .with_connection(move |conn| {
                diesel::insert_or_ignore_into(favorites::table)
                    .values(NewFavorite {
                        user_id: user_key(user),
                        post_id: post_key(post),
                    })
                    .execute(conn)
                    .map_err(DatabaseError::from)
            })
            .await?;

        debug!(inserted, "Added favorite");
        Ok(inserted > 0)
    }

    #[instrument(skip(self), fields(user_id = %user, post_id = %post))]
    async fn remove_favorite(&self, user: UserId, post: PostId) -> CultureResult<bool> {
        let deleted = self
            .with_connection(move |conn| {
                diesel::delete(
                    favorites::table
                        .filter(favorites::user_id.eq(user_key(user)))
                        .filter(favorites::post_id.eq(post_key(post))),
                )
                .execute(conn)
                .map_err(DatabaseError::from)
            })
            .await?;

        debug!(deleted, "Removed favorite");
        Ok(deleted > 0)
    }

    #[instrument(skip(self), fields(user_id = %user, post_id = %post))]
    async fn is_favorite(&self, user: UserId, post: PostId) -> CultureResult<bool> {
        self.with_connection(move |conn| {
            diesel::select(diesel::dsl::exists(
                favorites::table
                    .filter(favorites::user_id.eq(user_key(user)))
                    .filter(favorites::post_id.eq(post_key(post))),
            ))
            .get_result::<bool>(conn)
            .map_err(DatabaseError::from)
        })
        .await
    }
}
