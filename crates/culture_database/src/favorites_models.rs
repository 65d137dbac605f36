//! Favorites table models.

use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Database row for the favorites table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::favorites)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FavoriteRow {
    /// Insertion order
    pub id: i32,
    /// Discord snowflake of the user
    pub user_id: i64,
    /// Gelbooru post id
    pub post_id: i64,
    /// When the post was favorited
    pub created_at: NaiveDateTime,
}

/// Insertable struct for the favorites table.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = crate::schema::favorites)]
pub struct NewFavorite {
    /// Discord snowflake of the user
    pub user_id: i64,
    /// Gelbooru post id
    pub post_id: i64,
}
