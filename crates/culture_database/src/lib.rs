//! SQLite persistence for the Culture bot.
//!
//! This crate stores per-user favorite posts. It provides:
//!
//! - Connection pooling (diesel + r2d2) and embedded migrations
//! - [`SqliteFavoritesRepository`], the durable [`FavoritesRepository`] implementation
//! - [`InMemoryFavoritesRepository`], a process-local implementation for
//!   ephemeral runs and tests
//!
//! Favorites are stored one row per `(user_id, post_id)` pair with a unique
//! constraint, so adding and removing are single statements rather than a
//! read-modify-write of the whole list.
//!
//! [`FavoritesRepository`]: culture_interface::FavoritesRepository
//!
//! # Example
//!
//! ```rust,ignore
//! use culture_database::{SqliteFavoritesRepository, establish_pool, run_migrations};
//!
//! let pool = establish_pool("/var/lib/culture/db.sqlite")?;
//! run_migrations(&mut pool.get()?)?;
//! let favorites = SqliteFavoritesRepository::new(pool);
//! ```

mod connection;
mod favorites_models;
mod favorites_repository;
mod memory;

pub mod schema;

pub use connection::{SqlitePool, establish_pool, run_migrations};
pub use favorites_models::{FavoriteRow, NewFavorite};
pub use favorites_repository::SqliteFavoritesRepository;
pub use memory::InMemoryFavoritesRepository;

use culture_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
