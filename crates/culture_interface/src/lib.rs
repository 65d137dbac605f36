//! Trait definitions for the Culture bot.
//!
//! The carousel core consumes its collaborators only through these traits:
//! the image search API, favorites persistence and color extraction.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ColorSource, FavoritesRepository, PostSource};
