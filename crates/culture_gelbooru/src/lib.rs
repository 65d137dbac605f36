//! Gelbooru integration for the Culture bot.
//!
//! - [`GelbooruClient`] implements [`culture_interface::PostSource`] over the
//!   Gelbooru DAPI (`page=dapi&s=post&q=index&json=1`).
//! - [`DominantColorExtractor`] implements [`culture_interface::ColorSource`]
//!   by sampling preview thumbnails, memoised per preview URL.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod colors;
mod config;

pub use client::{GelbooruClient, parse_post_list};
pub use colors::{DEFAULT_COLOR_CACHE_SIZE, DominantColorExtractor, extract_dominant_color};
pub use config::GelbooruConfig;
