//! Core data types for the Culture bot.
//!
//! These types are shared by the image API client, the favorites store, the
//! carousel core and the Discord layer. They carry no I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod color;
mod ids;
mod outcome;
mod post;
mod search;

pub use color::Color;
pub use ids::{PostId, UserId};
pub use outcome::FetchOutcome;
pub use post::{Post, PostBuilder, PostRating};
pub use search::{SearchOptions, SearchQuery};
