//! Result of materialising one post.

use crate::{Post, PostId};
use serde::{Deserialize, Serialize};

/// Tagged result of trying to materialise one [`Post`].
///
/// Failures are data, not errors: they flow through the carousel to the
/// renderer, which maps each kind to its own message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From)]
pub enum FetchOutcome {
    /// The post was resolved.
    #[from]
    Found(Post),
    /// The collection that should hold the post is empty.
    NotFound,
    /// A by-id lookup returned nothing.
    MissingItem(PostId),
    /// The image API could not be reached; revisiting retries.
    TransientError(String),
}

impl FetchOutcome {
    /// Wrap any displayable failure as a transient error.
    pub fn transient(cause: impl std::fmt::Display) -> Self {
        FetchOutcome::TransientError(cause.to_string())
    }

    /// Whether the outcome holds a post.
    pub fn is_found(&self) -> bool {
        matches!(self, FetchOutcome::Found(_))
    }

    /// Whether the outcome denotes an empty collection.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchOutcome::NotFound)
    }

    /// The resolved post, if any.
    pub fn post(&self) -> Option<&Post> {
        match self {
            FetchOutcome::Found(post) => Some(post),
            _ => None,
        }
    }
}
