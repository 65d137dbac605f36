//! Identifier newtypes.

use serde::{Deserialize, Serialize};

/// Stable identity of a post on the image board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl PostId {
    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Stable external identity of a chat user (a Discord snowflake).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}
