//! Image board posts.

use crate::PostId;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Format of Gelbooru's `created_at` field, e.g. `Sat Oct 12 01:23:45 -0500 2024`.
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// File extensions Discord can display inline in an embed.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Content rating of a post.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PostRating {
    /// Suitable for everyone
    #[default]
    General,
    /// Legacy "safe" rating
    Safe,
    /// Mildly suggestive
    Sensitive,
    /// Questionable content
    Questionable,
    /// Explicit content
    Explicit,
}

/// A post returned by the image API.
///
/// Immutable once fetched. The carousel only relies on [`Post::id`] for
/// identity; everything else is renderable metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct Post {
    /// Post identifier
    id: PostId,
    /// Raw creation timestamp as sent by the API
    #[serde(default)]
    created_at: String,
    /// Community score
    #[serde(default)]
    score: i64,
    /// Content rating
    #[serde(default)]
    rating: PostRating,
    /// Full-size file URL
    #[serde(default)]
    file_url: String,
    /// Thumbnail URL, used for color extraction
    #[serde(default)]
    preview_url: String,
    /// Space-separated tag list
    #[serde(default)]
    tags: String,
    /// File width in pixels
    #[serde(default)]
    width: u32,
    /// File height in pixels
    #[serde(default)]
    height: u32,
}

impl Default for Post {
    fn default() -> Self {
        Self {
            id: PostId(0),
            created_at: String::new(),
            score: 0,
            rating: PostRating::default(),
            file_url: String::new(),
            preview_url: String::new(),
            tags: String::new(),
            width: 0,
            height: 0,
        }
    }
}

impl Post {
    /// Creates a new post builder.
    pub fn builder() -> PostBuilder {
        PostBuilder::default()
    }

    /// Parsed creation time, if the API sent a well-formed timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use culture_core::Post;
    ///
    /// let post = Post::builder()
    ///     .created_at("Sat Oct 12 01:23:45 -0500 2024")
    ///     .build()
    ///     .unwrap();
    /// let timestamp = post.timestamp().unwrap();
    /// assert_eq!(timestamp.to_rfc3339(), "2024-10-12T06:23:45+00:00");
    /// ```
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether the file can be displayed inline as an image.
    pub fn is_image(&self) -> bool {
        let path = self.file_url.split(['?', '#']).next().unwrap_or_default();
        path.rsplit_once('.')
            .map(|(_, ext)| {
                IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
