//! Search criteria for the image API.

use crate::PostRating;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Tag appended to a search when random ordering is requested.
const RANDOM_SORT_TAG: &str = "sort:random";

/// Criteria sent to the image API: a tag string and a result limit.
///
/// A search carousel keeps its query so that a refresh re-runs exactly the
/// same search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct SearchQuery {
    /// Space-separated tag expression
    tags: String,
    /// Maximum number of posts requested
    limit: u32,
}

impl SearchQuery {
    /// Create a query. A limit of zero is raised to one.
    pub fn new(tags: impl Into<String>, limit: u32) -> Self {
        Self {
            tags: tags.into(),
            limit: limit.max(1),
        }
    }

    /// Whether exactly one post was requested.
    pub fn is_single(&self) -> bool {
        self.limit == 1
    }
}

/// User-facing options of the `/culture` command.
///
/// # Examples
///
/// ```
/// use culture_core::{PostRating, SearchOptions};
///
/// let query = SearchOptions {
///     tags: Some("cat_ears  solo".to_string()),
///     random: None,
///     count: Some(3),
///     rating: Some(PostRating::General),
/// }
/// .into_query();
///
/// assert_eq!(query.tags(), "cat_ears solo sort:random rating:general");
/// assert_eq!(*query.limit(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Free-form tags, whitespace separated
    pub tags: Option<String>,
    /// Random ordering (defaults to true)
    pub random: Option<bool>,
    /// Number of posts (defaults to 1)
    pub count: Option<u32>,
    /// Restrict to a rating
    pub rating: Option<PostRating>,
}

impl SearchOptions {
    /// Build the API query these options describe.
    pub fn into_query(self) -> SearchQuery {
        let mut tags: Vec<String> = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        if self.random.unwrap_or(true) {
            tags.push(RANDOM_SORT_TAG.to_string());
        }

        if let Some(rating) = self.rating {
            tags.push(format!("rating:{rating}"));
        }

        SearchQuery::new(tags.join(" "), self.count.unwrap_or(1))
    }
}
