//! Gelbooru client configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Connection settings for the Gelbooru API.
///
/// # Example
///
/// ```toml
/// [gelbooru]
/// api_key = "..."
/// api_user = "123456"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct GelbooruConfig {
    /// DAPI endpoint
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Public page of a post; the post id is appended
    #[serde(default = "default_post_page_url")]
    post_page_url: String,

    /// API key from the account settings page
    #[serde(default)]
    #[setters(strip_option, into)]
    api_key: Option<String>,

    /// Numeric user id matching the API key
    #[serde(default)]
    #[setters(strip_option, into)]
    api_user: Option<String>,
}

fn default_base_url() -> String {
    "https://gelbooru.com/index.php".to_string()
}

fn default_post_page_url() -> String {
    "https://gelbooru.com/index.php?page=post&s=view&id=".to_string()
}

impl Default for GelbooruConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            post_page_url: default_post_page_url(),
            api_key: None,
            api_user: None,
        }
    }
}

impl GelbooruConfig {
    /// Whether both credentials are set.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.api_user.is_some()
    }
}
