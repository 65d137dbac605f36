//! Gelbooru DAPI client.

use crate::GelbooruConfig;
use async_trait::async_trait;
use culture_core::{Post, PostId, SearchQuery};
use culture_error::{CultureResult, HttpError, JsonError};
use culture_interface::PostSource;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Envelope of a DAPI post listing. `post` is absent when nothing matched.
#[derive(Debug, Deserialize)]
struct PostListResponse {
    #[serde(default)]
    post: Vec<Post>,
}

/// Parse the body of a DAPI post listing.
///
/// An empty body, a body without a `post` field, or a non-object body all
/// mean "no posts".
///
/// # Examples
///
/// ```
/// use culture_gelbooru::parse_post_list;
///
/// let posts = parse_post_list(r#"{"@attributes":{"count":0}}"#).unwrap();
/// assert!(posts.is_empty());
/// ```
pub fn parse_post_list(body: &str) -> CultureResult<Vec<Post>> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = serde_json::from_str(body).map_err(JsonError::from)?;
    if !value.is_object() {
        return Ok(Vec::new());
    }

    let response: PostListResponse = serde_json::from_value(value).map_err(JsonError::from)?;
    Ok(response.post)
}

/// HTTP client for the Gelbooru API.
#[derive(Debug, Clone)]
pub struct GelbooruClient {
    http: reqwest::Client,
    config: GelbooruConfig,
}

impl GelbooruClient {
    /// Create a client with its own connection pool.
    pub fn new(config: GelbooruConfig) -> CultureResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("culture/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(HttpError::from)?;
        Ok(Self::with_http_client(http, config))
    }

    /// Create a client sharing an existing connection pool.
    pub fn with_http_client(http: reqwest::Client, config: GelbooruConfig) -> Self {
        Self { http, config }
    }

    /// The configuration this client uses.
    pub fn config(&self) -> &GelbooruConfig {
        &self.config
    }

    #[instrument(skip(self, params), fields(base_url = %self.config.base_url()))]
    async fn request_posts(&self, params: Vec<(&'static str, String)>) -> CultureResult<Vec<Post>> {
        let mut query: Vec<(&'static str, String)> = vec![
            ("page", "dapi".to_string()),
            ("s", "post".to_string()),
            ("q", "index".to_string()),
            ("json", "1".to_string()),
        ];
        if let Some(key) = self.config.api_key() {
            query.push(("api_key", key.clone()));
        }
        if let Some(user) = self.config.api_user() {
            query.push(("api_user", user.clone()));
        }
        query.extend(params);

        let response = self
            .http
            .get(self.config.base_url())
            .query(&query)
            .send()
            .await
            .map_err(HttpError::from)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Gelbooru request failed");
            return Err(HttpError::with_status(
                status.as_u16(),
                format!("Request failed with status {}", status),
            )
            .into());
        }

        let body = response.text().await.map_err(HttpError::from)?;
        let posts = parse_post_list(&body)?;
        debug!(count = posts.len(), "Received posts");
        Ok(posts)
    }
}

#[async_trait]
impl PostSource for GelbooruClient {
    #[instrument(skip(self), fields(tags = %query.tags(), limit = query.limit()))]
    async fn search(&self, query: &SearchQuery) -> CultureResult<Vec<Post>> {
        let mut posts = self
            .request_posts(vec![
                ("tags", query.tags().clone()),
                ("limit", query.limit().to_string()),
            ])
            .await?;
        posts.truncate(*query.limit() as usize);
        Ok(posts)
    }

    #[instrument(skip(self), fields(post_id = %id))]
    async fn post_by_id(&self, id: PostId) -> CultureResult<Option<Post>> {
        let posts = self.request_posts(vec![("id", id.to_string())]).await?;
        Ok(posts.into_iter().find(|post| *post.id() == id))
    }
}
