//! Interactive carousels.

use crate::render::{Control, ControlRow, ControlStyle, EmbedContent, Notice, RenderedMessage};
use crate::{CarouselData, CarouselServices, ControlId};
use culture_core::{Color, FetchOutcome, Post, SearchQuery, UserId};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Process-unique identity of a carousel, embedded in its control ids.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    derive_more::Display,
    derive_more::From,
)]
pub struct CarouselId(Uuid);

impl CarouselId {
    /// A fresh random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CarouselId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for CarouselId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Actions a carousel control can trigger.
///
/// The lowercase name is the `<action>` segment of the control id.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum CarouselAction {
    /// Step back one post
    Previous,
    /// Step forward one post
    Next,
    /// Toggle the current post in the clicker's favorites
    Favorite,
    /// Hide or reveal the content (owner only)
    Hide,
    /// Re-run the search (owner only, search carousels)
    Refresh,
}

/// What a carousel is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselKind {
    /// Results of an image search; the query is kept for refresh
    Search {
        /// Query to re-run
        query: SearchQuery,
    },
    /// Someone's favorites
    Favorites {
        /// Whose favorites are listed
        favorites_user: UserId,
    },
}

/// Result of a handled action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResponse {
    /// Replace the shared message
    Update(RenderedMessage),
    /// Reply privately to the clicker; the shared message is untouched
    Reply(Notice),
    /// Reply privately, then replace the shared message
    UpdateWithNotice {
        /// New shared message
        message: RenderedMessage,
        /// Private reply
        notice: Notice,
    },
}

/// A stateful carousel message.
///
/// The owner is the user whose command created the carousel; only they can
/// hide it or refresh it. Anybody can page through it and favorite posts
/// for themselves.
pub struct Carousel {
    id: CarouselId,
    owner: UserId,
    hidden: bool,
    data: CarouselData,
    kind: CarouselKind,
    services: CarouselServices,
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("hidden", &self.hidden)
            .field("kind", &self.kind)
            .field("data", &self.data)
            .finish()
    }
}

impl Carousel {
    /// A carousel holding the empty placeholder. Call [`Carousel::refresh`]
    /// to load its posts.
    pub fn new(owner: UserId, kind: CarouselKind, services: CarouselServices) -> Self {
        Self {
            id: CarouselId::new(),
            owner,
            hidden: false,
            data: CarouselData::empty(),
            kind,
            services,
        }
    }

    /// Run `query` and wrap the results.
    pub async fn search(owner: UserId, query: SearchQuery, services: CarouselServices) -> Self {
        let mut carousel = Self::new(owner, CarouselKind::Search { query }, services);
        carousel.refresh().await;
        carousel
    }

    /// Page through the favorites of `favorites_user`.
    pub async fn favorites(
        owner: UserId,
        favorites_user: UserId,
        services: CarouselServices,
    ) -> Self {
        let mut carousel = Self::new(owner, CarouselKind::Favorites { favorites_user }, services);
        carousel.refresh().await;
        carousel
    }

    /// Identity.
    pub fn id(&self) -> CarouselId {
        self.id
    }

    /// User allowed to hide and refresh.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Whether the content is hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Backing data.
    pub fn data(&self) -> &CarouselData {
        &self.data
    }

    /// Search or favorites.
    pub fn kind(&self) -> &CarouselKind {
        &self.kind
    }

    /// Replace the data with a fresh load from the source.
    #[instrument(skip(self), fields(carousel_id = %self.id))]
    pub async fn refresh(&mut self) {
        let posts = Arc::clone(self.services.posts());
        self.data = match &self.kind {
            CarouselKind::Search { query } => CarouselData::from_search(posts, query).await,
            CarouselKind::Favorites { favorites_user } => {
                CarouselData::from_favorites(
                    posts,
                    self.services.favorites().as_ref(),
                    *favorites_user,
                )
                .await
            }
        };
        debug!(kind = %self.data.kind(), "Carousel data loaded");
    }

    /// Reload, then put the cursor back where it was, clamped to the new
    /// length.
    async fn refresh_keep_position(&mut self) {
        let previous = self.data.position().map(|(cursor, _)| cursor);
        self.refresh().await;
        if let Some(cursor) = previous {
            self.data.set_current(cursor);
        }
    }

    fn owns_favorites_view(&self, principal: UserId) -> bool {
        matches!(
            self.kind,
            CarouselKind::Favorites { favorites_user }
                if favorites_user == principal && self.owner == principal
        )
    }

    fn action_id(&self, action: CarouselAction) -> String {
        ControlId::new(action.as_ref(), self.id).to_string()
    }

    fn button(&self, action: CarouselAction, label: &str, style: ControlStyle) -> Control {
        Control::Button {
            action_id: self.action_id(action),
            label: label.to_string(),
            style,
            disabled: false,
        }
    }

    /// Dispatch an action by its control-id suffix.
    ///
    /// Returns `None` when this carousel does not handle the action: an
    /// unknown suffix, paging on single data, or refresh on a favorites
    /// carousel.
    #[instrument(skip(self), fields(carousel_id = %self.id, user_id = %principal))]
    pub async fn handle_action(&mut self, suffix: &str, principal: UserId) -> Option<ActionResponse> {
        let Ok(action) = suffix.parse::<CarouselAction>() else {
            warn!(suffix, "Unknown carousel action");
            return None;
        };

        match action {
            CarouselAction::Previous | CarouselAction::Next if !self.data.is_multi() => None,
            CarouselAction::Previous => {
                let outcome = self.data.previous().await;
                Some(ActionResponse::Update(self.present(outcome).await))
            }
            CarouselAction::Next => {
                let outcome = self.data.next().await;
                Some(ActionResponse::Update(self.present(outcome).await))
            }
            CarouselAction::Favorite => Some(self.toggle_favorite(principal).await),
            CarouselAction::Hide if principal != self.owner => {
                debug!("Hide denied to non-owner");
                Some(ActionResponse::Reply(Notice::OwnerOnlyHide))
            }
            CarouselAction::Hide => {
                self.hidden = !self.hidden;
                info!(hidden = self.hidden, "Toggled carousel visibility");
                Some(ActionResponse::Update(self.render().await))
            }
            CarouselAction::Refresh => match self.kind {
                CarouselKind::Favorites { .. } => None,
                CarouselKind::Search { .. } if principal != self.owner => {
                    debug!("Refresh denied to non-owner");
                    Some(ActionResponse::Reply(Notice::OwnerOnlyRefresh))
                }
                CarouselKind::Search { .. } => {
                    self.refresh().await;
                    info!("Refreshed search carousel");
                    Some(ActionResponse::Update(self.render().await))
                }
            },
        }
    }

    /// Add or remove the current post in the favorites of `principal`.
    async fn toggle_favorite(&mut self, principal: UserId) -> ActionResponse {
        let outcome = self.data.fetch().await;
        let post = match &outcome {
            FetchOutcome::Found(post) => post,
            FetchOutcome::TransientError(cause) => {
                debug!(cause = %cause, "Current post could not be loaded for favoriting");
                return ActionResponse::Reply(Notice::PostUnavailable);
            }
            FetchOutcome::NotFound | FetchOutcome::MissingItem(_) => {
                return ActionResponse::Reply(Notice::PostGone);
            }
        };
        let post_id = *post.id();
        let favorites = Arc::clone(self.services.favorites());

        let removed = match favorites.remove_favorite(principal, post_id).await {
            Ok(removed) => removed,
            Err(e) => {
                warn!(post_id = %post_id, error = %e, "Failed to update favorites");
                return ActionResponse::Reply(Notice::FavoritesUnavailable);
            }
        };

        if removed {
            info!(post_id = %post_id, "Removed favorite");
            if self.owns_favorites_view(principal) {
                self.refresh_keep_position().await;
                return ActionResponse::UpdateWithNotice {
                    message: self.render().await,
                    notice: Notice::FavoriteRemoved,
                };
            }
            return ActionResponse::Reply(Notice::FavoriteRemoved);
        }

        match favorites.add_favorite(principal, post_id).await {
            Ok(_) => {
                info!(post_id = %post_id, "Added favorite");
                ActionResponse::Reply(Notice::FavoriteAdded)
            }
            Err(e) => {
                warn!(post_id = %post_id, error = %e, "Failed to update favorites");
                ActionResponse::Reply(Notice::FavoritesUnavailable)
            }
        }
    }

    /// Render the outcome at the cursor.
    pub async fn render(&mut self) -> RenderedMessage {
        if self.hidden {
            return self.render_hidden();
        }
        let outcome = self.data.fetch().await;
        self.present(outcome).await
    }

    async fn present(&self, outcome: FetchOutcome) -> RenderedMessage {
        if self.hidden {
            return self.render_hidden();
        }
        let color = match outcome.post() {
            Some(post) => {
                self.services
                    .colors()
                    .dominant_color(color_source_url(post))
                    .await
            }
            None => Color::DARK_RED,
        };
        self.render_outcome(&outcome, color)
    }

    /// Placeholder shown while hidden: only the reveal control.
    pub fn render_hidden(&self) -> RenderedMessage {
        RenderedMessage::new(
            EmbedContent::headline("Content is hidden", Color::DARK_RED),
            vec![ControlRow(vec![self.button(
                CarouselAction::Hide,
                "👀",
                ControlStyle::Success,
            )])],
        )
    }

    /// Render `outcome` as the visible message. Pure apart from reading the
    /// cursor position.
    pub fn render_outcome(&self, outcome: &FetchOutcome, color: Color) -> RenderedMessage {
        let embed = match outcome {
            FetchOutcome::Found(post) => self.post_embed(post, color),
            FetchOutcome::NotFound => EmbedContent::headline("No posts found", Color::DARK_RED),
            FetchOutcome::MissingItem(_) => {
                EmbedContent::headline("This post does not exist", Color::DARK_RED)
            }
            FetchOutcome::TransientError(_) => EmbedContent::headline(
                "An error occurred while fetching this post",
                Color::DARK_RED,
            ),
        };

        if outcome.is_not_found() {
            return RenderedMessage::new(embed, Vec::new());
        }

        let mut base = Vec::new();
        if let Some((cursor, len)) = self.data.position() {
            base.push(Control::Button {
                action_id: self.action_id(CarouselAction::Previous),
                label: "◀".to_string(),
                style: ControlStyle::Secondary,
                disabled: cursor == 0,
            });
            base.push(Control::Button {
                action_id: self.action_id(CarouselAction::Next),
                label: "▶".to_string(),
                style: ControlStyle::Secondary,
                disabled: cursor + 1 >= len,
            });
        }
        if let Some(post) = outcome.post() {
            base.push(Control::Link {
                label: "🔎".to_string(),
                url: self.services.post_page(*post.id()),
            });
            base.push(Control::Link {
                label: "💾".to_string(),
                url: post.file_url().clone(),
            });
        }

        let mut user = vec![
            self.button(CarouselAction::Favorite, "❤️", ControlStyle::Primary),
            self.button(CarouselAction::Hide, "👀", ControlStyle::Danger),
        ];
        if matches!(self.kind, CarouselKind::Search { .. }) {
            user.push(self.button(CarouselAction::Refresh, "🔄", ControlStyle::Secondary));
        }

        RenderedMessage::new(embed, vec![ControlRow(base), ControlRow(user)])
    }

    fn post_embed(&self, post: &Post, color: Color) -> EmbedContent {
        let mut description = self
            .data
            .position()
            .map(|(cursor, len)| format!("**Post {} of {}**", cursor + 1, len));

        let image_url = if post.is_image() {
            Some(post.file_url().clone())
        } else {
            let note = "**This format is not supported!**\n\
                        You can still view it on Gelbooru with the 🔎 button";
            description = Some(match description {
                Some(header) => format!("{header}\n\n{note}"),
                None => note.to_string(),
            });
            None
        };

        EmbedContent {
            description,
            image_url,
            timestamp: post.timestamp(),
            footer: Some(format!("Score: {} • Rating: {}", post.score(), post.rating())),
            color,
        }
    }
}

/// Preview image used for the embed color, falling back to the full file.
fn color_source_url(post: &Post) -> &str {
    if post.preview_url().is_empty() {
        post.file_url()
    } else {
        post.preview_url()
    }
}
