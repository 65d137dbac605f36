//! Platform-independent message model.

use chrono::{DateTime, Utc};
use culture_core::Color;
use derive_getters::Getters;

/// Embed part of a rendered message.
#[derive(Debug, Clone, PartialEq, Default, Getters)]
pub struct EmbedContent {
    /// Markdown description
    pub(crate) description: Option<String>,
    /// Inline image
    pub(crate) image_url: Option<String>,
    /// Creation time of the post
    pub(crate) timestamp: Option<DateTime<Utc>>,
    /// Footer text
    pub(crate) footer: Option<String>,
    /// Side bar color
    pub(crate) color: Color,
}

impl EmbedContent {
    /// A bold one-line message.
    pub fn headline(text: &str, color: Color) -> Self {
        Self {
            description: Some(format!("**{text}**")),
            color,
            ..Self::default()
        }
    }
}

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ControlStyle {
    /// Blurple
    Primary,
    /// Grey
    Secondary,
    /// Green
    Success,
    /// Red
    Danger,
}

/// One interactive element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Routed back to the carousel through its action id
    Button {
        /// `act/<action>/<carousel id>`
        action_id: String,
        /// Button text
        label: String,
        /// Visual style
        style: ControlStyle,
        /// Whether the button is greyed out
        disabled: bool,
    },
    /// Opens a URL; never routed
    Link {
        /// Button text
        label: String,
        /// Target
        url: String,
    },
}

impl Control {
    /// Label shown on the control.
    pub fn label(&self) -> &str {
        match self {
            Control::Button { label, .. } | Control::Link { label, .. } => label,
        }
    }

    /// Action id of a routed button.
    pub fn action_id(&self) -> Option<&str> {
        match self {
            Control::Button { action_id, .. } => Some(action_id.as_str()),
            Control::Link { .. } => None,
        }
    }

    /// Whether the control is a disabled button.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Control::Button { disabled: true, .. })
    }
}

/// A horizontal group of controls.
#[derive(Debug, Clone, PartialEq, Eq, Default, derive_more::From)]
pub struct ControlRow(pub Vec<Control>);

impl ControlRow {
    /// Controls in the row.
    pub fn controls(&self) -> &[Control] {
        &self.0
    }

    /// Whether the row has no controls.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A full carousel message: one embed and its control rows.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct RenderedMessage {
    embed: EmbedContent,
    rows: Vec<ControlRow>,
}

impl RenderedMessage {
    /// Assemble a message, dropping empty rows.
    pub fn new(embed: EmbedContent, rows: Vec<ControlRow>) -> Self {
        Self {
            embed,
            rows: rows.into_iter().filter(|row| !row.is_empty()).collect(),
        }
    }

    /// Every control, row by row.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.rows.iter().flat_map(|row| row.controls().iter())
    }

    /// The control with the given label, if present.
    pub fn control(&self, label: &str) -> Option<&Control> {
        self.controls().find(|control| control.label() == label)
    }
}

/// Private replies sent only to the user who clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// The post was added to the clicker's favorites
    FavoriteAdded,
    /// The post was removed from the clicker's favorites
    FavoriteRemoved,
    /// The current slot holds no post to favorite
    PostGone,
    /// The current post could not be loaded from the image board
    PostUnavailable,
    /// Someone other than the owner tried to hide or reveal
    OwnerOnlyHide,
    /// Someone other than the owner tried to refresh
    OwnerOnlyRefresh,
    /// The carousel is no longer registered
    Expired,
    /// The carousel does not support the clicked action
    ActionUnavailable,
    /// The favorites store failed
    FavoritesUnavailable,
}

impl Notice {
    /// Message text.
    pub fn text(&self) -> &'static str {
        match self {
            Notice::FavoriteAdded => "Post added to favorites",
            Notice::FavoriteRemoved => "Post removed from favorites",
            Notice::PostGone => "This post no longer exists",
            Notice::PostUnavailable => "This post could not be loaded, try again later",
            Notice::OwnerOnlyHide => "Only the owner can hide or reveal this post",
            Notice::OwnerOnlyRefresh => "Only the owner can refresh this post",
            Notice::Expired => "It is no longer possible to interact with this post",
            Notice::ActionUnavailable => "This action is unavailable",
            Notice::FavoritesUnavailable => "Favorites are unavailable right now, try again later",
        }
    }

    /// Embed color.
    pub fn color(&self) -> Color {
        match self {
            Notice::FavoriteAdded => Color::GOLD,
            _ => Color::DARK_RED,
        }
    }

    /// The notice as an embed.
    pub fn embed(&self) -> EmbedContent {
        EmbedContent::headline(self.text(), self.color())
    }
}
