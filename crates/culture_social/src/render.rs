//! Conversion of rendered carousels into serenity builders.

use culture_carousel::{Control, ControlStyle, EmbedContent, Notice, RenderedMessage};
use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponseFollowup, EditInteractionResponse, Timestamp,
};
use tracing::warn;

/// Embed for a rendered carousel or notice.
pub fn embed(content: &EmbedContent) -> CreateEmbed {
    let mut embed = CreateEmbed::new().colour(content.color().value());

    if let Some(description) = content.description() {
        embed = embed.description(description);
    }
    if let Some(url) = content.image_url() {
        embed = embed.image(url);
    }
    if let Some(timestamp) = content.timestamp() {
        match Timestamp::from_unix_timestamp(timestamp.timestamp()) {
            Ok(timestamp) => embed = embed.timestamp(timestamp),
            Err(e) => warn!(%timestamp, error = %e, "Dropping out-of-range timestamp"),
        }
    }
    if let Some(footer) = content.footer() {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }

    embed
}

fn button_style(style: ControlStyle) -> ButtonStyle {
    match style {
        ControlStyle::Primary => ButtonStyle::Primary,
        ControlStyle::Secondary => ButtonStyle::Secondary,
        ControlStyle::Success => ButtonStyle::Success,
        ControlStyle::Danger => ButtonStyle::Danger,
    }
}

fn button(control: &Control) -> CreateButton {
    match control {
        Control::Button {
            action_id,
            label,
            style,
            disabled,
        } => CreateButton::new(action_id)
            .label(label)
            .style(button_style(*style))
            .disabled(*disabled),
        Control::Link { label, url } => CreateButton::new_link(url).label(label),
    }
}

/// Action rows for every control row of the message.
pub fn components(message: &RenderedMessage) -> Vec<CreateActionRow> {
    message
        .rows()
        .iter()
        .map(|row| CreateActionRow::Buttons(row.controls().iter().map(button).collect()))
        .collect()
}

/// Replace an interaction's message with `message`.
///
/// Components are always set, so a message that lost its controls has them
/// cleared.
pub fn edit_message(message: &RenderedMessage) -> EditInteractionResponse {
    EditInteractionResponse::new()
        .embed(embed(message.embed()))
        .components(components(message))
}

/// Private follow-up carrying `notice`.
pub fn notice_followup(notice: Notice) -> CreateInteractionResponseFollowup {
    CreateInteractionResponseFollowup::new()
        .embed(embed(&notice.embed()))
        .ephemeral(true)
}
