//! `/favorites`: browse someone's favorites.

use super::SlashCommand;
use crate::DiscordResult;
use crate::render::edit_message;
use async_trait::async_trait;
use culture_carousel::CarouselRegistry;
use culture_core::UserId;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    ResolvedValue,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Definition of `/favorites`.
pub(crate) fn definition() -> CreateCommand {
    CreateCommand::new("favorites")
        .description("Shows the favorite posts of a user")
        .add_option(CreateCommandOption::new(
            CommandOptionType::User,
            "user",
            "Whose favorites to show (defaults to you)",
        ))
}

/// Replies with a favorites carousel owned by the invoker.
#[derive(Debug, Clone)]
pub struct FavoritesCommand {
    carousels: Arc<CarouselRegistry>,
}

impl FavoritesCommand {
    /// Create the command over the carousel registry.
    pub fn new(carousels: Arc<CarouselRegistry>) -> Self {
        Self { carousels }
    }
}

#[async_trait]
impl SlashCommand for FavoritesCommand {
    fn name(&self) -> &'static str {
        "favorites"
    }

    fn definition(&self) -> CreateCommand {
        definition()
    }

    #[instrument(skip_all, fields(user_id = %command.user.id))]
    async fn execute(&self, ctx: &Context, command: &CommandInteraction) -> DiscordResult<()> {
        let owner = UserId(command.user.id.get());
        let favorites_user = command
            .data
            .options()
            .iter()
            .find_map(|option| match (option.name, &option.value) {
                ("user", ResolvedValue::User(user, _)) => Some(UserId(user.id.get())),
                _ => None,
            })
            .unwrap_or(owner);
        info!(favorites_user = %favorites_user, "Showing favorites");

        let (_, message) = self
            .carousels
            .create_favorites_carousel(owner, favorites_user)
            .await;

        command
            .edit_response(&ctx.http, edit_message(&message))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_option_is_optional() {
        let definition = serde_json::to_value(definition()).unwrap();

        assert_eq!(definition["name"], "favorites");
        let user = &definition["options"][0];
        assert_eq!(user["name"], "user");
        assert_eq!(user["type"], 6);
        assert_ne!(user["required"], true);
    }
}
