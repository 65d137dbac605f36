//! `/culture`: search the image board.

use super::SlashCommand;
use crate::DiscordResult;
use crate::render::edit_message;
use async_trait::async_trait;
use culture_carousel::CarouselRegistry;
use culture_core::{PostRating, SearchOptions, UserId};
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    ResolvedOption, ResolvedValue,
};
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{info, instrument};

/// Options of one `/culture` invocation, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CultureArgs {
    /// Whitespace-separated tags
    pub tags: Option<String>,
    /// Random ordering
    pub random: Option<bool>,
    /// Number of posts
    pub count: Option<i64>,
    /// Rating filter
    pub rating: Option<PostRating>,
}

impl CultureArgs {
    /// Collect the options Discord resolved for the command.
    pub fn from_options(options: &[ResolvedOption<'_>]) -> Self {
        let mut args = Self::default();
        for option in options {
            match (option.name, &option.value) {
                ("tags", ResolvedValue::String(tags)) => args.tags = Some(tags.to_string()),
                ("random", ResolvedValue::Boolean(random)) => args.random = Some(*random),
                ("count", ResolvedValue::Integer(count)) => args.count = Some(*count),
                ("rating", ResolvedValue::String(rating)) => args.rating = rating.parse().ok(),
                _ => {}
            }
        }
        args
    }

    /// Search options these arguments describe. Counts below one are raised
    /// to one.
    pub fn into_search_options(self) -> SearchOptions {
        SearchOptions {
            tags: self.tags,
            random: self.random,
            count: self
                .count
                .map(|count| u32::try_from(count.max(1)).unwrap_or(u32::MAX)),
            rating: self.rating,
        }
    }
}

/// Definition of `/culture`.
pub(crate) fn definition() -> CreateCommand {
    let rating = PostRating::iter().fold(
        CreateCommandOption::new(
            CommandOptionType::String,
            "rating",
            "The rating of post(s) to retrieve",
        ),
        |option, rating| option.add_string_choice(format!("{rating:?}"), rating.to_string()),
    );

    CreateCommand::new("culture")
        .description("Retrieves culture (posts) from Gelbooru")
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "tags",
            "The tags to search for",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Boolean,
            "random",
            "Whether to retrieve random post(s)",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "count",
                "The number of posts to retrieve",
            )
            .min_int_value(1),
        )
        .add_option(rating)
}

/// Searches posts and replies with a search carousel.
#[derive(Debug, Clone)]
pub struct CultureCommand {
    carousels: Arc<CarouselRegistry>,
}

impl CultureCommand {
    /// Create the command over the carousel registry.
    pub fn new(carousels: Arc<CarouselRegistry>) -> Self {
        Self { carousels }
    }
}

#[async_trait]
impl SlashCommand for CultureCommand {
    fn name(&self) -> &'static str {
        "culture"
    }

    fn definition(&self) -> CreateCommand {
        definition()
    }

    #[instrument(skip_all, fields(user_id = %command.user.id))]
    async fn execute(&self, ctx: &Context, command: &CommandInteraction) -> DiscordResult<()> {
        let query = CultureArgs::from_options(&command.data.options())
            .into_search_options()
            .into_query();
        info!(tags = %query.tags(), limit = query.limit(), "Searching posts");

        let owner = UserId(command.user.id.get());
        let (_, message) = self.carousels.create_search_carousel(owner, query).await;

        command
            .edit_response(&ctx.http, edit_message(&message))
            .await?;
        Ok(())
    }
}
