//! Serenity event handler: slash commands and carousel buttons.

use crate::commands::CommandRegistry;
use crate::render::{edit_message, notice_followup};
use crate::DiscordResult;
use culture_carousel::{ActionResponse, CarouselRegistry, Notice, RouteOutcome, CONTROL_PREFIX};
use serenity::all::{
    ActivityData, Command, CommandInteraction, ComponentInteraction, Context,
    CreateInteractionResponse, EditInteractionResponse, GatewayIntents, GuildId, Interaction,
    Ready,
};
use serenity::async_trait;
use serenity::client::EventHandler;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Reply shown when a command fails.
pub const COMMAND_FAILED: &str = "An error occurred while executing the command.";

/// Event handler for the Culture bot.
pub struct CultureHandler {
    commands: Arc<CommandRegistry>,
    carousels: Arc<CarouselRegistry>,
    dev_guild: Option<GuildId>,
    registered: AtomicBool,
}

impl std::fmt::Debug for CultureHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CultureHandler")
            .field("commands", &self.commands)
            .field("carousels", &self.carousels)
            .field("dev_guild", &self.dev_guild)
            .finish()
    }
}

impl CultureHandler {
    /// Create a handler. With a `dev_guild`, commands are registered to that
    /// guild only, which takes effect immediately.
    pub fn new(
        commands: Arc<CommandRegistry>,
        carousels: Arc<CarouselRegistry>,
        dev_guild: Option<GuildId>,
    ) -> Self {
        Self {
            commands,
            carousels,
            dev_guild,
            registered: AtomicBool::new(false),
        }
    }

    /// Gateway intents the bot needs. Interactions arrive regardless.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
    }

    /// Overwrite the remote command set with ours.
    #[instrument(skip_all, fields(dev_guild = ?self.dev_guild))]
    async fn register_commands(&self, ctx: &Context) -> DiscordResult<()> {
        let definitions = self.commands.definitions();
        let names = self.commands.names();

        match self.dev_guild {
            Some(guild) => {
                guild.set_commands(&ctx.http, definitions).await?;
                info!(guild_id = %guild, commands = ?names, "Registered guild commands");
            }
            None => {
                Command::set_global_commands(&ctx.http, definitions).await?;
                info!(commands = ?names, "Registered global commands");
            }
        }
        Ok(())
    }

    #[instrument(skip_all, fields(command = %command.data.name, user_id = %command.user.id))]
    async fn handle_command(&self, ctx: &Context, command: &CommandInteraction) {
        if let Err(e) = command.defer(&ctx.http).await {
            error!(error = %e, "Failed to defer command");
            return;
        }

        let Some(handler) = self.commands.find(&command.data.name) else {
            warn!("Unknown command");
            self.reply_failure(ctx, command).await;
            return;
        };

        if let Err(e) = handler.execute(ctx, command).await {
            error!(error = %e, "Command failed");
            self.reply_failure(ctx, command).await;
        }
    }

    async fn reply_failure(&self, ctx: &Context, command: &CommandInteraction) {
        let reply = EditInteractionResponse::new().content(COMMAND_FAILED);
        if let Err(e) = command.edit_response(&ctx.http, reply).await {
            error!(error = %e, "Failed to report command failure");
        }
    }

    #[instrument(
        skip_all,
        fields(custom_id = %component.data.custom_id, user_id = %component.user.id)
    )]
    async fn handle_component(&self, ctx: &Context, component: &ComponentInteraction) {
        if !is_carousel_control(&component.data.custom_id) {
            debug!("Ignoring foreign component");
            return;
        }

        if let Err(e) = component
            .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
            .await
        {
            error!(error = %e, "Failed to acknowledge component");
            return;
        }

        let principal = culture_core::UserId(component.user.id.get());
        let outcome = self
            .carousels
            .route(&component.data.custom_id, principal)
            .await;

        if let Err(e) = respond(ctx, component, outcome).await {
            error!(error = %e, "Failed to answer component");
        }
    }
}

/// Whether `custom_id` was produced by a carousel.
pub fn is_carousel_control(custom_id: &str) -> bool {
    custom_id
        .strip_prefix(CONTROL_PREFIX)
        .is_some_and(|rest| rest.starts_with('/'))
}

async fn respond(
    ctx: &Context,
    component: &ComponentInteraction,
    outcome: RouteOutcome,
) -> DiscordResult<()> {
    let reply = match outcome {
        RouteOutcome::Handled(ActionResponse::Update(message)) => {
            component
                .edit_response(&ctx.http, edit_message(&message))
                .await?;
            None
        }
        RouteOutcome::Handled(ActionResponse::Reply(notice)) => Some(notice),
        RouteOutcome::Handled(ActionResponse::UpdateWithNotice { message, notice }) => {
            component
                .edit_response(&ctx.http, edit_message(&message))
                .await?;
            Some(notice)
        }
        RouteOutcome::Unhandled => Some(Notice::ActionUnavailable),
        RouteOutcome::Expired => Some(Notice::Expired),
        RouteOutcome::NotCarouselControl => None,
    };

    if let Some(notice) = reply {
        component
            .create_followup(&ctx.http, notice_followup(notice))
            .await?;
    }
    Ok(())
}

#[async_trait]
impl EventHandler for CultureHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "Culture bot connected"
        );
        ctx.set_activity(Some(ActivityData::watching("gelbooru.com")));

        if self.registered.swap(true, Ordering::SeqCst) {
            debug!("Commands already registered, skipping");
            return;
        }
        if let Err(e) = self.register_commands(&ctx).await {
            error!(error = %e, "Failed to register commands");
            self.registered.store(false, Ordering::SeqCst);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => self.handle_command(&ctx, &command).await,
            Interaction::Component(component) => self.handle_component(&ctx, &component).await,
            _ => debug!(kind = ?interaction.kind(), "Ignoring interaction"),
        }
    }
}
