//! Discord client setup and lifecycle.

use crate::handler::CultureHandler;
use crate::module::ModuleRegistry;
use crate::{DiscordError, DiscordErrorKind, DiscordResult};
use culture_carousel::CarouselRegistry;
use serenity::Client;
use serenity::all::GuildId;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, instrument};

/// The Culture Discord bot.
///
/// # Example
/// ```no_run
/// use culture_social::{CultureBot, CultureModule, ModuleRegistry};
/// # use culture_carousel::CarouselRegistry;
/// # use std::sync::Arc;
///
/// # async fn run(carousels: Arc<CarouselRegistry>) -> Result<(), Box<dyn std::error::Error>> {
/// let mut modules = ModuleRegistry::new();
/// modules.register(Arc::new(CultureModule::new(Arc::clone(&carousels), None)));
///
/// let token = std::env::var("BOT_TOKEN")?;
/// let bot = CultureBot::new(token, None, carousels, modules).await?;
/// bot.run_until(async {
///     let _ = tokio::signal::ctrl_c().await;
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub struct CultureBot {
    client: Client,
    modules: ModuleRegistry,
}

impl std::fmt::Debug for CultureBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CultureBot")
            .field("modules", &self.modules)
            .finish_non_exhaustive()
    }
}

impl CultureBot {
    /// Initialize the modules and build the Serenity client.
    ///
    /// # Errors
    /// Returns an error if the client cannot be built, e.g. for a malformed
    /// token.
    #[instrument(skip(token, carousels, modules), fields(token_len = token.len()))]
    pub async fn new(
        token: String,
        dev_guild: Option<u64>,
        carousels: Arc<CarouselRegistry>,
        mut modules: ModuleRegistry,
    ) -> DiscordResult<Self> {
        info!("Initializing Culture Discord bot");

        let commands = Arc::new(modules.init_all().await);
        let handler = CultureHandler::new(commands, carousels, dev_guild.map(GuildId::new));
        let intents = CultureHandler::intents();

        let client = Client::builder(&token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        info!(?intents, "Serenity client built");
        Ok(Self { client, modules })
    }

    /// Run the bot until the gateway fails or `shutdown` completes.
    ///
    /// Modules are disposed before the shards are shut down.
    ///
    /// # Errors
    /// Returns an error if the gateway connection fails.
    #[instrument(skip_all)]
    pub async fn run_until(mut self, shutdown: impl Future<Output = ()>) -> DiscordResult<()> {
        info!("Starting Discord bot");
        let shard_manager = Arc::clone(&self.client.shard_manager);

        let result = tokio::select! {
            result = self.client.start() => result.map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Client error: {}",
                    e
                )))
            }),
            () = shutdown => {
                info!("Shutdown requested");
                Ok(())
            }
        };

        self.modules.dispose_all().await;
        shard_manager.shutdown_all().await;
        info!("Discord bot stopped");
        result
    }
}
