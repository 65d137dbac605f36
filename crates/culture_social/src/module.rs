//! Feature modules and their lifecycle.

use crate::commands::{CommandRegistry, CultureCommand, FavoritesCommand, SlashCommand};
use crate::{DiscordError, DiscordErrorKind, DiscordResult};
use async_trait::async_trait;
use culture_carousel::CarouselRegistry;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// What a module may contribute while it initializes.
#[derive(Debug, Default)]
pub struct ModuleContext {
    commands: CommandRegistry,
}

impl ModuleContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contribute a slash command.
    pub fn add_command(&mut self, command: Arc<dyn SlashCommand>) {
        debug!(command = command.name(), "Adding command");
        self.commands.add(command);
    }

    /// Commands contributed so far.
    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Take the contributed commands.
    pub fn into_commands(self) -> CommandRegistry {
        self.commands
    }
}

/// A unit of bot functionality with explicit setup and teardown.
///
/// # Example
///
/// ```rust,ignore
/// struct PingModule;
///
/// #[async_trait]
/// impl Module for PingModule {
///     fn name(&self) -> &str {
///         "ping"
///     }
///
///     async fn init(&self, context: &mut ModuleContext) -> DiscordResult<()> {
///         context.add_command(Arc::new(PingCommand));
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Module: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Set the module up and contribute its commands.
    ///
    /// # Errors
    ///
    /// A failing module is skipped; the others still initialize.
    async fn init(&self, context: &mut ModuleContext) -> DiscordResult<()>;

    /// Release whatever `init` acquired. Only called after a successful init.
    async fn dispose(&self) {}
}

/// The modules the bot runs, in initialization order.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
    initialized: Vec<Arc<dyn Module>>,
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field(
                "modules",
                &self.modules.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .field(
                "initialized",
                &self.initialized.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module. Modules initialize in the order they were registered.
    pub fn register(&mut self, module: Arc<dyn Module>) {
        self.modules.push(module);
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no module was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Names of the modules whose init succeeded.
    pub fn initialized(&self) -> Vec<&str> {
        self.initialized.iter().map(|m| m.name()).collect()
    }

    /// Initialize every module and collect their commands.
    ///
    /// Failures are logged and the failing module is left out.
    #[instrument(skip(self), fields(modules = self.modules.len()))]
    pub async fn init_all(&mut self) -> CommandRegistry {
        let mut collected = CommandRegistry::new();

        for module in &self.modules {
            let mut context = ModuleContext::new();
            match module.init(&mut context).await {
                Ok(()) => {
                    let commands = context.into_commands();
                    info!(
                        module = module.name(),
                        commands = ?commands.names(),
                        "Module initialized"
                    );
                    collected.extend(commands);
                    self.initialized.push(Arc::clone(module));
                }
                Err(e) => {
                    warn!(module = module.name(), error = %e, "Module failed to initialize, skipping");
                }
            }
        }

        collected
    }

    /// Dispose initialized modules in reverse order.
    #[instrument(skip(self))]
    pub async fn dispose_all(&mut self) {
        while let Some(module) = self.initialized.pop() {
            module.dispose().await;
            info!(module = module.name(), "Module disposed");
        }
    }
}

/// Post browsing: `/culture`, `/favorites` and carousel upkeep.
pub struct CultureModule {
    carousels: Arc<CarouselRegistry>,
    sweep_interval: Option<Duration>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for CultureModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CultureModule")
            .field("carousels", &self.carousels)
            .field("sweep_interval", &self.sweep_interval)
            .field("sweeping", &self.is_sweeping())
            .finish()
    }
}

impl CultureModule {
    /// Module over `carousels`. A `sweep_interval` starts a background purge
    /// of idle carousels on init.
    pub fn new(carousels: Arc<CarouselRegistry>, sweep_interval: Option<Duration>) -> Self {
        Self {
            carousels,
            sweep_interval,
            sweeper: Mutex::new(None),
        }
    }

    /// Whether the sweeper task is running.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

#[async_trait]
impl Module for CultureModule {
    fn name(&self) -> &str {
        "culture"
    }

    async fn init(&self, context: &mut ModuleContext) -> DiscordResult<()> {
        if self.sweep_interval.is_some_and(|period| period.is_zero()) {
            return Err(DiscordError::new(DiscordErrorKind::ModuleInit {
                module: self.name().to_string(),
                reason: "sweep interval must be positive".to_string(),
            }));
        }

        context.add_command(Arc::new(CultureCommand::new(Arc::clone(&self.carousels))));
        context.add_command(Arc::new(FavoritesCommand::new(Arc::clone(&self.carousels))));

        if let Some(period) = self.sweep_interval {
            let handle = self.carousels.spawn_sweeper(period);
            if let Some(previous) = self.sweeper.lock().replace(handle) {
                previous.abort();
            }
        }
        Ok(())
    }

    async fn dispose(&self) {
        if let Some(handle) = self.sweeper.lock().take() {
            handle.abort();
            debug!("Carousel sweeper stopped");
        }
        info!(live_carousels = self.carousels.len(), "Culture module disposed");
    }
}
