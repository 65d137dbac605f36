//! Slash commands.

mod culture;
mod favorites;

pub use culture::{CultureArgs, CultureCommand};
pub use favorites::FavoritesCommand;

use crate::DiscordResult;
use async_trait::async_trait;
use serenity::all::{CommandInteraction, Context, CreateCommand};
use std::sync::Arc;

/// A slash command the bot answers.
///
/// The interaction is deferred before `execute` runs, so implementations
/// answer through `edit_response`.
#[async_trait]
pub trait SlashCommand: Send + Sync {
    /// Command name as typed after the slash.
    fn name(&self) -> &'static str;

    /// Definition sent to Discord at registration.
    fn definition(&self) -> CreateCommand;

    /// Answer one invocation.
    async fn execute(&self, ctx: &Context, command: &CommandInteraction) -> DiscordResult<()>;
}

/// Commands contributed by the modules, in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Arc<dyn SlashCommand>>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.commands.iter().map(|command| command.name()))
            .finish()
    }
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. A command with the same name replaces the old one.
    pub fn add(&mut self, command: Arc<dyn SlashCommand>) {
        self.commands.retain(|existing| existing.name() != command.name());
        self.commands.push(command);
    }

    /// Add every command of `other`, in its order.
    pub fn extend(&mut self, other: CommandRegistry) {
        for command in other.commands {
            self.add(command);
        }
    }

    /// Command with the given name.
    pub fn find(&self, name: &str) -> Option<Arc<dyn SlashCommand>> {
        self.commands
            .iter()
            .find(|command| command.name() == name)
            .cloned()
    }

    /// Definitions of every command.
    pub fn definitions(&self) -> Vec<CreateCommand> {
        self.commands.iter().map(|command| command.definition()).collect()
    }

    /// Names of every command.
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|command| command.name()).collect()
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command was added.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
