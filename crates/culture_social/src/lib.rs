//! Discord integration for the Culture bot.
//!
//! This crate connects the platform-independent carousels of
//! `culture_carousel` to Discord through Serenity:
//!
//! - [`CultureBot`] owns the gateway client and the module lifecycle.
//! - [`CultureHandler`] defers slash commands, acknowledges carousel buttons
//!   and routes them to the [`CarouselRegistry`](culture_carousel::CarouselRegistry).
//! - [`CultureModule`] contributes `/culture` and `/favorites`.
//! - The [`render`] functions turn a `RenderedMessage` into Serenity builders.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod commands;
mod error;
mod handler;
mod module;
pub mod render;

pub use client::CultureBot;
pub use commands::{
    CommandRegistry, CultureArgs, CultureCommand, FavoritesCommand, SlashCommand,
};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::{COMMAND_FAILED, CultureHandler, is_carousel_control};
pub use module::{CultureModule, Module, ModuleContext, ModuleRegistry};
