//! Culture: a Discord bot for browsing Gelbooru posts.
//!
//! `/culture` searches Gelbooru and answers with a carousel: one message with
//! paging, favorite, hide and refresh buttons. `/favorites` pages through the
//! posts a user favorited.
//!
//! # Architecture
//!
//! The bot is organized as a workspace with focused crates:
//!
//! - `culture_error` - Error types
//! - `culture_core` - Posts, ids, search queries and fetch outcomes
//! - `culture_interface` - Traits for post sources, favorites and colors
//! - `culture_cache` - Bounded LRU/idle cache
//! - `culture_gelbooru` - Gelbooru client and dominant color extraction
//! - `culture_database` - SQLite favorites
//! - `culture_carousel` - Platform-independent carousels
//! - `culture_social` - Discord integration
//!
//! This crate (`culture`) re-exports everything for convenience and hosts
//! configuration, logging setup and the `culture` binary.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use culture::{CultureConfig, ObservabilityConfig, init_observability, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_observability(&ObservabilityConfig::default())?;
//!     let config = CultureConfig::load(None)?;
//!     run(config, false, async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod observability;

pub use app::{build_registry, open_favorites, run};
pub use self::config::{
    CarouselConfig, ColorConfig, CultureConfig, DEFAULT_CONFIG_FILE, DEFAULT_SWEEP_INTERVAL_SECS,
    DatabaseConfig, DiscordConfig, ENV_PREFIX,
};
pub use observability::{ObservabilityConfig, init_observability};

pub use culture_cache::*;
pub use culture_carousel::*;
pub use culture_core::*;
pub use culture_database::{
    InMemoryFavoritesRepository, SqliteFavoritesRepository, SqlitePool, establish_pool,
    run_migrations,
};
pub use culture_error::*;
pub use culture_gelbooru::*;
pub use culture_interface::*;
pub use culture_social::{
    CultureBot, CultureHandler, CultureModule, DiscordError, DiscordErrorKind, DiscordResult,
    Module, ModuleContext, ModuleRegistry,
};
