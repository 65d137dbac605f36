//! Wiring of the bot from its configuration.

use crate::CultureConfig;
use culture_carousel::{CarouselRegistry, CarouselServices};
use culture_database::{
    InMemoryFavoritesRepository, SqliteFavoritesRepository, establish_pool, run_migrations,
};
use culture_error::{CultureResult, DatabaseError, DatabaseErrorKind, HttpError};
use culture_gelbooru::{DominantColorExtractor, GelbooruClient};
use culture_interface::FavoritesRepository;
use culture_social::{CultureBot, CultureModule, ModuleRegistry};
use std::future::Future;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Open the favorites store.
///
/// With `ephemeral`, favorites live in memory and are lost on exit.
/// Otherwise the SQLite database is opened and migrated.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated.
#[instrument(skip(config))]
pub fn open_favorites(
    config: &CultureConfig,
    ephemeral: bool,
) -> CultureResult<Arc<dyn FavoritesRepository>> {
    if ephemeral {
        warn!("Using in-memory favorites, nothing will be persisted");
        return Ok(Arc::new(InMemoryFavoritesRepository::new()));
    }

    let url = config.database().resolved_url();
    let pool = establish_pool(&url)?;
    let mut conn = pool
        .get()
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;
    run_migrations(&mut conn)?;
    drop(conn);

    info!(%url, "Favorites database ready");
    Ok(Arc::new(SqliteFavoritesRepository::new(pool)))
}

/// Build the carousel registry over Gelbooru and `favorites`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
#[instrument(skip_all)]
pub fn build_registry(
    config: &CultureConfig,
    favorites: Arc<dyn FavoritesRepository>,
) -> CultureResult<Arc<CarouselRegistry>> {
    let posts = GelbooruClient::new(config.gelbooru().clone())?;
    let http = reqwest::Client::builder()
        .user_agent(concat!("culture/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(HttpError::from)?;
    let colors = DominantColorExtractor::new(
        http,
        *config.colors().cache_size(),
        *config.colors().default_color(),
    );

    let services = CarouselServices::new(
        Arc::new(posts),
        favorites,
        Arc::new(colors),
        config.gelbooru().post_page_url().clone(),
    );
    Ok(Arc::new(CarouselRegistry::new(
        services,
        config.carousels().retention(),
    )))
}

/// Run the bot until `shutdown` completes.
///
/// # Errors
///
/// Returns an error if any bootstrap step fails or the gateway connection
/// is lost.
pub async fn run(
    config: CultureConfig,
    ephemeral: bool,
    shutdown: impl Future<Output = ()>,
) -> Result<(), Box<dyn std::error::Error>> {
    let favorites = open_favorites(&config, ephemeral)?;
    let carousels = build_registry(&config, favorites)?;

    let mut modules = ModuleRegistry::new();
    modules.register(Arc::new(CultureModule::new(
        Arc::clone(&carousels),
        config.carousels().sweep_interval(),
    )));

    let token = config.discord_token()?.to_string();
    let bot = CultureBot::new(token, *config.discord().dev_guild_id(), carousels, modules).await?;
    bot.run_until(shutdown).await?;
    Ok(())
}
