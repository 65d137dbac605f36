//! Bot configuration.
//!
//! Sources in order of precedence (later sources override earlier):
//! 1. Built-in defaults
//! 2. A TOML file: the `--config` path, or `./culture.toml` when present
//! 3. Environment variables prefixed `CULTURE__`, sections separated by `__`
//!    (e.g. `CULTURE__CAROUSELS__MAX_LIVE=500`)
//! 4. The legacy variables `BOT_TOKEN`, `DEV_SERVER_ID`, `GELBOORU_API_KEY`,
//!    `GELBOORU_API_USER` and `DATABASE_URL`

use config::{Config, Environment, File, FileFormat};
use culture_cache::CacheConfig;
use culture_core::Color;
use culture_error::{ConfigError, CultureResult};
use culture_gelbooru::{DEFAULT_COLOR_CACHE_SIZE, GelbooruConfig};
use derive_getters::Getters;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Configuration file read when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "culture.toml";

/// Prefix of structured environment overrides.
pub const ENV_PREFIX: &str = "CULTURE";

/// Sweep period used when idle expiry is on but no period is configured.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Legacy environment variables and the keys they set.
const LEGACY_VARIABLES: [(&str, &str); 5] = [
    ("BOT_TOKEN", "discord.token"),
    ("DEV_SERVER_ID", "discord.dev_guild_id"),
    ("GELBOORU_API_KEY", "gelbooru.api_key"),
    ("GELBOORU_API_USER", "gelbooru.api_user"),
    ("DATABASE_URL", "database.url"),
];

/// Discord connection settings.
#[derive(Clone, Default, Deserialize, Getters)]
pub struct DiscordConfig {
    /// Bot token
    #[serde(default)]
    token: Option<String>,

    /// Guild that receives commands immediately instead of globally
    #[serde(default)]
    dev_guild_id: Option<u64>,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("dev_guild_id", &self.dev_guild_id)
            .finish()
    }
}

/// Favorites storage.
#[derive(Debug, Clone, Default, Deserialize, Getters)]
pub struct DatabaseConfig {
    /// SQLite database path
    #[serde(default)]
    url: Option<String>,
}

impl DatabaseConfig {
    /// The configured path, or `CultureBot/db.sqlite` under the user's data
    /// directory.
    pub fn resolved_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => default_database_path().to_string_lossy().into_owned(),
        }
    }
}

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("CultureBot")
        .join("db.sqlite")
}

/// Retention of live carousels. Every bound is optional; without any,
/// carousels live until shutdown.
#[derive(Debug, Clone, Default, Deserialize, Getters)]
pub struct CarouselConfig {
    /// Most carousels kept; the least recently used one is evicted
    #[serde(default)]
    max_live: Option<usize>,

    /// Seconds without interaction after which a carousel expires
    #[serde(default)]
    idle_timeout_secs: Option<u64>,

    /// Seconds between sweeps of expired carousels
    #[serde(default)]
    sweep_interval_secs: Option<u64>,
}

impl CarouselConfig {
    /// Registry retention policy.
    pub fn retention(&self) -> CacheConfig {
        CacheConfig::default()
            .with_max_size(self.max_live)
            .with_idle_ttl(self.idle_timeout_secs)
    }

    /// Period of the background sweep. Only runs when carousels can expire.
    pub fn sweep_interval(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(|_| {
            Duration::from_secs(
                self.sweep_interval_secs
                    .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
            )
        })
    }

    /// Reject bounds that would disable the registry or its sweep.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first bound set to zero.
    pub fn validate(&self) -> CultureResult<()> {
        let zeroed = [
            ("carousels.max_live", self.max_live.map(|n| n as u64)),
            ("carousels.idle_timeout_secs", self.idle_timeout_secs),
            ("carousels.sweep_interval_secs", self.sweep_interval_secs),
        ]
        .into_iter()
        .find(|(_, value)| *value == Some(0));

        match zeroed {
            Some((key, _)) => {
                Err(ConfigError::new(format!("{} must be greater than zero", key)).into())
            }
            None => Ok(()),
        }
    }
}

/// Embed color extraction.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct ColorConfig {
    /// Previews whose color is remembered
    #[serde(default = "default_cache_size")]
    cache_size: usize,

    /// Color used when a preview cannot be analysed
    #[serde(default = "default_color")]
    default_color: Color,
}

fn default_cache_size() -> usize {
    DEFAULT_COLOR_CACHE_SIZE
}

fn default_color() -> Color {
    Color::BLACK
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            cache_size: default_cache_size(),
            default_color: default_color(),
        }
    }
}

/// Complete bot configuration.
#[derive(Debug, Clone, Default, Deserialize, Getters)]
pub struct CultureConfig {
    /// Discord connection
    #[serde(default)]
    discord: DiscordConfig,

    /// Gelbooru API
    #[serde(default)]
    gelbooru: GelbooruConfig,

    /// Favorites storage
    #[serde(default)]
    database: DatabaseConfig,

    /// Carousel retention
    #[serde(default)]
    carousels: CarouselConfig,

    /// Embed colors
    #[serde(default)]
    colors: ColorConfig,
}

impl CultureConfig {
    /// Load from `path` (or `./culture.toml`) and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, a value does not
    /// parse, or the Discord token or Gelbooru credentials are absent.
    pub fn load(path: Option<&Path>) -> CultureResult<Self> {
        Self::from_sources(path, std::env::vars())
    }

    /// Load from `path` and the given environment.
    #[instrument(skip(env))]
    pub fn from_sources(
        path: Option<&Path>,
        env: impl IntoIterator<Item = (String, String)>,
    ) -> CultureResult<Self> {
        let env: config::Map<String, String> = env.into_iter().collect();

        let mut builder = match path {
            Some(path) => {
                debug!(path = %path.display(), "Reading configuration file");
                Config::builder().add_source(File::from(path).format(FileFormat::Toml))
            }
            None => Config::builder().add_source(
                File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
            ),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .source(Some(env.clone())),
        );

        for (variable, key) in LEGACY_VARIABLES {
            if let Some(value) = env.get(variable).filter(|value| !value.is_empty()) {
                debug!(variable, key, "Applying legacy environment variable");
                builder = builder.set_override(key, value.clone()).map_err(|e| {
                    ConfigError::new(format!("Failed to apply {}: {}", variable, e))
                })?;
            }
        }

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check the settings the bot cannot start without.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing or out of range setting.
    pub fn validate(&self) -> CultureResult<()> {
        self.discord_token()?;
        if !self.gelbooru.has_credentials() {
            return Err(ConfigError::new(
                "Missing Gelbooru credentials: set GELBOORU_API_KEY and GELBOORU_API_USER",
            )
            .into());
        }
        self.carousels.validate()
    }

    /// The Discord token.
    ///
    /// # Errors
    ///
    /// Returns an error if no non-empty token is configured.
    pub fn discord_token(&self) -> CultureResult<&str> {
        match self.discord.token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ConfigError::new("Missing Discord token: set BOT_TOKEN").into()),
        }
    }
}
