//! Live carousels and control routing.

use crate::{ActionResponse, Carousel, CarouselId, CarouselServices, RenderedMessage};
use culture_cache::{BoundedCache, CacheConfig};
use culture_core::{SearchQuery, UserId};
use parking_lot::Mutex;
use std::str::FromStr;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// First segment of every carousel control id.
pub const CONTROL_PREFIX: &str = "act";

/// A registered carousel. Actions on one carousel run one at a time.
pub type SharedCarousel = Arc<tokio::sync::Mutex<Carousel>>;

/// Routing key carried by a carousel button: `act/<action>/<carousel id>`.
///
/// # Examples
///
/// ```
/// use culture_carousel::{CarouselId, ControlId};
///
/// let id = CarouselId::new();
/// let control: ControlId = format!("act/next/{id}").parse().unwrap();
/// assert_eq!(control.action(), "next");
/// assert_eq!(control.carousel(), id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlId {
    action: String,
    carousel: CarouselId,
}

impl ControlId {
    /// Control id for `action` on `carousel`.
    pub fn new(action: impl Into<String>, carousel: CarouselId) -> Self {
        Self {
            action: action.into(),
            carousel,
        }
    }

    /// Action suffix, not necessarily one the carousel knows.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Target carousel.
    pub fn carousel(&self) -> CarouselId {
        self.carousel
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", CONTROL_PREFIX, self.action, self.carousel)
    }
}

/// Why a string is not a routable control id.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseControlIdError {
    /// The id does not belong to a carousel at all
    #[display("Not a carousel control: {}", _0)]
    Foreign(#[error(not(source))] String),
    /// A carousel control whose carousel part cannot name any carousel
    #[display("Malformed carousel control: {}", _0)]
    Malformed(#[error(not(source))] String),
}

impl FromStr for ControlId {
    type Err = ParseControlIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(CONTROL_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| ParseControlIdError::Foreign(s.to_string()))?;

        let (action, carousel) = rest
            .rsplit_once('/')
            .ok_or_else(|| ParseControlIdError::Malformed(s.to_string()))?;

        let carousel = carousel
            .parse::<CarouselId>()
            .map_err(|_| ParseControlIdError::Malformed(s.to_string()))?;

        Ok(Self::new(action, carousel))
    }
}

/// Result of routing an inbound control event.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// The carousel handled the action
    Handled(ActionResponse),
    /// The carousel exists but does not support the action
    Unhandled,
    /// No live carousel has this id
    Expired,
    /// The control id is not a carousel control
    NotCarouselControl,
}

/// Process-wide table of live carousels.
///
/// Retention is governed by the [`CacheConfig`]: the default keeps every
/// carousel until shutdown, `max_size` evicts the least recently used one
/// and `idle_ttl` expires carousels nobody touched for that many seconds.
pub struct CarouselRegistry {
    carousels: Mutex<BoundedCache<CarouselId, SharedCarousel>>,
    services: CarouselServices,
}

impl std::fmt::Debug for CarouselRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselRegistry")
            .field("live", &self.len())
            .field("services", &self.services)
            .finish()
    }
}

impl CarouselRegistry {
    /// Create an empty registry.
    pub fn new(services: CarouselServices, retention: CacheConfig) -> Self {
        info!(
            max_live = ?retention.max_size(),
            idle_timeout_secs = ?retention.idle_ttl(),
            "Creating carousel registry"
        );
        Self {
            carousels: Mutex::new(BoundedCache::new(retention)),
            services,
        }
    }

    /// Collaborators handed to new carousels.
    pub fn services(&self) -> &CarouselServices {
        &self.services
    }

    /// Run a search, register the carousel and render its first message.
    #[instrument(skip(self), fields(user_id = %owner))]
    pub async fn create_search_carousel(
        &self,
        owner: UserId,
        query: SearchQuery,
    ) -> (CarouselId, RenderedMessage) {
        let mut carousel = Carousel::search(owner, query, self.services.clone()).await;
        let message = carousel.render().await;
        let id = carousel.id();
        self.register(carousel);
        info!(carousel_id = %id, "Created search carousel");
        (id, message)
    }

    /// Load the favorites of `favorites_user`, register the carousel and
    /// render its first message.
    #[instrument(skip(self), fields(user_id = %owner))]
    pub async fn create_favorites_carousel(
        &self,
        owner: UserId,
        favorites_user: UserId,
    ) -> (CarouselId, RenderedMessage) {
        let mut carousel = Carousel::favorites(owner, favorites_user, self.services.clone()).await;
        let message = carousel.render().await;
        let id = carousel.id();
        self.register(carousel);
        info!(carousel_id = %id, "Created favorites carousel");
        (id, message)
    }

    /// Make a carousel routable.
    pub fn register(&self, carousel: Carousel) -> SharedCarousel {
        let id = carousel.id();
        let shared = Arc::new(tokio::sync::Mutex::new(carousel));
        let evicted = self.carousels.lock().insert(id, Arc::clone(&shared));
        if let Some(evicted) = evicted {
            debug!(carousel_id = %evicted, "Evicted least recently used carousel");
        }
        shared
    }

    /// Live carousel with this id. Counts as a use for retention.
    pub fn get(&self, id: &CarouselId) -> Option<SharedCarousel> {
        self.carousels.lock().get(id).cloned()
    }

    /// Forget a carousel. Its controls expire.
    pub fn remove(&self, id: &CarouselId) -> bool {
        self.carousels.lock().remove(id).is_some()
    }

    /// Route a raw control id clicked by `principal`.
    pub async fn route(&self, control_id: &str, principal: UserId) -> RouteOutcome {
        match control_id.parse::<ControlId>() {
            Ok(control) => {
                self.route_action(control.carousel(), control.action(), principal)
                    .await
            }
            Err(ParseControlIdError::Foreign(_)) => RouteOutcome::NotCarouselControl,
            Err(e) => {
                debug!(error = %e, "Treating malformed control as expired");
                RouteOutcome::Expired
            }
        }
    }

    /// Dispatch `suffix` to the carousel `id` on behalf of `principal`.
    #[instrument(skip(self), fields(carousel_id = %id, user_id = %principal))]
    pub async fn route_action(&self, id: CarouselId, suffix: &str, principal: UserId) -> RouteOutcome {
        let Some(carousel) = self.get(&id) else {
            info!("Control refers to an expired carousel");
            return RouteOutcome::Expired;
        };

        let mut carousel = carousel.lock().await;
        match carousel.handle_action(suffix, principal).await {
            Some(response) => RouteOutcome::Handled(response),
            None => {
                warn!(suffix, "Unhandled carousel action");
                RouteOutcome::Unhandled
            }
        }
    }

    /// Drop carousels idle for longer than the configured timeout.
    pub fn purge_expired(&self) -> usize {
        self.carousels.lock().cleanup_expired()
    }

    /// Number of registered carousels.
    pub fn len(&self) -> usize {
        self.carousels.lock().len()
    }

    /// Whether no carousel is registered.
    pub fn is_empty(&self) -> bool {
        self.carousels.lock().is_empty()
    }

    /// Periodically purge idle carousels. The task stops once the registry
    /// is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let registry: Weak<Self> = Arc::downgrade(self);
        info!(period_secs = period.as_secs(), "Starting carousel sweeper");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let Some(registry) = registry.upgrade() else {
                    debug!("Carousel registry dropped, stopping sweeper");
                    break;
                };
                let removed = registry.purge_expired();
                if removed > 0 {
                    info!(removed, remaining = registry.len(), "Swept idle carousels");
                }
            }
        })
    }
}
