//! Interactive post carousels.
//!
//! A carousel is one chat message plus its paging, favorite and hide
//! controls, bound to the command invocation that created it. This crate is
//! platform independent: it produces an abstract [`RenderedMessage`] and
//! consumes `{control id, invoking user}` events, leaving the chat platform
//! to the caller.
//!
//! # Layers
//!
//! - [`CarouselData`] hides whether posts were fetched eagerly by a search or
//!   are resolved lazily, one id at a time, from a favorites list.
//! - [`Carousel`] adds ownership, the hidden flag and action dispatch.
//! - [`CarouselRegistry`] maps carousel ids to live carousels and routes
//!   control ids of the form `act/<action>/<carousel id>`.
//!
//! # Example
//!
//! ```rust,ignore
//! use culture_carousel::{CarouselRegistry, CarouselServices, RouteOutcome};
//!
//! let registry = CarouselRegistry::new(services, CacheConfig::default());
//! let (id, message) = registry.create_search_carousel(owner, query).await;
//!
//! match registry.route(&control_id, clicking_user).await {
//!     RouteOutcome::Handled(response) => { /* update message or reply */ }
//!     RouteOutcome::Unhandled => { /* "action unavailable" */ }
//!     RouteOutcome::Expired => { /* "no longer interactive" */ }
//!     RouteOutcome::NotCarouselControl => { /* someone else's button */ }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod carousel;
mod data;
mod registry;
mod render;
mod services;

pub use carousel::{ActionResponse, Carousel, CarouselAction, CarouselId, CarouselKind};
pub use data::{CarouselData, DataKind, MultiCarouselData, Slot, SlotState};
pub use registry::{
    CONTROL_PREFIX, CarouselRegistry, ControlId, ParseControlIdError, RouteOutcome,
    SharedCarousel,
};
pub use render::{Control, ControlRow, ControlStyle, EmbedContent, Notice, RenderedMessage};
pub use services::CarouselServices;
