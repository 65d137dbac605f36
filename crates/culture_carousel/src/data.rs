//! Data access behind a carousel.
//!
//! [`CarouselData`] gives every carousel the same `fetch` / `next` /
//! `previous` contract whether it holds one outcome, a list of posts fetched
//! up front by a search, or a list of ids resolved on first visit.

use culture_core::{FetchOutcome, PostId, SearchQuery, UserId};
use culture_interface::{FavoritesRepository, PostSource};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Capability of a [`CarouselData`], for callers that branch on shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum DataKind {
    /// One resolved outcome, no cursor
    Single,
    /// Cursor over posts fetched at construction
    MultiEager,
    /// Cursor over ids resolved on first visit
    MultiLazy,
}

/// Resolution state of a lazy slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotState {
    /// Not visited yet, or every visit so far failed
    Unresolved,
    /// Resolved once; never fetched again
    Resolved(FetchOutcome),
}

/// One position of a multi-valued carousel.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Outcome known at construction
    Eager(FetchOutcome),
    /// Post id resolved through the image API on visit
    Lazy {
        /// Post to resolve
        id: PostId,
        /// Memoized outcome
        state: SlotState,
    },
}

impl Slot {
    /// An unresolved lazy slot.
    pub fn lazy(id: PostId) -> Self {
        Slot::Lazy {
            id,
            state: SlotState::Unresolved,
        }
    }

    /// Post id this slot stands for, when known.
    pub fn id(&self) -> Option<PostId> {
        match self {
            Slot::Eager(outcome) => outcome.post().map(|post| *post.id()),
            Slot::Lazy { id, .. } => Some(*id),
        }
    }

    /// Whether visiting this slot needs no API call.
    pub fn is_resolved(&self) -> bool {
        !matches!(
            self,
            Slot::Lazy {
                state: SlotState::Unresolved,
                ..
            }
        )
    }

    async fn resolve(&mut self, source: &dyn PostSource) -> FetchOutcome {
        match self {
            Slot::Eager(outcome) => outcome.clone(),
            Slot::Lazy {
                state: SlotState::Resolved(outcome),
                ..
            } => outcome.clone(),
            Slot::Lazy { id, state } => {
                let id = *id;
                match source.post_by_id(id).await {
                    Ok(Some(post)) => {
                        debug!(post_id = %id, "Resolved lazy slot");
                        let outcome = FetchOutcome::Found(post);
                        *state = SlotState::Resolved(outcome.clone());
                        outcome
                    }
                    Ok(None) => {
                        debug!(post_id = %id, "Post no longer exists");
                        FetchOutcome::MissingItem(id)
                    }
                    Err(e) => {
                        warn!(post_id = %id, error = %e, "Failed to resolve lazy slot");
                        FetchOutcome::transient(e)
                    }
                }
            }
        }
    }
}

/// Cursor over a fixed, non-empty sequence of slots.
///
/// `current` always satisfies `current < len()`. The cursor clamps at both
/// ends instead of wrapping around.
pub struct MultiCarouselData {
    slots: Vec<Slot>,
    current: usize,
    source: Arc<dyn PostSource>,
}

impl std::fmt::Debug for MultiCarouselData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiCarouselData")
            .field("slots", &self.slots)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl MultiCarouselData {
    /// Number of slots. Never zero.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Cursor position.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Slots in display order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Whether any slot is resolved lazily.
    pub fn is_lazy(&self) -> bool {
        self.slots.iter().any(|slot| matches!(slot, Slot::Lazy { .. }))
    }

    /// Move the cursor, clamping to the last slot.
    pub fn set_current(&mut self, index: usize) {
        self.current = index.min(self.slots.len().saturating_sub(1));
    }

    /// Outcome at the cursor.
    #[instrument(skip(self), fields(cursor = self.current, len = self.slots.len()))]
    pub async fn fetch(&mut self) -> FetchOutcome {
        let source = Arc::clone(&self.source);
        match self.slots.get_mut(self.current) {
            Some(slot) => slot.resolve(source.as_ref()).await,
            None => FetchOutcome::NotFound,
        }
    }

    /// Step forward unless already at the last slot, then fetch.
    pub async fn next(&mut self) -> FetchOutcome {
        if self.current + 1 < self.slots.len() {
            self.current += 1;
        }
        self.fetch().await
    }

    /// Step back unless already at the first slot, then fetch.
    pub async fn previous(&mut self) -> FetchOutcome {
        self.current = self.current.saturating_sub(1);
        self.fetch().await
    }
}

/// The posts shown by one carousel.
///
/// A refresh replaces the whole value; slots are never inserted or removed
/// after construction.
#[derive(Debug)]
pub enum CarouselData {
    /// Exactly one outcome
    Single(FetchOutcome),
    /// Paged sequence
    Multi(MultiCarouselData),
}

impl CarouselData {
    /// Placeholder shown before the first real fetch.
    pub fn empty() -> Self {
        CarouselData::Single(FetchOutcome::NotFound)
    }

    fn multi(slots: Vec<Slot>, source: Arc<dyn PostSource>) -> Self {
        if slots.is_empty() {
            return Self::empty();
        }
        CarouselData::Multi(MultiCarouselData {
            slots,
            current: 0,
            source,
        })
    }

    /// Run one search and hold its results.
    ///
    /// - API failure: `Single(TransientError)`
    /// - no results: `Single(NotFound)`
    /// - a limit of one: `Single(Found)` with the first result
    /// - otherwise: an eager multi over every returned post
    #[instrument(skip(source), fields(tags = %query.tags(), limit = query.limit()))]
    pub async fn from_search(source: Arc<dyn PostSource>, query: &SearchQuery) -> Self {
        let posts = match source.search(query).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!(error = %e, "Search failed");
                return CarouselData::Single(FetchOutcome::transient(e));
            }
        };

        debug!(count = posts.len(), "Search returned posts");

        if query.is_single() {
            return match posts.into_iter().next() {
                Some(post) => CarouselData::Single(FetchOutcome::Found(post)),
                None => Self::empty(),
            };
        }

        let slots = posts
            .into_iter()
            .map(|post| Slot::Eager(FetchOutcome::Found(post)))
            .collect();
        Self::multi(slots, source)
    }

    /// Lazily page through the favorites of `user`, in the order they were
    /// added.
    #[instrument(skip(source, favorites), fields(user_id = %user))]
    pub async fn from_favorites(
        source: Arc<dyn PostSource>,
        favorites: &dyn FavoritesRepository,
        user: UserId,
    ) -> Self {
        let ids = match favorites.favorites(user).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "Failed to load favorites");
                return CarouselData::Single(FetchOutcome::transient(e));
            }
        };

        debug!(count = ids.len(), "Loaded favorite ids");
        Self::multi(ids.into_iter().map(Slot::lazy).collect(), source)
    }

    /// Outcome at the cursor, without moving it.
    pub async fn fetch(&mut self) -> FetchOutcome {
        match self {
            CarouselData::Single(outcome) => outcome.clone(),
            CarouselData::Multi(multi) => multi.fetch().await,
        }
    }

    /// Step forward; a no-op for single data.
    pub async fn next(&mut self) -> FetchOutcome {
        match self {
            CarouselData::Single(outcome) => outcome.clone(),
            CarouselData::Multi(multi) => multi.next().await,
        }
    }

    /// Step back; a no-op for single data.
    pub async fn previous(&mut self) -> FetchOutcome {
        match self {
            CarouselData::Single(outcome) => outcome.clone(),
            CarouselData::Multi(multi) => multi.previous().await,
        }
    }

    /// Whether the data supports paging.
    pub fn is_multi(&self) -> bool {
        matches!(self, CarouselData::Multi(_))
    }

    /// Shape of the data.
    pub fn kind(&self) -> DataKind {
        match self {
            CarouselData::Single(_) => DataKind::Single,
            CarouselData::Multi(multi) if multi.is_lazy() => DataKind::MultiLazy,
            CarouselData::Multi(_) => DataKind::MultiEager,
        }
    }

    /// `(cursor, len)` for multi data.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            CarouselData::Single(_) => None,
            CarouselData::Multi(multi) => Some((multi.current(), multi.len())),
        }
    }

    /// Move the cursor of multi data, clamped to the last slot.
    pub fn set_current(&mut self, index: usize) {
        if let CarouselData::Multi(multi) = self {
            multi.set_current(index);
        }
    }

    /// The multi view, if any.
    pub fn as_multi(&self) -> Option<&MultiCarouselData> {
        match self {
            CarouselData::Multi(multi) => Some(multi),
            CarouselData::Single(_) => None,
        }
    }
}

impl Default for CarouselData {
    fn default() -> Self {
        Self::empty()
    }
}
