// ── Reactive content collection ──
//
// One named collection plus its loading/error status, published as an
// immutable snapshot through a `watch` channel. Every transition is a
// single `send_modify`, so subscribers never observe a half-applied
// response.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use strum::Display;
use tokio::sync::watch;

use crate::model::{ContentItem, ContentKey};

/// Coarse lifecycle state of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CollectionPhase {
    Empty,
    Loading,
    Loaded,
    Error,
}

/// Point-in-time view of one collection.
///
/// Cheap to clone: the item list is shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct CollectionSnapshot {
    /// Items in server order.
    pub items: Arc<Vec<ContentItem>>,
    /// True only while a fetch is outstanding.
    pub is_loading: bool,
    /// Message from the most recent failed fetch.
    pub error: Option<String>,
    /// When the items were last replaced from a successful fetch.
    pub last_fetched: Option<DateTime<Utc>>,
    /// Bumped on every state change.
    pub version: u64,
}

impl CollectionSnapshot {
    pub fn phase(&self) -> CollectionPhase {
        if self.is_loading {
            CollectionPhase::Loading
        } else if self.error.is_some() {
            CollectionPhase::Error
        } else if self.last_fetched.is_some() {
            CollectionPhase::Loaded
        } else {
            CollectionPhase::Empty
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter()
    }

    /// First item matching the `(id, media_type)` key.
    pub fn get(&self, key: &ContentKey) -> Option<&ContentItem> {
        self.items
            .iter()
            .find(|item| item.id == key.id && item.media_type == key.media_type)
    }

    pub fn contains(&self, key: &ContentKey) -> bool {
        self.get(key).is_some()
    }
}

/// Identifies one fetch: its place among fetches of the collection and
/// the reset epoch it started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchTicket {
    pub(crate) generation: u64,
    epoch: u64,
}

pub(crate) struct ContentCollection {
    state: watch::Sender<CollectionSnapshot>,
    /// Identifies the most recently started fetch.
    generation: AtomicU64,
    /// Bumped by `clear`. A response from an earlier epoch is never applied.
    epoch: AtomicU64,
}

impl ContentCollection {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(CollectionSnapshot::default());
        Self {
            state,
            generation: AtomicU64::new(0),
            epoch: AtomicU64::new(0),
        }
    }

    /// Enter the loading state and return the ticket of this fetch.
    pub(crate) fn begin_fetch(&self) -> FetchTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let epoch = self.epoch.load(Ordering::Acquire);
        self.state.send_modify(|snap| {
            snap.is_loading = true;
            snap.error = None;
            snap.version += 1;
        });
        FetchTicket { generation, epoch }
    }

    /// Whether `ticket` is still the latest fetch started.
    pub(crate) fn is_current(&self, ticket: FetchTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.generation
    }

    /// Replace the items wholesale with a server response. Returns false,
    /// leaving state alone, when the collection was cleared after the
    /// fetch began.
    pub(crate) fn replace(&self, ticket: FetchTicket, items: Vec<ContentItem>) -> bool {
        let items = Arc::new(items);
        self.settle(ticket, |snap| {
            snap.items = items;
            snap.error = None;
            snap.last_fetched = Some(Utc::now());
        })
    }

    /// Record a failed fetch. Items are left as they were. Same reset rule
    /// as [`replace`](Self::replace).
    pub(crate) fn fail_fetch(&self, ticket: FetchTicket, message: String) -> bool {
        self.settle(ticket, |snap| snap.error = Some(message))
    }

    /// Record a failure that never reached the network.
    pub(crate) fn fail(&self, message: String) {
        self.state.send_modify(|snap| {
            snap.is_loading = false;
            snap.error = Some(message);
            snap.version += 1;
        });
    }

    // The epoch is read under the channel's write lock, and `clear` bumps
    // it before taking that lock, so a response can never land after the
    // clear it lost to.
    fn settle(&self, ticket: FetchTicket, apply: impl FnOnce(&mut CollectionSnapshot)) -> bool {
        self.state.send_if_modified(|snap| {
            if self.epoch.load(Ordering::Acquire) != ticket.epoch {
                return false;
            }
            apply(snap);
            snap.is_loading = false;
            snap.version += 1;
            true
        })
    }

    pub(crate) fn snapshot(&self) -> CollectionSnapshot {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<CollectionSnapshot> {
        self.state.subscribe()
    }

    /// Drop all items and status. Responses to fetches already in flight
    /// are ignored.
    pub(crate) fn clear(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.state.send_modify(|snap| {
            let version = snap.version + 1;
            *snap = CollectionSnapshot {
                version,
                ..CollectionSnapshot::default()
            };
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ContentId, MediaType};

    fn item(id: u64, media_type: MediaType) -> ContentItem {
        ContentItem {
            id: ContentId::Numeric(id),
            media_type,
            title: format!("title {id}"),
            poster_path: None,
            release_date: None,
            added_at: None,
            rating: None,
        }
    }

    #[test]
    fn starts_empty() {
        let col = ContentCollection::new();
        let snap = col.snapshot();
        assert!(snap.is_empty());
        assert_eq!(snap.phase(), CollectionPhase::Empty);
        assert_eq!(snap.version, 0);
    }

    #[test]
    fn begin_fetch_clears_error_and_sets_loading() {
        let col = ContentCollection::new();
        col.fail("boom".into());
        assert_eq!(col.snapshot().phase(), CollectionPhase::Error);

        col.begin_fetch();
        let snap = col.snapshot();
        assert!(snap.is_loading);
        assert!(snap.error.is_none());
        assert_eq!(snap.phase(), CollectionPhase::Loading);
    }

    #[test]
    fn replace_keeps_server_order() {
        let col = ContentCollection::new();
        let ticket = col.begin_fetch();
        assert!(col.replace(ticket, vec![item(3, MediaType::Tv), item(1, MediaType::Movie)]));

        let snap = col.snapshot();
        let ids: Vec<_> = snap.iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, ["3", "1"]);
        assert!(!snap.is_loading);
        assert!(snap.last_fetched.is_some());
        assert_eq!(snap.phase(), CollectionPhase::Loaded);
    }

    #[test]
    fn fail_leaves_items_in_place() {
        let col = ContentCollection::new();
        col.replace(col.begin_fetch(), vec![item(1, MediaType::Movie)]);
        let ticket = col.begin_fetch();
        col.fail_fetch(ticket, "Failed to fetch watchlist".into());

        let snap = col.snapshot();
        assert_eq!(snap.len(), 1);
        assert!(!snap.is_loading);
        assert_eq!(snap.error.as_deref(), Some("Failed to fetch watchlist"));
    }

    #[test]
    fn same_id_different_media_type_are_distinct() {
        let col = ContentCollection::new();
        col.replace(
            col.begin_fetch(),
            vec![item(7, MediaType::Movie), item(7, MediaType::Tv)],
        );

        let snap = col.snapshot();
        assert_eq!(snap.len(), 2);
        assert!(snap.contains(&ContentKey::new(7u64, MediaType::Movie)));
        assert!(snap.contains(&ContentKey::new(7u64, MediaType::Tv)));
        assert!(!snap.contains(&ContentKey::new(8u64, MediaType::Tv)));
    }

    #[test]
    fn generations_track_latest_fetch() {
        let col = ContentCollection::new();
        let first = col.begin_fetch();
        let second = col.begin_fetch();
        assert!(!col.is_current(first));
        assert!(col.is_current(second));
    }

    #[test]
    fn response_after_clear_is_ignored() {
        let col = ContentCollection::new();
        let ticket = col.begin_fetch();
        col.clear();
        let cleared = col.snapshot().version;

        assert!(!col.replace(ticket, vec![item(1, MediaType::Movie)]));
        assert!(!col.fail_fetch(ticket, "late".into()));

        let snap = col.snapshot();
        assert!(snap.is_empty());
        assert!(snap.error.is_none());
        assert_eq!(snap.phase(), CollectionPhase::Empty);
        assert_eq!(snap.version, cleared);

        let next = col.begin_fetch();
        assert!(col.replace(next, vec![item(2, MediaType::Tv)]));
        assert_eq!(col.snapshot().len(), 1);
    }

    #[test]
    fn clear_resets_status_and_bumps_version() {
        let col = ContentCollection::new();
        col.replace(col.begin_fetch(), vec![item(1, MediaType::Movie)]);
        let before = col.snapshot().version;

        col.clear();
        let snap = col.snapshot();
        assert!(snap.is_empty());
        assert!(snap.last_fetched.is_none());
        assert_eq!(snap.phase(), CollectionPhase::Empty);
        assert!(snap.version > before);
    }

    #[test]
    fn subscribers_see_every_transition() {
        let col = ContentCollection::new();
        let mut rx = col.subscribe();

        let ticket = col.begin_fetch();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_loading);

        col.replace(ticket, vec![item(1, MediaType::Movie)]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}
