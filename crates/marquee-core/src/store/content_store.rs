// ── Content collection store ──
//
// Owns the watchlist and favorites collections and performs the
// authenticated fetch/add/remove operations against the catalog service.

use marquee_api::UserContentClient;
use tracing::{debug, info, warn};

use super::collection::{CollectionSnapshot, ContentCollection};
use crate::error::CoreError;
use crate::model::{CollectionKind, ContentId, ContentItem, MediaType};
use crate::stream::CollectionStream;

/// Behavioral switches for [`ContentCollectionStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Ignore a fetch response when a newer fetch of the same collection
    /// has started since. When off, whichever response arrives last wins.
    pub discard_stale_fetches: bool,
}

/// Watchlist and favorites state, synchronized with the server.
///
/// Operations may run concurrently from a shared reference. Each
/// response is applied in one atomic step and no lock is held across
/// an `.await`.
pub struct ContentCollectionStore {
    client: UserContentClient,
    watchlist: ContentCollection,
    favorites: ContentCollection,
    options: StoreOptions,
}

impl ContentCollectionStore {
    pub fn new(client: UserContentClient) -> Self {
        Self::with_options(client, StoreOptions::default())
    }

    pub fn with_options(client: UserContentClient, options: StoreOptions) -> Self {
        Self {
            client,
            watchlist: ContentCollection::new(),
            favorites: ContentCollection::new(),
            options,
        }
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    fn collection(&self, kind: CollectionKind) -> &ContentCollection {
        match kind {
            CollectionKind::Watchlist => &self.watchlist,
            CollectionKind::Favorites => &self.favorites,
        }
    }

    // ── Fetch ────────────────────────────────────────────────────────

    /// Replace a collection with the server's list.
    ///
    /// Without a credential this records the failure in the collection's
    /// `error` and returns [`CoreError::Unauthenticated`] without sending
    /// anything. Otherwise the collection enters the loading state until
    /// the response settles it; a failure is both recorded and returned.
    pub async fn fetch(&self, kind: CollectionKind) -> Result<(), CoreError> {
        let collection = self.collection(kind);

        if !self.client.is_authenticated() {
            let err = CoreError::Unauthenticated;
            warn!(collection = %kind, "fetch skipped: {err}");
            collection.fail(err.to_string());
            return Err(err);
        }

        let ticket = collection.begin_fetch();
        let result = self.client.list(kind.user_list()).await;

        if self.options.discard_stale_fetches && !collection.is_current(ticket) {
            debug!(
                collection = %kind,
                generation = ticket.generation,
                "discarding superseded fetch response"
            );
            return result.map(|_| ()).map_err(CoreError::from);
        }

        match result {
            Ok(items) => {
                let items: Vec<ContentItem> = items.into_iter().map(ContentItem::from).collect();
                let count = items.len();
                if collection.replace(ticket, items) {
                    info!(collection = %kind, count, "collection refreshed");
                } else {
                    debug!(collection = %kind, "collection was reset during fetch, response dropped");
                }
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                let message = err.message_or(kind.fetch_failed_message());
                warn!(collection = %kind, error = %err, "fetch failed");
                if !collection.fail_fetch(ticket, message) {
                    debug!(
                        collection = %kind,
                        "collection was reset during fetch, failure not recorded"
                    );
                }
                Err(err)
            }
        }
    }

    pub async fn fetch_watchlist(&self) -> Result<(), CoreError> {
        self.fetch(CollectionKind::Watchlist).await
    }

    pub async fn fetch_favorites(&self) -> Result<(), CoreError> {
        self.fetch(CollectionKind::Favorites).await
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Ask the server to add an item. Local state is untouched; re-fetch
    /// to observe the change.
    pub async fn add(
        &self,
        kind: CollectionKind,
        id: &ContentId,
        media_type: MediaType,
    ) -> Result<(), CoreError> {
        self.client
            .add(kind.user_list(), id, media_type)
            .await
            .map_err(|e| {
                let err = CoreError::from(e);
                warn!(collection = %kind, %id, error = %err, "add failed");
                err
            })
    }

    /// Ask the server to remove an item. The id is forwarded whether or
    /// not it is present locally.
    pub async fn remove(&self, kind: CollectionKind, id: &ContentId) -> Result<(), CoreError> {
        self.client
            .remove(kind.user_list(), id)
            .await
            .map_err(|e| {
                let err = CoreError::from(e);
                warn!(collection = %kind, %id, error = %err, "remove failed");
                err
            })
    }

    pub async fn add_to_watchlist(
        &self,
        id: &ContentId,
        media_type: MediaType,
    ) -> Result<(), CoreError> {
        self.add(CollectionKind::Watchlist, id, media_type).await
    }

    pub async fn add_to_favorites(
        &self,
        id: &ContentId,
        media_type: MediaType,
    ) -> Result<(), CoreError> {
        self.add(CollectionKind::Favorites, id, media_type).await
    }

    pub async fn remove_from_watchlist(&self, id: &ContentId) -> Result<(), CoreError> {
        self.remove(CollectionKind::Watchlist, id).await
    }

    pub async fn remove_from_favorites(&self, id: &ContentId) -> Result<(), CoreError> {
        self.remove(CollectionKind::Favorites, id).await
    }

    // ── Snapshots & subscriptions ────────────────────────────────────

    pub fn snapshot(&self, kind: CollectionKind) -> CollectionSnapshot {
        self.collection(kind).snapshot()
    }

    pub fn watchlist(&self) -> CollectionSnapshot {
        self.watchlist.snapshot()
    }

    pub fn favorites(&self) -> CollectionSnapshot {
        self.favorites.snapshot()
    }

    /// Subscribe to every state change of one collection.
    pub fn subscribe(&self, kind: CollectionKind) -> CollectionStream {
        CollectionStream::new(self.collection(kind).subscribe())
    }

    /// Discard both collections and their status. Fetches still in flight
    /// settle without touching the cleared state.
    pub fn reset(&self) {
        self.watchlist.clear();
        self.favorites.clear();
        debug!("content collections cleared");
    }
}
