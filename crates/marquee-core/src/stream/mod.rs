// ── Reactive collection streams ──
//
// Subscription types for consuming collection changes from the store.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::CollectionSnapshot;

/// A subscription to one collection.
///
/// Provides point-in-time snapshot access and change notification via
/// [`changed()`](Self::changed) or by converting into a `Stream`.
pub struct CollectionStream {
    current: CollectionSnapshot,
    receiver: watch::Receiver<CollectionSnapshot>,
}

impl CollectionStream {
    pub(crate) fn new(mut receiver: watch::Receiver<CollectionSnapshot>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// The snapshot seen most recently by this subscription.
    pub fn current(&self) -> &CollectionSnapshot {
        &self.current
    }

    /// The latest published snapshot.
    pub fn latest(&self) -> CollectionSnapshot {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<CollectionSnapshot> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` that yields the current snapshot first,
    /// then one per change.
    pub fn into_stream(self) -> CollectionWatchStream {
        CollectionWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct CollectionWatchStream {
    inner: WatchStream<CollectionSnapshot>,
}

impl Stream for CollectionWatchStream {
    type Item = CollectionSnapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
