// ── Content state store ──

mod collection;
mod content_store;

pub use collection::{CollectionPhase, CollectionSnapshot};
pub use content_store::{ContentCollectionStore, StoreOptions};
