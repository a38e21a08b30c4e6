//! Reactive content-state layer between `marquee-api` and UI consumers.
//!
//! This crate owns the signed-in user's two collections and keeps them in
//! step with the catalog service:
//!
//! - **[`ContentCollectionStore`]** -- Owns the watchlist and favorites
//!   collections plus their loading/error status. `fetch_*` replaces a
//!   collection wholesale from the server; `add_to_*` / `remove_from_*`
//!   forward a single mutation and leave local state untouched until the
//!   caller re-fetches.
//!
//! - **[`CollectionSnapshot`]** -- Immutable, cheaply cloneable view of one
//!   collection (`items`, `is_loading`, `error`), published through a
//!   `tokio::sync::watch` channel on every state change.
//!
//! - **[`CollectionStream`]** -- Subscription handle exposing
//!   `current()` / `latest()` / `changed()` for re-rendering.
//!
//! - **[`Session`]** -- Lifecycle owner: created at sign-in with an injected
//!   credential slot, discards both collections at sign-out.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{SessionConfig, TlsVerification};
pub use error::CoreError;
pub use model::{CollectionKind, ContentId, ContentItem, ContentKey, MediaType};
pub use session::{Session, SessionState};
pub use store::{CollectionPhase, CollectionSnapshot, ContentCollectionStore, StoreOptions};
pub use stream::CollectionStream;
