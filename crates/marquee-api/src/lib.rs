// marquee-api: Async Rust client for the catalog service's user-content endpoints
//
// Covers the watchlist and likes (favorites) resources under `/api/user/`.
// Every request carries a bearer token read fresh from a `CredentialSource`.

pub mod auth;
pub mod error;
pub mod models;
pub mod transport;
pub mod user_content;

pub use auth::{CredentialSource, SharedToken, StaticToken};
pub use error::Error;
pub use models::{ContentId, MediaType, UserContentItem, UserList};
pub use transport::{TlsMode, TransportConfig};
pub use user_content::UserContentClient;
