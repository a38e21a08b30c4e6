// ── Domain model ──
//
// Canonical content types consumed by the store and its subscribers.
// Identifier types are shared with the wire layer.

pub mod collection;
pub mod content;

pub use collection::CollectionKind;
pub use content::{ContentItem, ContentKey};
pub use marquee_api::{ContentId, MediaType};
