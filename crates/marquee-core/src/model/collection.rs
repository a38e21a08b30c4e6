use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use marquee_api::UserList;

/// The two collections a signed-in user owns.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CollectionKind {
    Watchlist,
    /// Served by the catalog as "likes".
    #[strum(to_string = "favorites", serialize = "likes")]
    Favorites,
}

impl CollectionKind {
    /// The wire resource backing this collection.
    pub fn user_list(self) -> UserList {
        match self {
            Self::Watchlist => UserList::Watchlist,
            Self::Favorites => UserList::Likes,
        }
    }

    // ── Fallback messages ────────────────────────────────────────────
    //
    // Used when a failure carries no server-provided message.

    pub fn fetch_failed_message(self) -> &'static str {
        match self {
            Self::Watchlist => "Failed to fetch watchlist",
            Self::Favorites => "Failed to fetch favorites",
        }
    }

    pub fn add_failed_message(self) -> &'static str {
        match self {
            Self::Watchlist => "Failed to add to watchlist",
            Self::Favorites => "Failed to add to favorites",
        }
    }

    pub fn remove_failed_message(self) -> &'static str {
        match self {
            Self::Watchlist => "Failed to remove from watchlist",
            Self::Favorites => "Failed to remove from favorites",
        }
    }
}
