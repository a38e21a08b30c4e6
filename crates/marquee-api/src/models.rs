// Wire types for the user-content endpoints
//
// These mirror the JSON the catalog service sends and accepts. Field
// aliases cover both the snake_case the service emits and the camelCase
// some deployments use. `marquee-core` converts them into domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ── Identifiers ─────────────────────────────────────────────────────

/// Opaque catalog identifier, unique within a media type.
///
/// Catalog ids are usually numeric but are carried as strings by some
/// deployments; both forms round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for ContentId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map_or_else(|_| Self::Text(s.to_owned()), Self::Numeric))
    }
}

impl From<u64> for ContentId {
    fn from(n: u64) -> Self {
        Self::Numeric(n)
    }
}

impl From<&str> for ContentId {
    fn from(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|never| match never {})
    }
}

/// Kind of catalog entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MediaType {
    Movie,
    Tv,
}

// ── Resources ───────────────────────────────────────────────────────

/// The two per-user lists exposed under `/api/user/`.
///
/// The variant's lowercase name is both the path segment and the key
/// that wraps the list in a successful GET response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum UserList {
    Watchlist,
    Likes,
}

impl UserList {
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Watchlist => "watchlist",
            Self::Likes => "likes",
        }
    }
}

/// A single entry in a user list, as sent by the server.
///
/// TV records may carry `name` and `first_air_date` next to (or instead
/// of) `title` and `release_date`, so those are separate fields rather
/// than aliases; a record with both keys still parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContentItem {
    pub id: ContentId,
    #[serde(alias = "mediaType")]
    pub media_type: MediaType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "posterPath")]
    pub poster_path: Option<String>,
    #[serde(default, alias = "releaseDate")]
    pub release_date: Option<String>,
    #[serde(default, alias = "firstAirDate", skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    /// Server-assigned timestamp, kept raw. Usually RFC 3339.
    #[serde(default, alias = "addedAt")]
    pub added_at: Option<String>,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl UserContentItem {
    /// `title`, falling back to `name`.
    pub fn display_title(&self) -> Option<&str> {
        first_present(self.title.as_deref(), self.name.as_deref())
    }

    /// `release_date`, falling back to `first_air_date`.
    pub fn display_date(&self) -> Option<&str> {
        first_present(self.release_date.as_deref(), self.first_air_date.as_deref())
    }

    /// `added_at`, falling back to `created_at`.
    pub fn timestamp(&self) -> Option<&str> {
        first_present(self.added_at.as_deref(), self.created_at.as_deref())
    }
}

fn first_present<'a>(primary: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    primary
        .filter(|s| !s.is_empty())
        .or_else(|| fallback.filter(|s| !s.is_empty()))
}

/// Successful GET body: `{ "watchlist": [...] }` or `{ "likes": [...] }`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserListEnvelope {
    #[serde(default)]
    watchlist: Option<Vec<UserContentItem>>,
    #[serde(default)]
    likes: Option<Vec<UserContentItem>>,
}

impl UserListEnvelope {
    /// Take the list for `kind`. A missing key yields an empty list.
    pub(crate) fn into_items(self, kind: UserList) -> Vec<UserContentItem> {
        match kind {
            UserList::Watchlist => self.watchlist,
            UserList::Likes => self.likes,
        }
        .unwrap_or_default()
    }
}

/// POST body for adding an item.
#[derive(Debug, Serialize)]
pub(crate) struct AddItemRequest {
    pub media_type: MediaType,
}

/// Error body: `{ "message": "..." }`, every field optional.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn content_id_parses_numeric_and_text() {
        assert_eq!("42".parse::<ContentId>().unwrap(), ContentId::Numeric(42));
        assert_eq!(
            "tt0111161".parse::<ContentId>().unwrap(),
            ContentId::Text("tt0111161".into())
        );
        assert_eq!(ContentId::from("7").to_string(), "7");
    }

    #[test]
    fn content_id_deserializes_from_number_or_string() {
        let n: ContentId = serde_json::from_value(json!(550)).unwrap();
        let s: ContentId = serde_json::from_value(json!("abc")).unwrap();
        assert_eq!(n, ContentId::Numeric(550));
        assert_eq!(s, ContentId::Text("abc".into()));
    }

    #[test]
    fn media_type_wire_form_is_lowercase() {
        assert_eq!(serde_json::to_value(MediaType::Tv).unwrap(), json!("tv"));
        assert_eq!("Movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!(MediaType::Movie.to_string(), "movie");
    }

    #[test]
    fn item_accepts_snake_case_fields() {
        let item: UserContentItem = serde_json::from_value(json!({
            "id": 603,
            "media_type": "movie",
            "title": "The Matrix",
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "release_date": "1999-03-30",
            "created_at": "2024-05-01T12:00:00.000Z",
            "rating": 9
        }))
        .unwrap();

        assert_eq!(item.id, ContentId::Numeric(603));
        assert_eq!(item.media_type, MediaType::Movie);
        assert_eq!(item.timestamp(), Some("2024-05-01T12:00:00.000Z"));
        assert_eq!(item.rating, Some(9.0));
    }

    #[test]
    fn item_accepts_camel_case_fields() {
        let item: UserContentItem = serde_json::from_value(json!({
            "id": 1,
            "mediaType": "tv",
            "name": "Dark",
            "posterPath": "/placeholder-poster.png"
        }))
        .unwrap();

        assert_eq!(item.media_type, MediaType::Tv);
        assert_eq!(item.display_title(), Some("Dark"));
        assert_eq!(item.poster_path.as_deref(), Some("/placeholder-poster.png"));
        assert!(item.display_date().is_none());
    }

    #[test]
    fn item_with_title_and_name_parses() {
        let item: UserContentItem = serde_json::from_value(json!({
            "id": 1,
            "media_type": "tv",
            "title": "",
            "name": "Dark",
            "release_date": "2017-12-01",
            "first_air_date": "2017-12-01",
            "added_at": "2024-05-01T12:00:00Z",
            "created_at": "2024-04-30T09:00:00Z"
        }))
        .unwrap();

        assert_eq!(item.display_title(), Some("Dark"));
        assert_eq!(item.display_date(), Some("2017-12-01"));
        assert_eq!(item.timestamp(), Some("2024-05-01T12:00:00Z"));
    }

    #[test]
    fn envelope_missing_key_is_empty() {
        let env: UserListEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(env.into_items(UserList::Likes).is_empty());
    }

    #[test]
    fn user_list_path_segments() {
        assert_eq!(UserList::Watchlist.path_segment(), "watchlist");
        assert_eq!(UserList::Likes.path_segment(), "likes");
        assert_eq!(UserList::Likes.to_string(), "likes");
    }
}
