use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ContentId, MediaType};

/// A reference to a movie or TV entry held in a user collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub media_type: MediaType,
    pub title: String,
    /// Absolute URL, placeholder sentinel, or a partial path that the
    /// presentation layer resolves. Carried verbatim.
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    /// Set by the server when the item joined the collection.
    pub added_at: Option<DateTime<Utc>>,
    /// User rating 0–10; only favorites carry one.
    pub rating: Option<f64>,
}

impl ContentItem {
    /// Identity within a collection: the same id may appear once as a
    /// movie and once as a series.
    pub fn key(&self) -> ContentKey {
        ContentKey {
            id: self.id.clone(),
            media_type: self.media_type,
        }
    }

    /// Four-digit year prefix of `release_date`, if it has one.
    pub fn release_year(&self) -> Option<&str> {
        let date = self.release_date.as_deref()?;
        let year = date.get(..4)?;
        year.bytes().all(|b| b.is_ascii_digit()).then_some(year)
    }
}

/// `(id, media_type)` identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    pub id: ContentId,
    pub media_type: MediaType,
}

impl ContentKey {
    pub fn new(id: impl Into<ContentId>, media_type: MediaType) -> Self {
        Self {
            id: id.into(),
            media_type,
        }
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id, self.media_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(release_date: Option<&str>) -> ContentItem {
        ContentItem {
            id: ContentId::Numeric(1),
            media_type: MediaType::Movie,
            title: "A".into(),
            poster_path: None,
            release_date: release_date.map(Into::into),
            added_at: None,
            rating: None,
        }
    }

    #[test]
    fn release_year_takes_prefix() {
        assert_eq!(item(Some("1999-03-30")).release_year(), Some("1999"));
        assert_eq!(item(Some("2010")).release_year(), Some("2010"));
    }

    #[test]
    fn release_year_rejects_short_or_non_numeric() {
        assert_eq!(item(None).release_year(), None);
        assert_eq!(item(Some("")).release_year(), None);
        assert_eq!(item(Some("TBA")).release_year(), None);
        assert_eq!(item(Some("soon-ish")).release_year(), None);
    }

    #[test]
    fn key_distinguishes_media_type() {
        let movie = item(None);
        let mut show = item(None);
        show.media_type = MediaType::Tv;
        assert_ne!(movie.key(), show.key());
        assert_eq!(movie.key().to_string(), "1-movie");
        assert_eq!(show.key().to_string(), "1-tv");
    }
}
