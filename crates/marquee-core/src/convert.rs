// ── Wire → domain conversion ──
//
// Maps `marquee_api` wire items into canonical `ContentItem`s. Every wire
// item converts; fields the domain cannot interpret degrade to `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::trace;

use marquee_api::UserContentItem;

use crate::model::ContentItem;

impl From<UserContentItem> for ContentItem {
    fn from(raw: UserContentItem) -> Self {
        let added_at = raw.timestamp().and_then(parse_timestamp);
        let title = raw.display_title().unwrap_or_default().to_owned();
        let release_date = raw.display_date().map(str::to_owned);
        Self {
            id: raw.id,
            media_type: raw.media_type,
            title,
            poster_path: raw.poster_path.filter(|p| !p.is_empty()),
            release_date,
            added_at,
            rating: raw.rating.filter(|r| r.is_finite()),
        }
    }
}

/// Parse a server timestamp: RFC 3339 first, then a bare `YYYY-MM-DD HH:MM:SS`
/// or `YYYY-MM-DD` read as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    trace!(raw, "unrecognized timestamp format");
    None
}
