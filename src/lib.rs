use chrono::NaiveDate;
use reqwest::Client;
use thiserror::Error;

pub mod browse;
pub mod detail;
pub mod filters;
pub mod source;

pub use filters::{
    AudienceBand, CriticsBand, FilterSelection, Genre, Platform, ResourceType, SortKey,
};
pub use source::{RottenTomatoes, SourceConfig};

/// Errors from either upstream endpoint. A detail page that is missing
/// fields is not an error; those fields just stay `None` on [`MediaDetail`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("failed to decode browse response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One grid entry from a browse page.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSummary {
    pub title: String,
    /// Relative detail-page URL; doubles as the stable per-item id.
    pub media_url: String,
    pub poster_uri: String,
    pub release_date_text: Option<String>,
    /// Critics score 0-100, absent for unscored titles.
    pub critics_score: Option<u8>,
    pub certified_fresh: bool,
    /// Audience score 0-100, absent for unscored titles.
    pub audience_score: Option<u8>,
}

/// Supplementary fields scraped from a title's detail page. Every field is
/// independently optional; pages legitimately omit any of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaDetail {
    pub synopsis: Option<String>,
    pub critics_consensus: Option<String>,
    pub audience_consensus: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub genres: Option<String>,
    pub starring: Option<String>,
    pub release_date: Option<String>,
}

impl MediaDetail {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Release date as a calendar date, when the display text conforms to
    /// the usual "Nov 17, 2023" form (possibly with a trailing qualifier
    /// like ", Wide").
    pub fn release_date_parsed(&self) -> Option<NaiveDate> {
        let text = self.release_date.as_deref()?;
        if let Ok(date) = NaiveDate::parse_from_str(text, "%b %e, %Y") {
            return Some(date);
        }
        let mut parts = text.splitn(3, ", ");
        let (Some(day), Some(rest)) = (parts.next(), parts.next()) else {
            return None;
        };
        let year: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        NaiveDate::parse_from_str(&format!("{day}, {year}"), "%b %e, %Y").ok()
    }
}

/// One fetched page of grid entries plus the opaque resume token for the
/// next call. `next_cursor` is `None` only when the upstream reports the
/// end of the list, never because a page happened to come back empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaQueryPage {
    pub items: Vec<MediaSummary>,
    pub next_cursor: Option<String>,
}

/// A grid entry with its best-effort enrichment. `detail` is `None` when
/// the detail fetch failed; the card renders summary-only in that case.
#[derive(Debug, Clone)]
pub struct EnrichedMedia {
    pub summary: MediaSummary,
    pub detail: Option<MediaDetail>,
}

/// Boundary exposed to the rendering layer. The HTTP client is injected
/// into each call rather than captured by the implementation.
#[async_trait::async_trait]
pub trait MediaSource {
    /// Fetch one page of grid entries for the given browse category and
    /// filter selection. `cursor` resumes from an earlier page's
    /// `next_cursor`; `None` asks for the first page.
    async fn fetch_page(
        &self,
        client: &Client,
        selection: &FilterSelection,
        cursor: Option<&str>,
        resource: ResourceType,
    ) -> Result<MediaQueryPage, FetchError>;

    /// Scrape the detail page behind a grid entry's `media_url`.
    async fn fetch_detail(
        &self,
        client: &Client,
        media_url: &str,
    ) -> Result<MediaDetail, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_date_parses_plain_display_text() {
        let detail = MediaDetail {
            release_date: Some("Nov 17, 2023".to_string()),
            ..MediaDetail::default()
        };
        assert_eq!(
            detail.release_date_parsed(),
            NaiveDate::from_ymd_opt(2023, 11, 17)
        );
    }

    #[test]
    fn release_date_ignores_trailing_qualifier() {
        let detail = MediaDetail {
            release_date: Some("Jun 9, 2023, Wide".to_string()),
            ..MediaDetail::default()
        };
        assert_eq!(
            detail.release_date_parsed(),
            NaiveDate::from_ymd_opt(2023, 6, 9)
        );
    }

    #[test]
    fn unparseable_release_date_is_none() {
        let detail = MediaDetail {
            release_date: Some("sometime soon".to_string()),
            ..MediaDetail::default()
        };
        assert_eq!(detail.release_date_parsed(), None);
        assert_eq!(MediaDetail::default().release_date_parsed(), None);
    }
}
