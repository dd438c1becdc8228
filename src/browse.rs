//! Browse-endpoint client: one filtered, cursor-paginated grid fetch
//! against the site's undocumented `napi` JSON API.

use reqwest::{Client, header};
use serde::Deserialize;
use tracing::debug;

use crate::filters::{FilterSelection, ResourceType};
use crate::{FetchError, MediaQueryPage, MediaSummary};

/// Cursor value the upstream expects for the first page.
pub const FIRST_PAGE: &str = "1";

/// Fetch one page of the grid. Non-success status and malformed JSON both
/// abort the page fetch; retrying is the caller's business.
pub async fn fetch_page(
    client: &Client,
    origin: &str,
    selection: &FilterSelection,
    cursor: Option<&str>,
    resource: ResourceType,
) -> Result<MediaQueryPage, FetchError> {
    let url = format!(
        "{origin}/napi/browse/{}/{}",
        resource.code(),
        selection.to_query()
    );
    let after = cursor.unwrap_or(FIRST_PAGE);
    debug!(url = %url, after = %after, "browse request");

    let resp = client
        .get(&url)
        .header(header::ACCEPT, "application/json")
        .query(&[("after", after)])
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(FetchError::Status {
            status: resp.status(),
            url,
        });
    }

    let body = resp.text().await?;
    let parsed: BrowseResponse = serde_json::from_str(&body)?;
    Ok(page_from_response(parsed))
}

// Wire shape of the napi response, reduced to the fields the grid needs.
// Everything defaults so a sparse item degrades instead of failing the page.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowseResponse {
    #[serde(default)]
    grid: Grid,
    #[serde(default)]
    page_info: PageInfo,
}

#[derive(Debug, Default, Deserialize)]
struct Grid {
    #[serde(default)]
    list: Vec<GridItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    media_url: String,
    #[serde(default)]
    poster_uri: String,
    #[serde(default)]
    release_date_text: String,
    #[serde(default)]
    critics_score: ScoreBlock,
    #[serde(default)]
    audience_score: ScoreBlock,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreBlock {
    #[serde(default)]
    score: String,
    #[serde(default)]
    certified_attribute: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    #[serde(default)]
    end_cursor: String,
    #[serde(default)]
    has_next_page: bool,
}

fn page_from_response(resp: BrowseResponse) -> MediaQueryPage {
    let items = resp.grid.list.into_iter().map(summary_from_item).collect();
    let PageInfo {
        end_cursor,
        has_next_page,
    } = resp.page_info;
    // Only the upstream's own pagination flag ends the list; an empty
    // item batch does not.
    let next_cursor = (has_next_page && !end_cursor.is_empty()).then_some(end_cursor);
    MediaQueryPage { items, next_cursor }
}

fn summary_from_item(item: GridItem) -> MediaSummary {
    MediaSummary {
        critics_score: parse_score(&item.critics_score.score),
        certified_fresh: !item.critics_score.certified_attribute.is_empty(),
        audience_score: parse_score(&item.audience_score.score),
        title: item.title,
        media_url: item.media_url,
        poster_uri: item.poster_uri,
        release_date_text: non_empty(item.release_date_text),
    }
}

/// Scores arrive as strings, empty when a title is unscored.
fn parse_score(raw: &str) -> Option<u8> {
    raw.trim().parse().ok().filter(|score| *score <= 100)
}

fn non_empty(s: String) -> Option<String> {
    (!s.trim().is_empty()).then_some(s)
}
