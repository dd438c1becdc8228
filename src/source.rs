//! Production media source: the Rotten Tomatoes client with its response
//! caches, plus the concurrent per-page enrichment pass.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Client, header};
use tracing::warn;

use crate::filters::{FilterSelection, ResourceType};
use crate::{
    EnrichedMedia, FetchError, MediaDetail, MediaQueryPage, MediaSource, browse, detail,
};

const ORIGIN: &str = "https://www.rottentomatoes.com";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/143.0.0.0 Safari/537.36";

/// Connection and caching settings for the upstream site.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub origin: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Staleness window for cached browse pages.
    pub page_ttl: Duration,
    /// Upper bound on entries per cache.
    pub max_cached: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            origin: ORIGIN.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            page_ttl: Duration::from_secs(3 * 3600),
            max_cached: 1024,
        }
    }
}

/// Build the shared HTTP client: browser user agent, cookie jar on so the
/// site can set whatever session cookies it wants, per-request timeout.
pub fn build_client(config: &SourceConfig) -> Result<Client, FetchError> {
    let mut headers = header::HeaderMap::new();
    if let Ok(ua) = header::HeaderValue::from_str(&config.user_agent) {
        headers.insert(header::USER_AGENT, ua);
    }
    let client = Client::builder()
        .cookie_store(true)
        .default_headers(headers)
        .timeout(config.timeout)
        .build()?;
    Ok(client)
}

/// Client for the rottentomatoes.com browse API and detail pages. Browse
/// pages are cached inside a staleness window; details are cached for the
/// lifetime of the value, i.e. the session. Nothing persists.
#[derive(Clone)]
pub struct RottenTomatoes {
    origin: String,
    page_cache: Cache<String, MediaQueryPage>,
    detail_cache: Cache<String, MediaDetail>,
}

impl RottenTomatoes {
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            origin: config.origin.clone(),
            page_cache: Cache::builder()
                .max_capacity(config.max_cached)
                .time_to_live(config.page_ttl)
                .build(),
            detail_cache: Cache::builder().max_capacity(config.max_cached).build(),
        }
    }

    fn page_key(
        selection: &FilterSelection,
        cursor: Option<&str>,
        resource: ResourceType,
    ) -> String {
        format!(
            "{}/{}?after={}",
            resource.code(),
            selection.to_query(),
            cursor.unwrap_or(browse::FIRST_PAGE)
        )
    }
}

#[async_trait::async_trait]
impl MediaSource for RottenTomatoes {
    async fn fetch_page(
        &self,
        client: &Client,
        selection: &FilterSelection,
        cursor: Option<&str>,
        resource: ResourceType,
    ) -> Result<MediaQueryPage, FetchError> {
        let key = Self::page_key(selection, cursor, resource);
        if let Some(page) = self.page_cache.get(&key).await {
            return Ok(page);
        }
        let page = browse::fetch_page(client, &self.origin, selection, cursor, resource).await?;
        self.page_cache.insert(key, page.clone()).await;
        Ok(page)
    }

    async fn fetch_detail(
        &self,
        client: &Client,
        media_url: &str,
    ) -> Result<MediaDetail, FetchError> {
        if let Some(detail) = self.detail_cache.get(media_url).await {
            return Ok(detail);
        }
        let detail = detail::fetch_detail(client, &self.origin, media_url).await?;
        self.detail_cache
            .insert(media_url.to_string(), detail.clone())
            .await;
        Ok(detail)
    }
}

/// Fetch detail for every item on a page concurrently. The fetches are
/// independent idempotent GETs, so they run as separate tasks with no
/// ordering among them; one item's failure never touches the others, it
/// just yields a summary-only entry.
pub async fn fetch_details<S>(
    source: &Arc<S>,
    client: &Client,
    page: &MediaQueryPage,
) -> Vec<EnrichedMedia>
where
    S: MediaSource + Send + Sync + 'static,
{
    let mut handles = Vec::with_capacity(page.items.len());
    for item in &page.items {
        let source = Arc::clone(source);
        let client = client.clone();
        let media_url = item.media_url.clone();
        handles.push(tokio::spawn(async move {
            source.fetch_detail(&client, &media_url).await
        }));
    }

    let mut enriched = Vec::with_capacity(page.items.len());
    for (item, handle) in page.items.iter().zip(handles) {
        let detail = match handle.await {
            Ok(Ok(detail)) => Some(detail),
            Ok(Err(e)) => {
                warn!(media_url = %item.media_url, error = %e, "detail fetch failed");
                None
            }
            Err(e) => {
                warn!(media_url = %item.media_url, error = %e, "detail task failed");
                None
            }
        };
        enriched.push(EnrichedMedia {
            summary: item.clone(),
            detail,
        });
    }
    enriched
}
