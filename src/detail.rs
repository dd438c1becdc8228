//! Detail-page scraper. Extracts the synopsis and consensus blocks by
//! their `data-qa` markers and walks the labelled info rows (Director,
//! Starring, Release Date, ...) into [`MediaDetail`] fields.
//!
//! Extraction is best-effort throughout: a page that lacks a marker or a
//! label simply leaves that field `None`. Only the page fetch itself can
//! fail.

use std::collections::HashMap;

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::{FetchError, MediaDetail};

// Candidate labels per output field, tried in order. Some entries label
// their credits row "Creator" instead of "Director", and release dates
// appear under a theatrical or a streaming label.
const DIRECTOR_LABELS: &[&str] = &["director", "creator", "creators"];
const WRITER_LABELS: &[&str] = &["writer"];
const GENRE_LABELS: &[&str] = &["genre"];
const STARRING_LABELS: &[&str] = &["starring"];
const RELEASE_DATE_LABELS: &[&str] = &["release date (theaters)", "release date (streaming)"];

/// Fetch a title's detail page and scrape whatever it carries.
pub async fn fetch_detail(
    client: &Client,
    origin: &str,
    media_url: &str,
) -> Result<MediaDetail, FetchError> {
    let url = format!("{origin}{media_url}");
    debug!(url = %url, "detail request");

    let resp = client.get(&url).send().await?;
    if !resp.status().is_success() {
        return Err(FetchError::Status {
            status: resp.status(),
            url,
        });
    }

    let body = resp.text().await?;
    Ok(parse_detail(&body))
}

/// Parse a detail document. Never fails; absent markers become `None`.
pub fn parse_detail(html: &str) -> MediaDetail {
    let doc = Html::parse_document(html);
    let info = info_rows(&doc);

    MediaDetail {
        synopsis: marked_block(&doc, "movie-info-synopsis"),
        critics_consensus: marked_block(&doc, "critics-consensus"),
        audience_consensus: marked_block(&doc, "audience-consensus"),
        director: lookup(&info, DIRECTOR_LABELS),
        writer: lookup(&info, WRITER_LABELS),
        genres: lookup(&info, GENRE_LABELS),
        starring: lookup(&info, STARRING_LABELS),
        release_date: lookup(&info, RELEASE_DATE_LABELS),
    }
}

/// Text of the first element carrying the given `data-qa` role marker.
fn marked_block(doc: &Html, marker: &str) -> Option<String> {
    let sel = Selector::parse(&format!("[data-qa=\"{marker}\"]")).ok()?;
    let el = doc.select(&sel).next()?;
    let text = text_of(el).trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Collect the labelled info rows into a normalized-label -> value map.
/// Each row has a `b` label child and a `span` value child; a value made
/// of links (e.g. several starring names) joins the link texts with ", ".
fn info_rows(doc: &Html) -> HashMap<String, String> {
    let mut rows = HashMap::new();
    let (Ok(row_sel), Ok(label_sel), Ok(value_sel), Ok(link_sel)) = (
        Selector::parse(".info-item"),
        Selector::parse("b"),
        Selector::parse("span"),
        Selector::parse("a"),
    ) else {
        return rows;
    };

    for row in doc.select(&row_sel) {
        let Some(label_el) = row.select(&label_sel).next() else {
            continue;
        };
        let label = normalize_label(&text_of(label_el));
        if label.is_empty() {
            continue;
        }

        let Some(value_el) = row.select(&value_sel).next() else {
            continue;
        };
        let links: Vec<String> = value_el
            .select(&link_sel)
            .map(|a| squish(&text_of(a)))
            .filter(|t| !t.is_empty())
            .collect();
        let value = if links.is_empty() {
            squish(&text_of(value_el))
        } else {
            links.join(", ")
        };
        if value.is_empty() {
            continue;
        }

        rows.insert(label, value);
    }

    rows
}

fn lookup(info: &HashMap<String, String>, labels: &[&str]) -> Option<String> {
    labels.iter().find_map(|label| info.get(*label).cloned())
}

/// "Release Date (Theaters):" -> "release date (theaters)".
fn normalize_label(raw: &str) -> String {
    raw.trim().trim_end_matches(':').trim_end().to_lowercase()
}

/// Collapse whitespace runs to single spaces and trim the ends.
fn squish(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"<html><body>
        <p data-qa="movie-info-synopsis">
            A curmudgeonly instructor at a New England prep school remains
            on campus during Christmas break.
        </p>
        <p data-qa="critics-consensus">Led by a trio of outstanding performances.</p>
        <p data-qa="audience-consensus">Bittersweet and quietly funny.</p>
        <div class="info-item"><b>Director:</b> <span><a href="/celebrity/alexander_payne">Alexander Payne</a></span></div>
        <div class="info-item"><b>Writer:</b> <span>David Hemingson</span></div>
        <div class="info-item"><b>Genre:</b> <span>Comedy, Drama</span></div>
        <div class="info-item"><b>Starring:</b>
            <span>
                <a href="/celebrity/paul_giamatti">Paul Giamatti</a>,
                <a href="/celebrity/davine_joy_randolph">Da'Vine Joy Randolph</a>
            </span>
        </div>
        <div class="info-item"><b>Release Date (Theaters):</b> <span>Nov 10, 2023, Limited</span></div>
        <div class="info-item"><b>Release Date (Streaming):</b> <span>Dec 29, 2023</span></div>
    </body></html>"#;

    #[test]
    fn full_page_extracts_every_field() {
        let detail = parse_detail(FULL_PAGE);
        assert!(detail.synopsis.as_deref().unwrap().starts_with("A curmudgeonly instructor"));
        assert_eq!(
            detail.critics_consensus.as_deref(),
            Some("Led by a trio of outstanding performances.")
        );
        assert_eq!(
            detail.audience_consensus.as_deref(),
            Some("Bittersweet and quietly funny.")
        );
        assert_eq!(detail.director.as_deref(), Some("Alexander Payne"));
        assert_eq!(detail.writer.as_deref(), Some("David Hemingson"));
        assert_eq!(detail.genres.as_deref(), Some("Comedy, Drama"));
        assert_eq!(
            detail.starring.as_deref(),
            Some("Paul Giamatti, Da'Vine Joy Randolph")
        );
        // Theatrical label wins over streaming when both are present.
        assert_eq!(detail.release_date.as_deref(), Some("Nov 10, 2023, Limited"));
    }

    #[test]
    fn page_without_any_markers_yields_all_absent_fields() {
        let detail = parse_detail("<html><body><p>nothing of interest</p></body></html>");
        assert!(detail.is_empty());
    }

    #[test]
    fn creator_label_falls_back_to_director() {
        let detail = parse_detail(
            r#"<div class="info-item"><b>Creator:</b> <span>Jane Doe</span></div>"#,
        );
        assert_eq!(detail.director.as_deref(), Some("Jane Doe"));

        // "Director" beats "Creator" when a page somehow carries both.
        let detail = parse_detail(
            r#"<div class="info-item"><b>Director:</b> <span>Jane Doe</span></div>
               <div class="info-item"><b>Creator:</b> <span>John Roe</span></div>"#,
        );
        assert_eq!(detail.director.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn streaming_release_date_is_used_when_theatrical_is_absent() {
        let detail = parse_detail(
            r#"<div class="info-item"><b>Release Date (Streaming):</b> <span>Dec 29, 2023</span></div>"#,
        );
        assert_eq!(detail.release_date.as_deref(), Some("Dec 29, 2023"));
        assert_eq!(
            detail.release_date_parsed(),
            chrono::NaiveDate::from_ymd_opt(2023, 12, 29)
        );
    }

    #[test]
    fn values_collapse_internal_whitespace() {
        let detail = parse_detail(
            "<div class=\"info-item\"><b>Writer:</b> <span>Jane   Doe\n</span></div>",
        );
        assert_eq!(detail.writer.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn rows_missing_a_label_or_value_are_skipped() {
        let detail = parse_detail(
            r#"<div class="info-item"><span>orphan value</span></div>
               <div class="info-item"><b>Director:</b></div>
               <div class="info-item"><b>Writer:</b> <span>   </span></div>"#,
        );
        assert!(detail.is_empty());
    }
}
