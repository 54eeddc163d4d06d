//! Pure extraction over page text
//!
//! Every function here takes a response body and produces structured records
//! with no side effects, so each page structure the scraper depends on is
//! testable offline against fixture HTML:
//!
//! - the directory's JSON country table
//! - the directory's `pagenavigator` pagination marker
//! - direct `http://ip:port` stream links on directory listing pages
//! - the hosting site's `li.camItem` camera entries
//! - the hosting site's category menu and page selector
//!
//! Structural DOM queries are used where the markup has stable classes;
//! regex matching is used for the script-embedded pagination marker and the
//! bare stream links, which never appear as well-formed elements.

use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised when an expected page structure is absent
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("country table JSON missing or malformed: {0}")]
    CountryTable(String),

    #[error("expected structure missing on page: {0}")]
    Structure(String),
}

/// One country from the directory's country table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryEntry {
    /// Human-readable country name
    pub display_name: String,

    /// Directory's country code, used in listing URLs
    pub code: String,

    /// Number of cameras the directory reports for this country
    pub count: u32,
}

/// One camera entry extracted from a hosting-site listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraRecord {
    /// Camera title as shown on the listing
    pub title: String,

    /// The entry's link, exactly as it appears in the markup
    pub raw_link: String,

    /// Query parameters parsed out of the link, when it carries any
    pub id_fields: BTreeMap<String, String>,
}

/// One category from the hosting site's category menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Category display name
    pub name: String,

    /// Category href, relative to the published-cameras page
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct CountryTable {
    countries: BTreeMap<String, CountryInfo>,
}

#[derive(Debug, Deserialize)]
struct CountryInfo {
    country: String,
    #[serde(default)]
    count: u32,
}

fn page_count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"pagenavigator\("\?page=", (\d+)"#).expect("page count pattern")
    })
}

fn stream_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"http://\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}:\d+").expect("stream link pattern")
    })
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Parses the directory's country table JSON into name/code pairs
///
/// The body is the directory's countries endpoint response, shaped as
/// `{"countries": {"US": {"country": "United States", "count": 42}, ...}}`.
/// Entries come back sorted by code.
///
/// # Errors
///
/// `ParseError::CountryTable` when the body is not JSON of that shape.
pub fn extract_country_table(body: &str) -> Result<Vec<CountryEntry>, ParseError> {
    let table: CountryTable =
        serde_json::from_str(body).map_err(|e| ParseError::CountryTable(e.to_string()))?;

    Ok(table
        .countries
        .into_iter()
        .map(|(code, info)| CountryEntry {
            display_name: info.country,
            code,
            count: info.count,
        })
        .collect())
}

/// Locates the pagination marker and returns the total page count
///
/// A listing page embeds `pagenavigator("?page=", N, ...)` with the total
/// number of result pages. A missing marker means zero results, not an
/// error.
pub fn extract_page_count(body: &str) -> u32 {
    page_count_re()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Extracts direct `http://ip:port` stream links from a listing page
///
/// Returns links in document order, duplicates preserved. An empty result is
/// a page with no streams, not an error.
pub fn extract_stream_links(body: &str) -> Vec<String> {
    stream_link_re()
        .find_iter(body)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extracts camera entries (title + link) from a hosting-site listing page
///
/// Entries are `li.camItem` elements carrying a `title` attribute and an
/// anchor. Items without a link are dropped; a missing title falls back to
/// the anchor text. Document order is preserved, and a page with no entries
/// yields an empty sequence.
pub fn extract_entries(body: &str) -> Vec<CameraRecord> {
    let document = Html::parse_document(body);
    let item_selector = selector("li.camItem");
    let anchor_selector = selector("a[href]");

    let mut records = Vec::new();
    for item in document.select(&item_selector) {
        let anchor = match item.select(&anchor_selector).next() {
            Some(a) => a,
            None => continue,
        };
        let raw_link = match anchor.value().attr("href") {
            Some(href) => href.trim().to_string(),
            None => continue,
        };

        let title = item
            .value()
            .attr("title")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| anchor.text().collect::<String>().trim().to_string());

        let id_fields = parse_id_fields(&raw_link);

        records.push(CameraRecord {
            title,
            raw_link,
            id_fields,
        });
    }

    records
}

/// Extracts the hosting site's category menu
///
/// # Errors
///
/// `ParseError::Structure` when the category menu is absent, since the menu
/// is how the rest of the flow navigates.
pub fn extract_categories(body: &str) -> Result<Vec<CategoryEntry>, ParseError> {
    let document = Html::parse_document(body);
    let menu_selector = selector("ul.dropdown-menu-catagory");
    let item_selector = selector("li.catagorylist-item");
    let anchor_selector = selector("a[href]");

    let menu = document
        .select(&menu_selector)
        .next()
        .ok_or_else(|| ParseError::Structure("category menu (ul.dropdown-menu-catagory)".into()))?;

    let mut categories = Vec::new();
    for item in menu.select(&item_selector) {
        let name = item.text().collect::<String>().trim().to_string();
        let link = match item
            .select(&anchor_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            Some(href) => href.trim().to_string(),
            None => continue,
        };
        categories.push(CategoryEntry { name, link });
    }

    Ok(categories)
}

/// Extracts the page numbers offered by the hosting site's page selector
///
/// Reads `select.droppage option` values. An empty result means the page has
/// no selector (single page of results).
pub fn extract_page_options(body: &str) -> Vec<u32> {
    let document = Html::parse_document(body);
    let select_selector = selector("select.droppage");
    let option_selector = selector("option");

    let dropdown = match document.select(&select_selector).next() {
        Some(d) => d,
        None => return Vec::new(),
    };

    dropdown
        .select(&option_selector)
        .filter_map(|o| o.value().attr("value"))
        .filter_map(|v| v.trim().parse().ok())
        .collect()
}

/// Parses query-string pairs out of an entry link
fn parse_id_fields(raw_link: &str) -> BTreeMap<String, String> {
    let query = match raw_link.split_once('?') {
        Some((_, query)) => query,
        None => return BTreeMap::new(),
    };

    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
