//! Hosting-site flow
//!
//! form search → category menu → page selector → camera entries → playback
//! URLs. The caller supplies an already-validated [`PlaybackStart`], so no
//! request is made and no output produced for an invalid timestamp.

use crate::config::HostingConfig;
use crate::playback::{build_playback_urls, BatchOutcome, PlaybackStart};
use crate::scrape::{
    extract_categories, extract_entries, extract_page_options, CameraRecord, CategoryEntry,
    Fetcher,
};
use crate::{Result, ScrapeError};
use url::Url;

/// Outcome of one hosting-site search
#[derive(Debug)]
pub struct SearchOutcome {
    /// Categories offered by the results page
    pub categories: Vec<CategoryEntry>,

    /// Page numbers offered by the page selector, empty for a single page
    pub available_pages: Vec<u32>,

    /// Camera entries extracted from the final page, document order
    pub records: Vec<CameraRecord>,

    /// Playback URLs for the records that decomposed cleanly
    pub batch: BatchOutcome,
}

/// Runs the full hosting-site flow for one search
///
/// `category` picks from the extracted category menu by index; `page` picks
/// a listing page. Both default to the search results page itself. Records
/// whose links do not decompose are skipped and reported in the outcome's
/// batch, never aborting the rest.
pub async fn run(
    fetcher: &Fetcher,
    config: &HostingConfig,
    term: &str,
    category: Option<usize>,
    page: Option<u32>,
    start: &PlaybackStart,
) -> Result<SearchOutcome> {
    let publish_url = config.publish_url();
    let form = vec![
        (config.search_field.clone(), term.to_string()),
        (config.search_button.clone(), "Search".to_string()),
    ];

    tracing::info!(term, "searching hosting site");
    let mut current = fetcher.post_form(&publish_url, &form).await?.into_ok()?;

    // A results page without a category menu still lists entries; the menu
    // is only required when the caller wants to navigate into a category.
    let categories = match extract_categories(&current.body) {
        Ok(categories) => categories,
        Err(e) if category.is_none() => {
            tracing::debug!(error = %e, "results page has no category menu");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(index) = category {
        let chosen = categories
            .get(index)
            .ok_or_else(|| ScrapeError::UnknownCategory {
                index,
                available: categories.len(),
            })?;
        tracing::info!(category = %chosen.name, "narrowing to category");
        current = fetcher.get_ok(&config.category_url(&chosen.link)).await?;
    }

    let available_pages = extract_page_options(&current.body);

    if let Some(number) = page {
        let mut page_url = Url::parse(&publish_url)?;
        page_url
            .query_pairs_mut()
            .append_pair("page", &number.to_string());
        tracing::info!(page = number, "navigating to listing page");
        current = fetcher.get_ok(page_url.as_str()).await?;
    }

    let records = extract_entries(&current.body);
    tracing::info!(records = records.len(), "extracted camera entries");

    let player = Url::parse(&config.player_url())?;
    let batch = build_playback_urls(&player, &records, start);
    if !batch.skipped.is_empty() {
        tracing::warn!(
            skipped = batch.skipped.len(),
            built = batch.urls.len(),
            "some records had malformed links"
        );
    }

    Ok(SearchOutcome {
        categories,
        available_pages,
        records,
        batch,
    })
}
