//! Scrape pipeline: fetch, extract, paginate
//!
//! This module contains the core scraping stages:
//! - HTTP fetching with a fixed timeout and no retries
//! - Pure extraction of records from page text
//! - Sequential, fail-fast pagination across listing pages

mod extractor;
mod fetcher;
mod paginator;

pub use extractor::{
    extract_categories, extract_country_table, extract_entries, extract_page_count,
    extract_page_options, extract_stream_links, CameraRecord, CategoryEntry, CountryEntry,
    ParseError,
};
pub use fetcher::{FetchedPage, Fetcher, NetworkError};
pub use paginator::Paginator;
