//! Directory-site flow
//!
//! country table → resolve selection → page count → paginate stream links →
//! optional geolocation → flat-file listing.

use crate::config::DirectoryConfig;
use crate::output::{links_file_name, FileSink, LinkSink};
use crate::scrape::{
    extract_country_table, extract_page_count, extract_stream_links, CountryEntry, Fetcher,
    Paginator,
};
use crate::session::enrich::{check_liveness, geolocate, GeoInfo, Liveness};
use crate::{Result, ScrapeError};
use std::path::{Path, PathBuf};

/// Outcome of one directory scrape
#[derive(Debug)]
pub struct DirectoryReport {
    /// Resolved country
    pub country: CountryEntry,

    /// Total listing pages reported by the pagination marker
    pub pages: u32,

    /// Discovered stream links, page-then-entry order
    pub links: Vec<String>,

    /// Liveness per link, when that check was requested
    pub liveness: Vec<Liveness>,

    /// Geolocation per link, when enrichment was requested
    pub locations: Vec<Option<GeoInfo>>,

    /// Where the listing was written; `None` when there was nothing to write
    pub output_path: Option<PathBuf>,
}

/// Fetches and parses the directory's country table
pub async fn fetch_countries(
    fetcher: &Fetcher,
    config: &DirectoryConfig,
) -> Result<Vec<CountryEntry>> {
    let page = fetcher.get_ok(&config.countries_url()).await?;
    Ok(extract_country_table(&page.body)?)
}

/// Resolves a user selection (country code or display name) against the table
fn resolve_country(countries: &[CountryEntry], selection: &str) -> Result<CountryEntry> {
    countries
        .iter()
        .find(|c| {
            c.code.eq_ignore_ascii_case(selection)
                || c.display_name.eq_ignore_ascii_case(selection)
        })
        .cloned()
        .ok_or_else(|| ScrapeError::UnknownCountry {
            selection: selection.to_string(),
        })
}

/// Runs the full directory flow for one country selection
///
/// A missing pagination marker means zero results: the report comes back
/// empty and no file is written. Otherwise every listing page is scraped in
/// order and the discovered links land in `<country>_ips.txt` under
/// `out_dir`; the listing file appears only after the whole batch succeeded.
/// Liveness and geolocation are opt-in annotation stages that run after
/// extraction and never affect what gets written.
pub async fn run(
    fetcher: &Fetcher,
    config: &DirectoryConfig,
    selection: &str,
    out_dir: &Path,
    with_liveness: bool,
    with_geo: bool,
) -> Result<DirectoryReport> {
    let countries = fetch_countries(fetcher, config).await?;
    let country = resolve_country(&countries, selection)?;
    tracing::info!(code = %country.code, name = %country.display_name, "scraping directory listing");

    let listing_url = config.by_country_url(&country.code);
    let first_page = fetcher.get_ok(&listing_url).await?;
    let pages = extract_page_count(&first_page.body);

    if pages == 0 {
        tracing::info!(code = %country.code, "no listing pages for selection");
        return Ok(DirectoryReport {
            country,
            pages: 0,
            links: Vec::new(),
            liveness: Vec::new(),
            locations: Vec::new(),
            output_path: None,
        });
    }

    let paginator = Paginator::new(fetcher, &config.page_param);
    let links = paginator
        .collect_all(&listing_url, pages, extract_stream_links)
        .await?;
    tracing::info!(pages, links = links.len(), "directory scrape complete");

    let mut liveness = Vec::new();
    if with_liveness {
        for link in &links {
            liveness.push(check_liveness(fetcher, link).await);
        }
    }

    let mut locations = Vec::new();
    if with_geo {
        for link in &links {
            locations.push(geolocate(fetcher, &config.geo_base_url, link).await);
        }
    }

    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(links_file_name(&country.display_name));
    FileSink::new(&path).write_all(&links)?;

    Ok(DirectoryReport {
        country,
        pages,
        links,
        liveness,
        locations,
        output_path: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> Vec<CountryEntry> {
        vec![
            CountryEntry {
                display_name: "Austria".to_string(),
                code: "AT".to_string(),
                count: 11,
            },
            CountryEntry {
                display_name: "United States".to_string(),
                code: "US".to_string(),
                count: 120,
            },
        ]
    }

    #[test]
    fn test_resolve_country_by_code() {
        let country = resolve_country(&countries(), "us").unwrap();
        assert_eq!(country.display_name, "United States");
    }

    #[test]
    fn test_resolve_country_by_name() {
        let country = resolve_country(&countries(), "austria").unwrap();
        assert_eq!(country.code, "AT");
    }

    #[test]
    fn test_resolve_country_unknown() {
        let err = resolve_country(&countries(), "Atlantis").unwrap_err();
        assert!(matches!(err, ScrapeError::UnknownCountry { .. }));
    }
}
