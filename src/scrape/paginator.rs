//! Sequential pagination over listing pages
//!
//! The paginator drives fetch+extract across a known page count, one page at
//! a time, in order. The policy is fail-fast: the first page that cannot be
//! fetched aborts the whole collection with its `NetworkError`. There is no
//! partial-success continuation; callers that want partial results must wrap
//! this at a higher level.

use crate::scrape::fetcher::{Fetcher, NetworkError};
use url::Url;

/// Drives fetch+extract across the pages of one listing
pub struct Paginator<'a> {
    fetcher: &'a Fetcher,
    page_param: &'a str,
}

impl<'a> Paginator<'a> {
    /// Creates a paginator using the given page query parameter
    pub fn new(fetcher: &'a Fetcher, page_param: &'a str) -> Self {
        Self {
            fetcher,
            page_param,
        }
    }

    /// Collects extracted records across pages 0..page_count
    ///
    /// Issues exactly `page_count` fetches, substituting the page parameter
    /// into `base_url` for each index. Records accumulate in page order with
    /// entry order within a page preserved. A non-2xx response or network
    /// failure on any page aborts the whole call.
    ///
    /// `page_count == 0` issues no fetches and yields an empty sequence.
    pub async fn collect_all<T, F>(
        &self,
        base_url: &str,
        page_count: u32,
        extract: F,
    ) -> Result<Vec<T>, NetworkError>
    where
        F: Fn(&str) -> Vec<T>,
    {
        let base = Url::parse(base_url).map_err(|e| NetworkError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        let mut records = Vec::new();
        for page in 0..page_count {
            let url = with_page(&base, self.page_param, page);
            tracing::debug!(page, url = %url, "fetching listing page");

            let fetched = self.fetcher.get(url.as_str()).await?.into_ok()?;
            let mut extracted = extract(&fetched.body);
            tracing::debug!(page, extracted = extracted.len(), "extracted records");

            records.append(&mut extracted);
        }

        Ok(records)
    }
}

/// Returns `base` with the page parameter set to `page`
///
/// Any existing occurrence of the parameter is replaced; other query pairs
/// are kept in order.
fn with_page(base: &Url, param: &str, page: u32) -> Url {
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(k, _)| k.as_ref() != param)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(param, &page.to_string());
    }
    url
}
