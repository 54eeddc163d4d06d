//! Stream enrichment
//!
//! Best-effort stages applied after extraction: check whether a discovered
//! stream actually answers, and look up where its host is located. Both are
//! isolated from the pipeline proper: a failed check or lookup is logged and
//! recorded, and never blocks or aborts the extraction results it decorates.

use crate::scrape::Fetcher;
use serde::Deserialize;
use std::fmt;
use url::Url;

/// Location data for a stream's host address
#[derive(Debug, Clone, Deserialize)]
pub struct GeoInfo {
    pub city: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl fmt::Display for GeoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} ({}, {})",
            self.city.as_deref().unwrap_or("?"),
            self.country.as_deref().unwrap_or("?"),
            self.lat.map_or_else(|| "?".to_string(), |v| v.to_string()),
            self.lon.map_or_else(|| "?".to_string(), |v| v.to_string()),
        )
    }
}

/// Whether a discovered stream answered when checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// The stream responded with a 2xx status
    Alive,

    /// The stream responded, but with this non-2xx status
    BadStatus(u16),

    /// The stream could not be reached at all
    Unreachable,
}

impl fmt::Display for Liveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Liveness::Alive => write!(f, "alive"),
            Liveness::BadStatus(status) => write!(f, "status {}", status),
            Liveness::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Checks whether a stream link answers, single bounded attempt
///
/// Any network failure collapses to `Unreachable`; a response with a bad
/// status is still a result, not an error. Either way the caller keeps the
/// link, this only annotates it.
pub async fn check_liveness(fetcher: &Fetcher, link: &str) -> Liveness {
    match fetcher.get(link).await {
        Ok(page) if page.is_success() => Liveness::Alive,
        Ok(page) => {
            tracing::warn!(link, status = page.status, "stream answered with bad status");
            Liveness::BadStatus(page.status)
        }
        Err(e) => {
            tracing::warn!(link, error = %e, "stream unreachable");
            Liveness::Unreachable
        }
    }
}

/// Looks up the location of a stream link's host
///
/// `geo_base` is the lookup service prefix; the link's host address is
/// appended to it. Any failure along the way (unparseable link, network
/// error, non-2xx, unexpected response shape) is logged and collapsed to
/// `None`.
pub async fn geolocate(fetcher: &Fetcher, geo_base: &str, link: &str) -> Option<GeoInfo> {
    let host = match Url::parse(link).ok().and_then(|u| u.host_str().map(String::from)) {
        Some(host) => host,
        None => {
            tracing::warn!(link, "cannot extract host for geolocation");
            return None;
        }
    };

    let lookup_url = format!("{}{}", geo_base, host);
    let page = match fetcher.get(&lookup_url).await.and_then(|p| p.into_ok()) {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(host, error = %e, "geolocation lookup failed");
            return None;
        }
    };

    match serde_json::from_str(&page.body) {
        Ok(info) => Some(info),
        Err(e) => {
            tracing::warn!(host, error = %e, "geolocation response not understood");
            None
        }
    }
}
