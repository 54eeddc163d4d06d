//! Playback URL construction
//!
//! A camera record's link encodes two identifiers in fixed path positions:
//! `/share/parentID<id>/shareID<id>`. The builder decomposes that link and
//! composes the player URL with the identifiers, the camera title, and the
//! playback start time as query parameters.
//!
//! Unlike the fail-fast paginator, a record that does not decompose is an
//! independently recoverable failure: the batch builder skips it, reports
//! the skip, and keeps going.

use crate::playback::timestamp::PlaybackStart;
use crate::scrape::CameraRecord;
use std::fmt;
use thiserror::Error;
use url::Url;

/// A single entry's link did not match the expected decomposition
#[derive(Debug, Clone, Error)]
#[error("camera link '{link}' cannot be decomposed: {reason}")]
pub struct MalformedRecordError {
    /// The raw link that failed
    pub link: String,

    /// What was missing or wrong
    pub reason: String,
}

impl MalformedRecordError {
    fn new(link: &str, reason: impl Into<String>) -> Self {
        Self {
            link: link.to_string(),
            reason: reason.into(),
        }
    }
}

/// The two positional identifiers carried by a share link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareIds {
    pub camera_id: String,
    pub share_id: String,
}

/// A constructed playback URL: base plus ordered query parameters
///
/// Formatting is deterministic: the same record and timestamp always yield
/// the byte-identical URL string. All query values are percent-encoded,
/// including the free-text camera title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackUrl {
    base: Url,
    params: Vec<(String, String)>,
}

impl PlaybackUrl {
    /// The query parameters in serialization order
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Renders the full URL
    pub fn to_url(&self) -> Url {
        let mut url = self.base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (k, v) in &self.params {
                pairs.append_pair(k, v);
            }
        }
        url
    }
}

impl fmt::Display for PlaybackUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_url())
    }
}

/// Outcome of building playback URLs for a whole batch of records
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully built URLs, in record order
    pub urls: Vec<PlaybackUrl>,

    /// Records that were skipped, with the reason each failed
    pub skipped: Vec<MalformedRecordError>,
}

/// Decomposes a share link into its positional identifiers
///
/// The rule is fixed: take the link's non-empty path segments, read the
/// segment at offset 1 stripped of its `parentID` prefix and the segment at
/// offset 2 stripped of its `shareID` prefix.
///
/// # Example
///
/// ```
/// use camsweep::playback::decompose_share_link;
///
/// let ids = decompose_share_link("/share/parentID123/shareID456").unwrap();
/// assert_eq!(ids.camera_id, "123");
/// assert_eq!(ids.share_id, "456");
/// ```
pub fn decompose_share_link(raw_link: &str) -> Result<ShareIds, MalformedRecordError> {
    let path = match raw_link.find(['?', '#']) {
        Some(i) => &raw_link[..i],
        None => raw_link,
    };

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 3 {
        return Err(MalformedRecordError::new(
            raw_link,
            format!("expected 3 path segments, found {}", segments.len()),
        ));
    }

    let camera_id = segments[1].strip_prefix("parentID").ok_or_else(|| {
        MalformedRecordError::new(raw_link, format!("segment '{}' lacks parentID prefix", segments[1]))
    })?;
    let share_id = segments[2].strip_prefix("shareID").ok_or_else(|| {
        MalformedRecordError::new(raw_link, format!("segment '{}' lacks shareID prefix", segments[2]))
    })?;

    if camera_id.is_empty() {
        return Err(MalformedRecordError::new(raw_link, "empty camera identifier"));
    }
    if share_id.is_empty() {
        return Err(MalformedRecordError::new(raw_link, "empty share identifier"));
    }

    Ok(ShareIds {
        camera_id: camera_id.to_string(),
        share_id: share_id.to_string(),
    })
}

/// Builds the playback URL for one record
///
/// Query order is fixed: `cameraID`, `name`, `shareID`, `start`.
///
/// # Errors
///
/// `MalformedRecordError` when the record's link does not carry both
/// positional identifiers. Callers processing a batch should skip the record
/// and continue; [`build_playback_urls`] does exactly that.
pub fn build_playback_url(
    player: &Url,
    record: &CameraRecord,
    start: &PlaybackStart,
) -> Result<PlaybackUrl, MalformedRecordError> {
    let ids = decompose_share_link(&record.raw_link)?;

    Ok(PlaybackUrl {
        base: player.clone(),
        params: vec![
            ("cameraID".to_string(), ids.camera_id),
            ("name".to_string(), record.title.clone()),
            ("shareID".to_string(), ids.share_id),
            ("start".to_string(), start.to_string()),
        ],
    })
}

/// Builds playback URLs for a batch of records, skipping malformed ones
///
/// Per-record failures never abort the batch: each skip is logged and
/// reported in the outcome, and every remaining record is still processed.
pub fn build_playback_urls(
    player: &Url,
    records: &[CameraRecord],
    start: &PlaybackStart,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for record in records {
        match build_playback_url(player, record, start) {
            Ok(url) => outcome.urls.push(url),
            Err(e) => {
                tracing::warn!(title = %record.title, error = %e, "skipping malformed record");
                outcome.skipped.push(e);
            }
        }
    }

    outcome
}
