//! Playback URL building and timestamp validation
//!
//! Turns extracted camera records plus a validated start time into the
//! hosting site's player URLs.

mod builder;
mod timestamp;

pub use builder::{
    build_playback_url, build_playback_urls, decompose_share_link, BatchOutcome,
    MalformedRecordError, PlaybackUrl, ShareIds,
};
pub use timestamp::{recent_dates, PlaybackStart, TimestampError};
