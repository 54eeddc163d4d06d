//! Camsweep: a camera-directory scrape pipeline
//!
//! This crate scrapes public camera-listing sites and turns their pages into
//! structured records: country tables and direct stream links from an
//! IP-camera directory, and camera entries with time-addressed playback URLs
//! from a camera-hosting service.
//!
//! The pipeline is fetch → extract → paginate → build → emit, sequential and
//! single-threaded: one request in flight at a time, pages processed in
//! order, and a pagination run either completes or fails on the first error.

pub mod config;
pub mod output;
pub mod playback;
pub mod scrape;
pub mod session;

use thiserror::Error;

/// Main error type for camsweep operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch failed: {0}")]
    Network(#[from] scrape::NetworkError),

    #[error("Parse failed: {0}")]
    Parse(#[from] scrape::ParseError),

    #[error("Malformed record: {0}")]
    MalformedRecord(#[from] playback::MalformedRecordError),

    #[error("Invalid timestamp: {0}")]
    Timestamp(#[from] playback::TimestampError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Unknown country selection '{selection}': not present in the directory's country table")]
    UnknownCountry { selection: String },

    #[error("No category at index {index}: the page lists {available} categories")]
    UnknownCategory { index: usize, available: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for camsweep operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use playback::{build_playback_url, PlaybackStart, PlaybackUrl};
pub use scrape::{CameraRecord, CountryEntry, Fetcher};
