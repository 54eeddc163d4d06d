//! Session flows over the scrape pipeline
//!
//! Thin orchestration of the stages the CLI exposes: the directory flow
//! (country listings → stream links → flat file), the hosting flow (search →
//! entries → playback URLs), and best-effort liveness and geolocation
//! enrichment.

pub mod directory;
pub mod enrich;
pub mod hosting;

pub use directory::{fetch_countries, DirectoryReport};
pub use enrich::{GeoInfo, Liveness};
pub use hosting::SearchOutcome;
