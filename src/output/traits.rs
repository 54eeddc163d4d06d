//! Output sink trait and error type

use thiserror::Error;

/// Errors that can occur while emitting a link listing
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write link listing '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to read link listing '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for a batch of discovered links
///
/// A sink receives the whole batch at once so implementations can guarantee
/// all-or-nothing emission: either every link lands or none does.
pub trait LinkSink {
    /// Emits the whole batch of links, in order
    fn write_all(&self, links: &[String]) -> OutputResult<()>;
}
