//! Output module for emitting discovered links
//!
//! The only persistence in the pipeline: a flat text listing of discovered
//! links, plus an interactive console sink. Everything else lives in memory
//! for the duration of one run.

mod file;
mod traits;

pub use file::{links_file_name, read_links, ConsoleSink, FileSink};
pub use traits::{LinkSink, OutputError, OutputResult};
