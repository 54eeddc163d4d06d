//! Flat-file link listing
//!
//! The output artifact is plain UTF-8 text: one link per line, newline
//! terminated, no header, no escaping. The sink stages the whole batch into
//! a temp sibling and renames it into place, so an interrupted or failed
//! write never leaves a partially written listing behind.

use crate::output::traits::{LinkSink, OutputError, OutputResult};
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

/// Writes link listings to a file, all-or-nothing
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The destination path of the listing
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: Error) -> OutputError {
        OutputError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl LinkSink for FileSink {
    fn write_all(&self, links: &[String]) -> OutputResult<()> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| self.write_error(Error::new(ErrorKind::InvalidInput, "no file name")))?;

        let mut staged = file_name.to_os_string();
        staged.push(".tmp");
        let staged_path = self.path.with_file_name(staged);

        let mut content = String::new();
        for link in links {
            content.push_str(link);
            content.push('\n');
        }

        std::fs::write(&staged_path, content).map_err(|e| self.write_error(e))?;
        std::fs::rename(&staged_path, &self.path).map_err(|e| self.write_error(e))?;

        tracing::info!(path = %self.path.display(), links = links.len(), "wrote link listing");
        Ok(())
    }
}

/// Prints each link to stdout, one per line
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink;

impl LinkSink for ConsoleSink {
    fn write_all(&self, links: &[String]) -> OutputResult<()> {
        for link in links {
            println!("{}", link);
        }
        Ok(())
    }
}

/// Reads a link listing back as one string per line
pub fn read_links(path: &Path) -> OutputResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| OutputError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(content.lines().map(|l| l.to_string()).collect())
}

/// File name for a selection's link listing: `<selection>_ips.txt`
///
/// Path separators in the selection are flattened so the name stays a single
/// path component; everything else (including spaces) is kept as the user
/// typed it.
pub fn links_file_name(selection: &str) -> String {
    let sanitized: String = selection
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}_ips.txt", sanitized)
}
