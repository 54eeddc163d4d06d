//! Configuration module for camsweep
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Everything site-specific lives here: endpoint paths, pagination
//! parameter names, search form field names, and the request header set.
//!
//! # Example
//!
//! ```no_run
//! use camsweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("camsweep.toml")).unwrap();
//! println!("Directory site: {}", config.directory.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DirectoryConfig, HostingConfig, HttpConfig, OutputConfig};

// Re-export parser functions
pub use parser::{default_config, load_config};
