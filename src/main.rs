//! Camsweep main entry point
//!
//! Command-line interface over the scrape pipeline: list directory
//! countries, collect a country's stream links, or search the hosting site
//! and print time-addressed playback URLs.

use anyhow::Context;
use camsweep::config::{default_config, load_config, Config};
use camsweep::playback::{recent_dates, PlaybackStart};
use camsweep::scrape::Fetcher;
use camsweep::session;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Camsweep: a camera-directory scrape pipeline
#[derive(Parser, Debug)]
#[command(name = "camsweep")]
#[command(version = "1.0.0")]
#[command(about = "Scrape public camera listings into links and playback URLs", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the directory's country table
    Countries,

    /// Collect a country's stream links into <country>_ips.txt
    Directory {
        /// Country code or display name
        selection: String,

        /// Directory to write the link listing into
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Check whether each discovered stream answers
        #[arg(long)]
        check_live: bool,

        /// Look up the location of each discovered stream
        #[arg(long)]
        geolocate: bool,
    },

    /// Search the hosting site and print playback URLs
    Search {
        /// Search term
        term: String,

        /// Category index from the results page's category menu
        #[arg(long)]
        category: Option<usize>,

        /// Listing page number
        #[arg(long)]
        page: Option<u32>,

        /// Playback start date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Playback start time (HH:MM:SS)
        #[arg(long, default_value = "00:00:00")]
        time: String,
    },

    /// List recent dates usable as playback start dates
    Dates {
        /// How many days back to list
        #[arg(long, default_value_t = 14)]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => default_config().context("building default configuration")?,
    };

    match cli.command {
        Command::Countries => handle_countries(&config).await?,
        Command::Directory {
            selection,
            output_dir,
            check_live,
            geolocate,
        } => handle_directory(&config, &selection, output_dir, check_live, geolocate).await?,
        Command::Search {
            term,
            category,
            page,
            date,
            time,
        } => handle_search(&config, &term, category, page, &date, &time).await?,
        Command::Dates { days } => handle_dates(days),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("camsweep=info,warn"),
            1 => EnvFilter::new("camsweep=debug,info"),
            2 => EnvFilter::new("camsweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the countries subcommand: prints the directory's country table
async fn handle_countries(config: &Config) -> anyhow::Result<()> {
    let fetcher = Fetcher::new(&config.http)?;
    let countries = session::fetch_countries(&fetcher, &config.directory).await?;

    for country in &countries {
        println!("{}  {} ({} cameras)", country.code, country.display_name, country.count);
    }
    println!("\n{} countries listed", countries.len());

    Ok(())
}

/// Handles the directory subcommand: scrapes one country's stream links
async fn handle_directory(
    config: &Config,
    selection: &str,
    output_dir: Option<PathBuf>,
    check_live: bool,
    geolocate: bool,
) -> anyhow::Result<()> {
    let fetcher = Fetcher::new(&config.http)?;
    let out_dir = output_dir.unwrap_or_else(|| PathBuf::from(&config.output.links_dir));

    let report = session::directory::run(
        &fetcher,
        &config.directory,
        selection,
        &out_dir,
        check_live,
        geolocate,
    )
    .await?;

    if report.pages == 0 {
        println!(
            "No streams found for {} ({})",
            report.country.display_name, report.country.code
        );
        return Ok(());
    }

    for (index, link) in report.links.iter().enumerate() {
        let mut annotations = Vec::new();
        if let Some(liveness) = report.liveness.get(index) {
            annotations.push(liveness.to_string());
        }
        if let Some(geo) = report.locations.get(index).and_then(|g| g.as_ref()) {
            annotations.push(geo.to_string());
        }

        if annotations.is_empty() {
            println!("{}", link);
        } else {
            println!("{}  [{}]", link, annotations.join("; "));
        }
    }

    if let Some(path) = &report.output_path {
        println!(
            "\n{} links across {} pages saved to {}",
            report.links.len(),
            report.pages,
            path.display()
        );
    }

    Ok(())
}

/// Handles the search subcommand: prints playback URLs for matching cameras
async fn handle_search(
    config: &Config,
    term: &str,
    category: Option<usize>,
    page: Option<u32>,
    date: &str,
    time: &str,
) -> anyhow::Result<()> {
    // Validate the timestamp before any request goes out
    let start = PlaybackStart::parse(date, time)?;

    let fetcher = Fetcher::new(&config.http)?;
    let outcome =
        session::hosting::run(&fetcher, &config.hosting, term, category, page, &start).await?;

    if category.is_none() && !outcome.categories.is_empty() {
        println!("Categories:");
        for (index, cat) in outcome.categories.iter().enumerate() {
            println!("  {}: {}", index, cat.name);
        }
        println!();
    }

    if !outcome.available_pages.is_empty() {
        println!("Pages available: {:?}\n", outcome.available_pages);
    }

    for url in &outcome.batch.urls {
        println!("{}", url);
    }

    println!(
        "\n{} playback URLs built from {} entries",
        outcome.batch.urls.len(),
        outcome.records.len()
    );
    if !outcome.batch.skipped.is_empty() {
        println!("{} entries skipped (malformed links):", outcome.batch.skipped.len());
        for skip in &outcome.batch.skipped {
            println!("  {}", skip);
        }
    }

    Ok(())
}

/// Handles the dates subcommand: prints a numbered recent-date list
fn handle_dates(days: u32) {
    for (index, date) in recent_dates(days).iter().enumerate() {
        println!("{}: {}", index, date);
    }
}
