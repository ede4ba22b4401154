//! books-crawler - Sequential catalog crawler for books.toscrape.com
//!
//! Running without arguments performs one full crawl with defaults.

use anyhow::Result;
use books_crawler::commands::CrawlCommand;
use books_crawler::config::Config;
use books_crawler::logging;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "books-crawler",
    version,
    about = "Crawl the book catalog and append every listing to a CSV file"
)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root to crawl
    #[arg(long)]
    base_url: Option<String>,

    /// CSV file to append records to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log file (written in addition to the console)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Delay between pages in milliseconds
    #[arg(long)]
    delay: Option<u64>,

    /// Stop after this many pages
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long)]
    proxy: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(base_url) = cli.base_url {
        config.set_base_url(base_url);
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(max_pages) = cli.max_pages {
        config.max_pages = Some(max_pages);
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    logging::init(&config.log_file, cli.verbose)?;

    info!("Starting crawl of {} into {}", config.base_url, config.output.display());

    let report = CrawlCommand::new(config).execute().await?;

    if report.stop.is_clean() {
        info!(
            "Crawl complete: {} pages, {} books ({})",
            report.pages_processed, report.records_written, report.stop
        );
    } else {
        warn!(
            "Crawl ended early: {} pages, {} books ({})",
            report.pages_processed, report.records_written, report.stop
        );
    }

    Ok(())
}
