//! Catalog walk: fetch, check for the end, parse, persist, sleep, repeat.

use crate::catalog::{CatalogClient, CatalogSource, Parser};
use crate::config::Config;
use crate::sink::CsvSink;
use anyhow::{Context, Result};
use rand::Rng;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Why the walk stopped. Every variant ends the crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page could not be fetched (network error, timeout, non-2xx).
    FetchFailed { page: u32 },
    /// The page carried the "No books available!" marker.
    EndMarker { page: u32 },
    /// The page parsed to zero records.
    NoRecords { page: u32 },
    /// The configured page limit was reached; `page` is the last one walked.
    PageLimit { page: u32 },
}

impl StopReason {
    /// True for every reason except a failed fetch.
    pub fn is_clean(&self) -> bool {
        !matches!(self, StopReason::FetchFailed { .. })
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::FetchFailed { page } => write!(f, "fetch failed on page {}", page),
            StopReason::EndMarker { page } => write!(f, "end-of-catalog marker on page {}", page),
            StopReason::NoRecords { page } => write!(f, "no books found on page {}", page),
            StopReason::PageLimit { page } => write!(f, "page limit reached at page {}", page),
        }
    }
}

/// Summary of a finished walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pages whose records were persisted
    pub pages_processed: u32,
    /// Rows appended to the CSV file
    pub records_written: usize,
    pub stop: StopReason,
}

/// Walks the catalog one page at a time.
pub struct CrawlCommand {
    config: Config,
}

impl CrawlCommand {
    /// Creates a new crawl command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs a full crawl against the configured site and output file.
    pub async fn execute(&self) -> Result<CrawlReport> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;
        let sink = CsvSink::new(&self.config.output);

        self.execute_with(&client, &sink).await
    }

    /// Runs a full crawl with a provided source and sink (for testing).
    ///
    /// Only CSV write failures are returned as errors; everything else
    /// ends the walk with a [`StopReason`].
    pub async fn execute_with(
        &self,
        source: &impl CatalogSource,
        sink: &CsvSink,
    ) -> Result<CrawlReport> {
        let parser = Parser::new(source.base_url());
        let mut pages_processed = 0;
        let mut records_written = 0;
        let mut page = 1;

        let stop = loop {
            // Checked before fetching so a limit of 0 requests nothing
            if self.config.max_pages.is_some_and(|max| page > max) {
                info!("Reached page limit of {}", page - 1);
                break StopReason::PageLimit { page: page - 1 };
            }

            if page > 1 {
                self.delay().await;
            }

            let Some(html) = source.fetch_page(page).await else {
                warn!("Stopping: page {} could not be fetched", page);
                break StopReason::FetchFailed { page };
            };

            if Parser::is_end_of_catalog(&html) {
                info!("All pages processed");
                break StopReason::EndMarker { page };
            }

            let records = parser.parse_listing(&html);
            if records.is_empty() {
                info!("No books found on page {}, stopping", page);
                break StopReason::NoRecords { page };
            }

            records_written += sink.append(&records)?;
            pages_processed += 1;
            info!("Page {} processed ({} books)", page, records.len());

            page += 1;
        };

        Ok(CrawlReport { pages_processed, records_written, stop })
    }

    /// Sleeps for the politeness delay plus optional jitter.
    async fn delay(&self) {
        if self.config.delay_ms == 0 && self.config.delay_jitter_ms == 0 {
            return;
        }

        let jitter = if self.config.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.config.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.config.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}
