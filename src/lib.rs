//! books-crawler - Sequential catalog crawler for books.toscrape.com
//!
//! Walks the paginated catalog one page at a time, extracts each book
//! listing, and appends the records to a CSV file.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod logging;
pub mod sink;

pub use catalog::models::BookRecord;
pub use commands::{CrawlCommand, CrawlReport, StopReason};
pub use config::Config;
pub use sink::CsvSink;
