//! Append-only CSV output for scraped records.

use crate::catalog::BookRecord;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::info;

/// CSV file that accumulates records across calls and runs.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Creates a sink writing to `path`. The file is not touched until
    /// the first [`append`](Self::append).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the target file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `records`, writing the header first if the file is new.
    ///
    /// Rows are flushed before returning. A failure part way through can
    /// leave a partial row behind.
    pub fn append(&self, records: &[BookRecord]) -> Result<usize> {
        // Zero-length files get a header too
        let needs_header = std::fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open output file: {}", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        if needs_header {
            writer.write_record(BookRecord::HEADER).context("Failed to write CSV header")?;
        }

        for record in records {
            writer.serialize(record).context("Failed to write CSV row")?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to flush output file: {}", self.path.display()))?;

        info!("Appended {} books to {}", records.len(), self.path.display());
        Ok(records.len())
    }
}
