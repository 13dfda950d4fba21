//! Export sweep results to CSV.
//!
//! Format: header `Temperature,Magnetization`, then one row per sample.
//! Rows are streamed as they are produced, so an aborted sweep leaves the rows
//! written so far in the file.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::domain::SweepRecord;
use crate::error::AppError;

pub const SWEEP_HEADER: [&str; 2] = ["Temperature", "Magnetization"];

/// File name for a sweep: `<thickness>_<diameter>.csv`.
///
/// Uses the shortest round-trip rendering of each value (`1.5` → `1.5`,
/// `2.0` → `2`).
pub fn sweep_file_name(thickness: f32, diameter: f32) -> String {
    format!("{thickness}_{diameter}.csv")
}

/// Streaming CSV writer for one sweep. The file is closed when dropped.
pub struct SweepWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: usize,
}

impl SweepWriter {
    /// Create (or truncate) `path` and write the header.
    pub fn create(path: &Path) -> Result<Self, AppError> {
        let file = File::create(path)
            .map_err(|e| AppError::io(format!("Failed to create sweep CSV '{}': {e}", path.display())))?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer
            .write_record(SWEEP_HEADER)
            .map_err(|e| AppError::io(format!("Failed to write sweep CSV header: {e}")))?;

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            rows: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows written so far (header excluded).
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn write(&mut self, record: &SweepRecord) -> Result<(), AppError> {
        self.writer
            .serialize(record)
            .map_err(|e| AppError::io(format!("Failed to write sweep CSV row: {e}")))?;
        self.rows += 1;
        Ok(())
    }

    /// Flush buffered rows to disk.
    pub fn flush(&mut self) -> Result<(), AppError> {
        self.writer
            .flush()
            .map_err(|e| AppError::io(format!("Failed to flush sweep CSV '{}': {e}", self.path.display())))
    }

    /// Flush and close, returning the path.
    pub fn finish(mut self) -> Result<PathBuf, AppError> {
        self.flush()?;
        Ok(self.path)
    }
}
