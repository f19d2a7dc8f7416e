use crate::error::PersistError;
use crate::features::Record;
use chrono::Local;
use csv::WriterBuilder;
use itertools::Itertools;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Destination for tabular crawl artifacts.
pub trait ArtifactSink: Send + Sync {
    /// Writes `records` into `dir` under a name ending in `suffix` and returns its path.
    /// `what` only describes the artifact in log messages.
    fn save(
        &self,
        records: &[Record],
        dir: &Path,
        suffix: &str,
        what: &str,
    ) -> Result<PathBuf, PersistError>;
}

/// Writes records as CSV files named `<yymmdd_HHMMSS><suffix>.csv`, or
/// `<yymmdd_HHMMSS><suffix>_<n>.csv` when that name is already taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSink;

impl CsvSink {
    pub fn new() -> Self {
        Self
    }
}

/// Union of the columns present in `records`, in first-seen order.
pub fn columns(records: &[Record]) -> Vec<&str> {
    records.iter().flat_map(Record::keys).unique().collect()
}

fn timestamp() -> String {
    Local::now().format("%y%m%d_%H%M%S").to_string()
}

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Creates a fresh file for `suffix` in `dir`, never reusing an existing one.
///
/// When the timestamped name is taken, `_1`, `_2`, ... is appended to the suffix.
fn create_unique(dir: &Path, suffix: &str) -> Result<(PathBuf, File), PersistError> {
    let stamp = timestamp();
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = match attempt {
            0 => format!("{stamp}{suffix}.csv"),
            n => format!("{stamp}{suffix}_{n}.csv"),
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(PersistError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        }
    }
    let path = dir.join(format!("{stamp}{suffix}.csv"));
    Err(PersistError::Io {
        path: path.display().to_string(),
        source: std::io::Error::new(ErrorKind::AlreadyExists, "no free file name left"),
    })
}

impl ArtifactSink for CsvSink {
    fn save(
        &self,
        records: &[Record],
        dir: &Path,
        suffix: &str,
        what: &str,
    ) -> Result<PathBuf, PersistError> {
        fs::create_dir_all(dir).map_err(|e| PersistError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;
        let (path, file) = create_unique(dir, suffix)?;

        let mut wtr = WriterBuilder::new().from_writer(file);
        let columns = columns(records);
        if !columns.is_empty() {
            wtr.write_record(&columns)?;
            for record in records {
                // Absent fields are written as empty cells.
                wtr.write_record(columns.iter().map(|column| {
                    record
                        .get(column)
                        .map(ToString::to_string)
                        .unwrap_or_default()
                }))?;
            }
        }
        wtr.flush().map_err(|e| PersistError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        info!(
            "Saved {} ({} rows) to {}",
            what,
            records.len(),
            path.display()
        );
        Ok(path)
    }
}
