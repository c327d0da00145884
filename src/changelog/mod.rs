//! Append-only change log.
//!
//! The log is a flat CSV file with one row per operator action. Rows are
//! only ever appended; there is no update or delete. The header is written
//! once, when the file is created.
//!
//! Logs written by earlier tooling used the column order
//! `timestamp,hostname,action,actor,details`. Appends follow whatever
//! header the existing file has, and `details` is read as the note.

use crate::error::{ChangeLogErrorKind, InventoryError, Result};
use crate::model::ChangeLogEntry;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default change log file name.
pub const DEFAULT_CHANGE_LOG: &str = "change_log.csv";

/// Header of a newly created change log.
pub const CHANGE_LOG_HEADER: [&str; 5] = ["timestamp", "hostname", "action", "note", "actor"];

/// Destination for audit entries.
pub trait ChangeLogWriter {
    /// Persist one entry. Entries are never rewritten once accepted.
    fn append(&self, entry: &ChangeLogEntry) -> Result<()>;
}

/// Change log backed by a CSV file.
#[derive(Debug, Clone)]
pub struct ChangeLogStore {
    path: PathBuf,
}

impl ChangeLogStore {
    /// Use the log at `path`. The file is created on first append.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every entry in append order. A missing file is an empty log.
    pub fn read_all(&self) -> Result<Vec<ChangeLogEntry>> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(InventoryError::io(&self.path, e)),
        };

        // Fields are returned exactly as appended
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(file);

        let mut entries = Vec::new();
        for (idx, row) in reader.deserialize::<ChangeLogEntry>().enumerate() {
            let entry = row.map_err(|e| {
                InventoryError::change_log(
                    format!("{}, line {}", self.path.display(), idx + 2),
                    ChangeLogErrorKind::Csv(e.to_string()),
                )
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Entries for one host, in append order.
    pub fn for_host(&self, hostname: &str) -> Result<Vec<ChangeLogEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.hostname == hostname)
            .collect())
    }

    /// Latest entry for a host by timestamp; the later row wins a tie.
    pub fn last_for_host(&self, hostname: &str) -> Result<Option<ChangeLogEntry>> {
        let mut latest: Option<ChangeLogEntry> = None;
        for entry in self.read_all()? {
            if entry.hostname != hostname {
                continue;
            }
            if latest
                .as_ref()
                .map_or(true, |current| entry.timestamp >= current.timestamp)
            {
                latest = Some(entry);
            }
        }
        Ok(latest)
    }

    /// Up to `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<ChangeLogEntry>> {
        let mut entries = self.read_all()?;
        entries.reverse();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        Ok(entries)
    }

    /// Header of the existing file, if it has one.
    fn existing_header(&self) -> Result<Option<Vec<String>>> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(InventoryError::io(&self.path, e)),
        };
        let mut reader = csv::ReaderBuilder::new().from_reader(file);
        let header = reader.headers().map_err(|e| {
            InventoryError::change_log(
                self.path.display().to_string(),
                ChangeLogErrorKind::Csv(e.to_string()),
            )
        })?;
        if header.iter().all(|h| h.trim().is_empty()) {
            return Ok(None);
        }
        Ok(Some(header.iter().map(|h| h.trim().to_lowercase()).collect()))
    }
}

impl ChangeLogWriter for ChangeLogStore {
    fn append(&self, entry: &ChangeLogEntry) -> Result<()> {
        let existing = self.existing_header()?;
        let columns: Vec<String> = existing
            .clone()
            .unwrap_or_else(|| CHANGE_LOG_HEADER.iter().map(|c| (*c).to_string()).collect());

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| InventoryError::io(&self.path, e))?;

        let write_err = |e: csv::Error| {
            InventoryError::change_log(
                format!("appending to {}", self.path.display()),
                ChangeLogErrorKind::Write(e.to_string()),
            )
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if existing.is_none() {
            writer.write_record(&columns).map_err(write_err)?;
        }
        let row: Vec<String> = columns.iter().map(|c| field_value(entry, c)).collect();
        writer.write_record(&row).map_err(write_err)?;
        writer
            .flush()
            .map_err(|e| InventoryError::io(&self.path, e))?;

        tracing::debug!(
            "Appended {} for {} to {}",
            entry.action,
            entry.hostname,
            self.path.display()
        );
        Ok(())
    }
}

/// Write entries as CSV with the standard change log header.
pub fn write_entries<W: Write>(entries: &[ChangeLogEntry], writer: W) -> Result<()> {
    let write_err = |e: csv::Error| {
        InventoryError::change_log("writing entries", ChangeLogErrorKind::Write(e.to_string()))
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(CHANGE_LOG_HEADER).map_err(write_err)?;
    for entry in entries {
        let row = CHANGE_LOG_HEADER.map(|column| field_value(entry, column));
        writer.write_record(&row).map_err(write_err)?;
    }
    writer.flush()?;
    Ok(())
}

fn field_value(entry: &ChangeLogEntry, column: &str) -> String {
    match column {
        "timestamp" => entry.timestamp.to_rfc3339(),
        "hostname" => entry.hostname.clone(),
        "action" => entry.action.to_string(),
        "note" | "details" => entry.note.clone(),
        "actor" => entry.actor.clone(),
        _ => String::new(),
    }
}
