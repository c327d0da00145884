//! Recording that an owner has been notified.

use crate::changelog::ChangeLogWriter;
use crate::error::{InventoryError, Result};
use crate::model::{ActionKind, ChangeLogEntry, InventoryRecord};
use thiserror::Error;

/// A bulk run stopped on a write failure.
#[derive(Error, Debug)]
#[error("wrote {written} of {attempted} change log entries before failing on {hostname}")]
pub struct BulkIntimateError {
    /// Entries successfully appended before the failure
    pub written: usize,
    /// Rows the run was asked to record
    pub attempted: usize,
    /// Row whose entry could not be written
    pub hostname: String,
    #[source]
    pub source: InventoryError,
}

/// Note recorded when the operator does not provide one.
#[must_use]
pub fn default_note(record: &InventoryRecord, bulk: bool) -> String {
    let via = if bulk { "Bulk intimated" } else { "Intimated owner" };
    match record.contact_address() {
        Some(address) if !bulk => {
            format!("{via} {address}. EOSL status: {}", record.status)
        }
        _ => format!("{via}. EOSL status: {}", record.status),
    }
}

fn entry_for(record: &InventoryRecord, actor: &str, note: Option<&str>, bulk: bool) -> ChangeLogEntry {
    let note = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map_or_else(|| default_note(record, bulk), str::to_string);
    ChangeLogEntry::now(&record.hostname, ActionKind::Intimated, actor, note)
}

/// Append one `intimated` entry for a row and return it.
///
/// Calling this twice records two entries.
pub fn mark_intimated<W>(
    log: &W,
    record: &InventoryRecord,
    actor: &str,
    note: Option<&str>,
) -> Result<ChangeLogEntry>
where
    W: ChangeLogWriter + ?Sized,
{
    let entry = entry_for(record, actor, note, false);
    log.append(&entry)?;
    tracing::info!("Marked {} intimated", record.hostname);
    Ok(entry)
}

/// Append one `intimated` entry per row, in order.
///
/// Returns the number of entries written. The run stops at the first
/// failed write; entries already written stay in the log.
pub fn mark_intimated_bulk<'a, W, I>(
    log: &W,
    records: I,
    actor: &str,
    note: Option<&str>,
) -> std::result::Result<usize, BulkIntimateError>
where
    W: ChangeLogWriter + ?Sized,
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    let records: Vec<&InventoryRecord> = records.into_iter().collect();
    let attempted = records.len();
    let mut written = 0;
    for record in records {
        let entry = entry_for(record, actor, note, true);
        if let Err(source) = log.append(&entry) {
            return Err(BulkIntimateError {
                written,
                attempted,
                hostname: record.hostname.clone(),
                source,
            });
        }
        written += 1;
    }
    tracing::info!("Marked {written} row(s) intimated");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChangeLogErrorKind;
    use crate::model::EoslStatus;
    use std::cell::RefCell;

    /// Log that keeps entries in memory and fails after `capacity` writes.
    struct MemoryLog {
        entries: RefCell<Vec<ChangeLogEntry>>,
        capacity: usize,
    }

    impl MemoryLog {
        fn with_capacity(capacity: usize) -> Self {
            Self {
                entries: RefCell::new(Vec::new()),
                capacity,
            }
        }
    }

    impl ChangeLogWriter for MemoryLog {
        fn append(&self, entry: &ChangeLogEntry) -> Result<()> {
            let mut entries = self.entries.borrow_mut();
            if entries.len() >= self.capacity {
                return Err(InventoryError::change_log(
                    "memory log",
                    ChangeLogErrorKind::Write("full".to_string()),
                ));
            }
            entries.push(entry.clone());
            Ok(())
        }
    }

    fn record(host: &str) -> InventoryRecord {
        let mut r = InventoryRecord::new(host);
        r.owner_email = format!("{host}@example.com");
        r.status = EoslStatus::Expired;
        r
    }

    #[test]
    fn test_mark_intimated_appends_one_entry() {
        let log = MemoryLog::with_capacity(10);
        let entry = mark_intimated(&log, &record("srv01"), "ops", Some("called owner")).unwrap();

        let entries = log.entries.borrow();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], entry);
        assert_eq!(entry.hostname, "srv01");
        assert_eq!(entry.action, ActionKind::Intimated);
        assert_eq!(entry.note, "called owner");
    }

    #[test]
    fn test_repeat_calls_append_repeatedly() {
        let log = MemoryLog::with_capacity(10);
        let r = record("srv01");
        mark_intimated(&log, &r, "ops", None).unwrap();
        mark_intimated(&log, &r, "ops", None).unwrap();
        assert_eq!(log.entries.borrow().len(), 2);
    }

    #[test]
    fn test_default_note_mentions_status() {
        let log = MemoryLog::with_capacity(10);
        let entry = mark_intimated(&log, &record("srv01"), "ops", Some("  ")).unwrap();
        assert_eq!(
            entry.note,
            "Intimated owner srv01@example.com. EOSL status: EXPIRED"
        );
    }

    #[test]
    fn test_bulk_writes_in_order() {
        let log = MemoryLog::with_capacity(10);
        let rows = vec![record("a"), record("b"), record("c")];
        let written = mark_intimated_bulk(&log, &rows, "ops", None).unwrap();
        assert_eq!(written, 3);
        let hosts: Vec<String> = log.entries.borrow().iter().map(|e| e.hostname.clone()).collect();
        assert_eq!(hosts, vec!["a", "b", "c"]);
        assert!(log.entries.borrow()[0].note.starts_with("Bulk intimated"));
    }

    #[test]
    fn test_bulk_stops_at_first_failure() {
        let log = MemoryLog::with_capacity(2);
        let rows = vec![record("a"), record("b"), record("c"), record("d")];
        let err = mark_intimated_bulk(&log, &rows, "ops", None).unwrap_err();
        assert_eq!(err.written, 2);
        assert_eq!(err.attempted, 4);
        assert_eq!(err.hostname, "c");
        assert_eq!(log.entries.borrow().len(), 2);
    }

    #[test]
    fn test_bulk_of_nothing() {
        let log = MemoryLog::with_capacity(0);
        let rows: Vec<InventoryRecord> = Vec::new();
        assert_eq!(mark_intimated_bulk(&log, &rows, "ops", None).unwrap(), 0);
    }
}
