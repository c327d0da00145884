//! Change log and action integration tests.
//!
//! Every test works on a scratch copy of the log so fixture files are never
//! modified.

use chrono::NaiveDate;
use eosl_inventory::actions::{contact_owner, mark_intimated, mark_intimated_bulk, write_tickets};
use eosl_inventory::changelog::{ChangeLogStore, ChangeLogWriter};
use eosl_inventory::filter::FilterCriteria;
use eosl_inventory::model::{ActionKind, ChangeLogEntry, EoslStatus, InventoryRecord};
use eosl_inventory::pipeline::{self, PipelineConfig, Snapshot};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn snapshot(criteria: FilterCriteria) -> Snapshot {
    pipeline::run(&PipelineConfig {
        inventory: Some(fixture_path("inventory.csv")),
        nearing_days: 90,
        today: NaiveDate::from_ymd_opt(2025, 1, 1),
        criteria,
    })
    .unwrap()
}

fn scratch_log(dir: &TempDir) -> ChangeLogStore {
    ChangeLogStore::open(dir.path().join("change_log.csv"))
}

// ============================================================================
// Append / Read
// ============================================================================

mod store {
    use super::*;

    #[test]
    fn missing_log_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let log = scratch_log(&dir);
        assert!(log.read_all().unwrap().is_empty());
        assert!(log.last_for_host("srv01").unwrap().is_none());
    }

    #[test]
    fn reads_back_appends_in_call_order() {
        let dir = TempDir::new().unwrap();
        let log = scratch_log(&dir);
        let hosts = ["srv03", "srv01", "srv02", "srv01"];
        for host in hosts {
            log.append(&ChangeLogEntry::now(host, ActionKind::Intimated, "ops", "note"))
                .unwrap();
        }

        let entries = log.read_all().unwrap();
        let read: Vec<&str> = entries.iter().map(|e| e.hostname.as_str()).collect();
        assert_eq!(read, hosts);
        assert_eq!(log.for_host("srv01").unwrap().len(), 2);
    }

    #[test]
    fn notes_with_commas_quotes_and_newlines_survive() {
        let dir = TempDir::new().unwrap();
        let log = scratch_log(&dir);
        let note = "called \"bob\", left voicemail\nwill retry";
        log.append(&ChangeLogEntry::now("srv02", ActionKind::Intimated, "ops", note))
            .unwrap();
        assert_eq!(log.read_all().unwrap()[0].note, note);
    }

    #[test]
    fn entries_read_back_unmodified() {
        let dir = TempDir::new().unwrap();
        let log = scratch_log(&dir);
        let written = ChangeLogEntry::now(" srv02", ActionKind::Intimated, "ops ", "  called owner  ");
        log.append(&written).unwrap();

        let back = log.read_all().unwrap();
        assert_eq!(back, vec![written]);
    }

    #[test]
    fn legacy_log_keeps_its_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.csv");
        std::fs::copy(fixture_path("legacy_change_log.csv"), &path).unwrap();
        let log = ChangeLogStore::open(&path);

        let existing = log.read_all().unwrap();
        assert_eq!(existing.len(), 2);
        assert_eq!(existing[0].action, ActionKind::Intimated);
        assert_eq!(existing[0].note, "emailed alice");
        assert_eq!(
            existing[1].action,
            ActionKind::Other("decommission-requested".to_string())
        );

        log.append(&ChangeLogEntry::now("srv03", ActionKind::Intimated, "ops", "ticket raised"))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("timestamp,hostname,action,details\n"));
        assert_eq!(content.lines().count(), 4);

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].hostname, "srv03");
        assert_eq!(entries[2].note, "ticket raised");
    }

    #[test]
    fn recent_is_newest_first() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.csv");
        std::fs::copy(fixture_path("legacy_change_log.csv"), &path).unwrap();
        let log = ChangeLogStore::open(&path);
        log.append(&ChangeLogEntry::now("srv09", ActionKind::Intimated, "ops", ""))
            .unwrap();

        let recent = log.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].hostname, "srv09");
        assert_eq!(recent[1].hostname, "srv02");
    }
}

// ============================================================================
// Actions
// ============================================================================

mod actions {
    use super::*;

    #[test]
    fn mark_intimated_appends_exactly_one_row() {
        let dir = TempDir::new().unwrap();
        let log = scratch_log(&dir);
        let record = InventoryRecord::new("srv01");

        let entry = mark_intimated(&log, &record, "alice", Some("called owner")).unwrap();

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hostname, "srv01");
        assert_eq!(entries[0].action, ActionKind::Intimated);
        assert_eq!(entries[0].note, "called owner");
        assert_eq!(entries[0].actor, "alice");
        assert_eq!(entries[0].timestamp, entry.timestamp);
    }

    #[test]
    fn marking_twice_records_two_entries() {
        let dir = TempDir::new().unwrap();
        let log = scratch_log(&dir);
        let record = InventoryRecord::new("srv01");
        mark_intimated(&log, &record, "alice", None).unwrap();
        mark_intimated(&log, &record, "alice", None).unwrap();
        assert_eq!(log.for_host("srv01").unwrap().len(), 2);
    }

    #[test]
    fn bulk_intimate_covers_visible_rows_only() {
        let dir = TempDir::new().unwrap();
        let log = scratch_log(&dir);
        let snapshot = snapshot(FilterCriteria::new().with_status(EoslStatus::Expired));

        let written = mark_intimated_bulk(&log, snapshot.filtered(), "ops", None).unwrap();

        assert_eq!(written, 2);
        let hosts: Vec<String> = log
            .read_all()
            .unwrap()
            .into_iter()
            .map(|e| e.hostname)
            .collect();
        assert_eq!(hosts, vec!["srv01", "srv08"]);
    }

    #[test]
    fn bulk_intimate_reports_partial_progress_on_failure() {
        let dir = TempDir::new().unwrap();
        let log = ChangeLogStore::open(dir.path().join("no-such-dir").join("log.csv"));
        let snapshot = snapshot(FilterCriteria::new());

        let err = mark_intimated_bulk(&log, snapshot.filtered(), "ops", None).unwrap_err();
        assert_eq!(err.written, 0);
        assert_eq!(err.attempted, 8);
        assert_eq!(err.hostname, "srv01");
    }

    #[test]
    fn contact_uses_email_then_owner() {
        let snapshot = snapshot(FilterCriteria::new());

        let link = contact_owner(snapshot.find("srv01").unwrap(), "ops").unwrap();
        assert_eq!(link.recipient, "alice@corp.example");
        assert!(link.url.starts_with("mailto:alice@corp.example?subject="));
        assert!(link.subject.contains("EXPIRED"));
        assert!(!link.url.contains(' '));

        let link = contact_owner(snapshot.find("srv02").unwrap(), "ops").unwrap();
        assert_eq!(link.recipient, "bob");

        assert!(contact_owner(snapshot.find("srv03").unwrap(), "ops").is_none());
    }

    #[test]
    fn tickets_for_filtered_rows() {
        let snapshot = snapshot(FilterCriteria::new().with_environment("qa"));
        let mut out = Vec::new();
        let count = write_tickets(snapshot.filtered(), &mut out, snapshot.today).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "hostname,vendor,eosl_status,owner,owner_email,eosl_date,priority,summary"
        );
        assert!(lines[1].starts_with("srv03,IBM,SUPPORTED,,,2025-04-01,Medium,"));
        assert!(lines[2].starts_with("srv07,HPE,NEARING,alice,alice@corp.example,2025-02-15,Medium,"));
    }
}
