//! Pipeline integration tests.
//!
//! These tests exercise load → classify → filter → aggregate against real
//! fixture files, including the fallback paths for broken input.

use chrono::NaiveDate;
use eosl_inventory::filter::FilterCriteria;
use eosl_inventory::loader::{load_or_sample, load_path, LoadOutcome};
use eosl_inventory::model::{EoslStatus, OsFamily};
use eosl_inventory::pipeline::{self, PipelineConfig, Snapshot};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn new_year() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn fixture_config(criteria: FilterCriteria) -> PipelineConfig {
    PipelineConfig {
        inventory: Some(fixture_path("inventory.csv")),
        nearing_days: 90,
        today: Some(new_year()),
        criteria,
    }
}

fn status_of(snapshot: &Snapshot, hostname: &str) -> EoslStatus {
    snapshot.find(hostname).expect("host in fixture").status
}

// ============================================================================
// Load Stage
// ============================================================================

mod load_stage {
    use super::*;

    #[test]
    fn loads_every_fixture_row() {
        let records = load_path(&fixture_path("inventory.csv")).expect("fixture loads");
        assert_eq!(records.len(), 8);
        assert_eq!(records[0].hostname, "srv01");
        assert_eq!(records[7].hostname, "srv08");
    }

    #[test]
    fn normalizes_vendor_names() {
        let records = load_path(&fixture_path("inventory.csv")).unwrap();
        assert_eq!(records[0].vendor, "HPE");
        assert_eq!(records[4].vendor, "ORACLE");
        assert_eq!(records[7].vendor, "DELL");
    }

    #[test]
    fn keeps_unparseable_dates_as_raw_text() {
        let records = load_path(&fixture_path("inventory.csv")).unwrap();
        let srv05 = &records[4];
        assert_eq!(srv05.eosl_date_raw, "someday");
        assert!(srv05.eosl_date.is_none());
    }

    #[test]
    fn accepts_spaced_title_case_headers() {
        let records = load_path(&fixture_path("legacy_columns.csv")).expect("loads");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].hostname, "web-01");
        assert_eq!(records[0].vendor, "HPE");
        assert_eq!(records[0].os, "Windows Server");
        assert_eq!(records[1].eosl_date, NaiveDate::from_ymd_opt(2024, 11, 30));
        assert!(records[2].microcode_version.is_empty());
    }

    #[test]
    fn missing_hostname_column_falls_back_to_sample() {
        let outcome = load_or_sample(Some(&fixture_path("malformed.csv"))).unwrap();
        assert!(outcome.is_fallback());
        assert!(outcome.fallback_reason().unwrap().contains("hostname"));
        assert_eq!(outcome.records().len(), 8);
        assert_eq!(outcome.records()[0].hostname, "web-01");
    }

    #[test]
    fn missing_file_falls_back_to_sample() {
        let outcome = load_or_sample(Some(&fixture_path("does-not-exist.csv"))).unwrap();
        assert!(matches!(outcome, LoadOutcome::Fallback { .. }));
    }

    #[test]
    fn empty_file_falls_back_to_sample() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();
        let outcome = load_or_sample(Some(&path)).unwrap();
        assert!(outcome.is_fallback());
    }

    #[test]
    fn header_only_file_is_an_empty_inventory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("header.csv");
        std::fs::write(&path, "hostname,vendor,eosl_date\n").unwrap();
        let outcome = load_or_sample(Some(&path)).unwrap();
        assert!(!outcome.is_fallback());
        assert!(outcome.records().is_empty());
    }
}

// ============================================================================
// Classification
// ============================================================================

mod classify_stage {
    use super::*;

    #[test]
    fn classifies_fixture_rows() {
        let snapshot = pipeline::run(&fixture_config(FilterCriteria::new())).unwrap();

        assert_eq!(status_of(&snapshot, "srv01"), EoslStatus::Expired);
        assert_eq!(status_of(&snapshot, "srv02"), EoslStatus::Nearing);
        // 2025-04-01 is exactly today + 90
        assert_eq!(status_of(&snapshot, "srv03"), EoslStatus::Supported);
        assert_eq!(status_of(&snapshot, "srv04"), EoslStatus::Supported);
        assert_eq!(status_of(&snapshot, "srv05"), EoslStatus::Unknown);
        assert_eq!(status_of(&snapshot, "srv06"), EoslStatus::Unknown);
        assert_eq!(status_of(&snapshot, "srv07"), EoslStatus::Nearing);
        assert_eq!(status_of(&snapshot, "srv08"), EoslStatus::Expired);
    }

    #[test]
    fn flags_missing_firmware_and_microcode() {
        let snapshot = pipeline::run(&fixture_config(FilterCriteria::new())).unwrap();
        let srv04 = snapshot.find("srv04").unwrap();
        assert!(srv04.firmware.missing_firmware);
        assert!(!srv04.firmware.missing_microcode);

        let srv06 = snapshot.find("srv06").unwrap();
        assert!(!srv06.firmware.missing_firmware);
        assert!(srv06.firmware.missing_microcode);

        assert!(snapshot.find("srv01").unwrap().firmware.is_complete());
    }

    #[test]
    fn wider_window_moves_rows_into_nearing() {
        let mut snapshot = pipeline::run(&fixture_config(FilterCriteria::new())).unwrap();
        assert_eq!(snapshot.kpis.nearing, 2);

        snapshot.set_nearing_days(91);
        assert_eq!(status_of(&snapshot, "srv03"), EoslStatus::Nearing);
        assert_eq!(snapshot.kpis.nearing, 3);
        assert_eq!(snapshot.kpis.supported, 1);
    }

    #[test]
    fn later_reference_date_expires_rows() {
        let mut snapshot = pipeline::run(&fixture_config(FilterCriteria::new())).unwrap();
        snapshot.set_today(NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
        assert_eq!(status_of(&snapshot, "srv02"), EoslStatus::Expired);
        assert_eq!(status_of(&snapshot, "srv07"), EoslStatus::Expired);
    }
}

// ============================================================================
// Filter and KPI Stages
// ============================================================================

mod filter_stage {
    use super::*;

    #[test]
    fn unfiltered_kpis() {
        let snapshot = pipeline::run(&fixture_config(FilterCriteria::new())).unwrap();
        let kpis = snapshot.kpis;
        assert_eq!(kpis.total, 8);
        assert_eq!(kpis.expired, 2);
        assert_eq!(kpis.nearing, 2);
        assert_eq!(kpis.supported, 2);
        assert_eq!(kpis.unknown, 2);
        assert_eq!(kpis.missing_firmware, 2);
        assert!((kpis.pct_expired - 25.0).abs() < f64::EPSILON);
        assert_eq!(snapshot.inventory_kpis, kpis);
    }

    #[test]
    fn vendor_filter_is_case_insensitive() {
        let snapshot = pipeline::run(&fixture_config(FilterCriteria::new().with_vendor("dell")))
            .unwrap();
        let hosts: Vec<&str> = snapshot.filtered().map(|r| r.hostname.as_str()).collect();
        assert_eq!(hosts, vec!["srv02", "srv08"]);
    }

    #[test]
    fn combined_filters_intersect() {
        let criteria = FilterCriteria::new()
            .with_environment("prod")
            .with_status(EoslStatus::Expired);
        let snapshot = pipeline::run(&fixture_config(criteria)).unwrap();
        let hosts: Vec<&str> = snapshot.filtered().map(|r| r.hostname.as_str()).collect();
        assert_eq!(hosts, vec!["srv01", "srv08"]);
        assert_eq!(snapshot.kpis.total, 2);
        assert_eq!(snapshot.inventory_kpis.total, 8);
    }

    #[test]
    fn os_family_filter() {
        let criteria = FilterCriteria::new().with_os_family(OsFamily::WindowsServer);
        let snapshot = pipeline::run(&fixture_config(criteria)).unwrap();
        let hosts: Vec<&str> = snapshot.filtered().map(|r| r.hostname.as_str()).collect();
        assert_eq!(hosts, vec!["srv02", "srv08"]);
    }

    #[test]
    fn owner_filter_matches_owner_or_team() {
        let snapshot =
            pipeline::run(&fixture_config(FilterCriteria::new().with_owner("ALI"))).unwrap();
        assert_eq!(snapshot.visible_count(), 2);

        let snapshot =
            pipeline::run(&fixture_config(FilterCriteria::new().with_owner("infra"))).unwrap();
        let hosts: Vec<&str> = snapshot.filtered().map(|r| r.hostname.as_str()).collect();
        assert_eq!(hosts, vec!["srv03"]);
    }

    #[test]
    fn missing_firmware_filter() {
        let criteria = FilterCriteria::new().missing_firmware_only(true);
        let snapshot = pipeline::run(&fixture_config(criteria)).unwrap();
        let hosts: Vec<&str> = snapshot.filtered().map(|r| r.hostname.as_str()).collect();
        assert_eq!(hosts, vec!["srv04", "srv06"]);
    }

    #[test]
    fn empty_result_has_zero_kpis() {
        let criteria = FilterCriteria::new().with_vendor("LENOVO").with_status(EoslStatus::Expired);
        let snapshot = pipeline::run(&fixture_config(criteria)).unwrap();
        assert_eq!(snapshot.visible_count(), 0);
        assert_eq!(snapshot.kpis.total, 0);
        assert!(snapshot.kpis.pct_expired.abs() < f64::EPSILON);
    }

    #[test]
    fn fallback_snapshot_records_reason() {
        let config = PipelineConfig {
            inventory: Some(fixture_path("malformed.csv")),
            today: Some(new_year()),
            ..Default::default()
        };
        let snapshot = pipeline::run(&config).unwrap();
        assert!(snapshot.fallback_reason.is_some());
        assert_eq!(snapshot.records.len(), 8);
    }
}
