//! CLI command handler tests.
//!
//! Handlers are called directly with file outputs so their exit codes and
//! written files can be checked without spawning the binary.

use chrono::NaiveDate;
use eosl_inventory::cli::{
    run_export, run_intimate, run_log, run_sample, run_ticket, run_view, ExportConfig,
    IntimateConfig, IntimateTarget, LogConfig, TicketConfig, ViewConfig,
};
use eosl_inventory::config::{ChangeLogConfig, OutputConfig, TuiConfig};
use eosl_inventory::filter::FilterCriteria;
use eosl_inventory::model::EoslStatus;
use eosl_inventory::pipeline::{exit_codes, PipelineConfig};
use eosl_inventory::reports::{ExportKind, ReportFormat};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn pipeline(criteria: FilterCriteria) -> PipelineConfig {
    PipelineConfig {
        inventory: Some(fixture_path("inventory.csv")),
        nearing_days: 90,
        today: NaiveDate::from_ymd_opt(2025, 1, 1),
        criteria,
    }
}

fn change_log(dir: &TempDir) -> ChangeLogConfig {
    ChangeLogConfig {
        path: dir.path().join("change_log.csv"),
        actor: "ops".to_string(),
    }
}

// ============================================================================
// export / ticket / sample
// ============================================================================

#[test]
fn export_inventory_adds_derived_columns() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("inventory.csv");
    let code = run_export(ExportConfig {
        pipeline: pipeline(FilterCriteria::new().with_vendor("hpe")),
        kind: ExportKind::Inventory,
        output_file: Some(out.clone()),
    })
    .unwrap();
    assert_eq!(code, exit_codes::SUCCESS);

    let content = std::fs::read_to_string(&out).unwrap();
    let header = content.lines().next().unwrap();
    assert!(header.starts_with("hostname,"));
    assert!(header.ends_with("eosl_status,firmware_complete"));
    assert_eq!(content.lines().count(), 3);
    assert!(content.contains("srv01"));
    assert!(content.contains("srv07"));
}

#[test]
fn export_contacts() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("contacts.csv");
    let code = run_export(ExportConfig {
        pipeline: pipeline(FilterCriteria::new().with_status(EoslStatus::Nearing)),
        kind: ExportKind::Contacts,
        output_file: Some(out.clone()),
    })
    .unwrap();
    assert_eq!(code, exit_codes::SUCCESS);

    let content = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "owner,owner_email,hostname,eosl_status");
    assert_eq!(lines[1], "bob,,srv02,NEARING");
    assert_eq!(lines[2], "alice,alice@corp.example,srv07,NEARING");
}

#[test]
fn empty_export_writes_header_and_returns_not_found() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("tickets.csv");
    let code = run_export(ExportConfig {
        pipeline: pipeline(FilterCriteria::new().with_environment("staging")),
        kind: ExportKind::Tickets,
        output_file: Some(out.clone()),
    })
    .unwrap();
    assert_eq!(code, exit_codes::NOT_FOUND);
    let content = std::fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn ticket_for_unknown_host_is_not_found() {
    let dir = TempDir::new().unwrap();
    let code = run_ticket(TicketConfig {
        pipeline: pipeline(FilterCriteria::new()),
        hostname: "nope".to_string(),
        output_file: Some(dir.path().join("t.csv")),
    })
    .unwrap();
    assert_eq!(code, exit_codes::NOT_FOUND);
}

#[test]
fn ticket_ignores_the_filter() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("t.csv");
    let code = run_ticket(TicketConfig {
        pipeline: pipeline(FilterCriteria::new().with_environment("qa")),
        hostname: "srv01".to_string(),
        output_file: Some(out.clone()),
    })
    .unwrap();
    assert_eq!(code, exit_codes::SUCCESS);
    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.lines().nth(1).unwrap().starts_with("srv01,HPE,EXPIRED,"));
    assert!(content.contains(",High,"));
}

#[test]
fn sample_written_to_file_loads_back() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("sample.csv");
    assert_eq!(run_sample(Some(out.clone())).unwrap(), exit_codes::SUCCESS);
    let records = eosl_inventory::loader::load_path(&out).unwrap();
    assert_eq!(records.len(), 8);
}

// ============================================================================
// intimate / log
// ============================================================================

#[test]
fn intimate_then_log_as_json() {
    let dir = TempDir::new().unwrap();
    let code = run_intimate(IntimateConfig {
        pipeline: pipeline(FilterCriteria::new()),
        target: IntimateTarget::Host("srv02".to_string()),
        note: Some("called owner".to_string()),
        change_log: change_log(&dir),
    })
    .unwrap();
    assert_eq!(code, exit_codes::SUCCESS);

    let out = dir.path().join("log.json");
    let code = run_log(LogConfig {
        change_log: change_log(&dir).path,
        host: Some("srv02".to_string()),
        limit: None,
        format: ReportFormat::Json,
        output_file: Some(out.clone()),
    })
    .unwrap();
    assert_eq!(code, exit_codes::SUCCESS);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["hostname"], "srv02");
    assert_eq!(entries[0]["action"], "intimated");
    assert_eq!(entries[0]["note"], "called owner");
    assert_eq!(entries[0]["actor"], "ops");
}

#[test]
fn intimate_filtered_with_no_matches_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let code = run_intimate(IntimateConfig {
        pipeline: pipeline(FilterCriteria::new().with_owner("nobody")),
        target: IntimateTarget::Filtered,
        note: None,
        change_log: change_log(&dir),
    })
    .unwrap();
    assert_eq!(code, exit_codes::NOT_FOUND);
    assert!(!change_log(&dir).path.exists());
}

#[test]
fn intimate_filtered_marks_each_visible_row() {
    let dir = TempDir::new().unwrap();
    let code = run_intimate(IntimateConfig {
        pipeline: pipeline(FilterCriteria::new().with_owner("alice")),
        target: IntimateTarget::Filtered,
        note: None,
        change_log: change_log(&dir),
    })
    .unwrap();
    assert_eq!(code, exit_codes::SUCCESS);

    let out = dir.path().join("log.csv");
    run_log(LogConfig {
        change_log: change_log(&dir).path,
        host: None,
        limit: None,
        format: ReportFormat::Csv,
        output_file: Some(out.clone()),
    })
    .unwrap();
    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("timestamp,hostname,action,note,actor\n"));
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn write_commands_refuse_the_sample_fallback() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        inventory: Some(fixture_path("malformed.csv")),
        ..pipeline(FilterCriteria::new())
    };

    let code = run_intimate(IntimateConfig {
        pipeline: config.clone(),
        target: IntimateTarget::Filtered,
        note: None,
        change_log: change_log(&dir),
    })
    .unwrap();
    assert_eq!(code, exit_codes::ERROR);
    assert!(!change_log(&dir).path.exists());

    let out = dir.path().join("inventory.csv");
    let code = run_export(ExportConfig {
        pipeline: config,
        kind: ExportKind::Inventory,
        output_file: Some(out.clone()),
    })
    .unwrap();
    assert_eq!(code, exit_codes::ERROR);
    assert!(!out.exists());
}

#[test]
fn view_still_shows_the_sample_fallback() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("view.json");
    let code = run_view(ViewConfig {
        pipeline: PipelineConfig {
            inventory: Some(fixture_path("malformed.csv")),
            ..pipeline(FilterCriteria::new())
        },
        output: OutputConfig {
            format: ReportFormat::Json,
            file: Some(out.clone()),
            ..Default::default()
        },
        change_log: change_log(&dir),
        tui: TuiConfig::default(),
    })
    .unwrap();
    assert_eq!(code, exit_codes::SUCCESS);
    assert!(std::fs::read_to_string(&out).unwrap().contains("web-01"));
}

#[test]
fn intimate_unwritable_log_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = run_intimate(IntimateConfig {
        pipeline: pipeline(FilterCriteria::new()),
        target: IntimateTarget::Host("srv01".to_string()),
        note: None,
        change_log: ChangeLogConfig {
            path: dir.path().join("missing").join("log.csv"),
            actor: "ops".to_string(),
        },
    });
    assert!(result.is_err());
}

// ============================================================================
// view
// ============================================================================

#[test]
fn view_json_report_matches_filter() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("view.json");
    let code = run_view(ViewConfig {
        pipeline: pipeline(FilterCriteria::new().with_status(EoslStatus::Unknown)),
        output: OutputConfig {
            format: ReportFormat::Json,
            file: Some(out.clone()),
            ..Default::default()
        },
        change_log: change_log(&dir),
        tui: TuiConfig::default(),
    })
    .unwrap();
    assert_eq!(code, exit_codes::SUCCESS);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let text = json.to_string();
    assert!(text.contains("srv05"));
    assert!(text.contains("srv06"));
    assert!(!text.contains("srv01"));
}
