//! Export, ticket and sample command handlers.

use super::{find_host, report_pipeline_error, require_requested_inventory};
use crate::actions::write_tickets;
use crate::config::{ExportConfig, TicketConfig};
use crate::loader::{write_sample, SAMPLE_INVENTORY};
use crate::pipeline::{self, exit_codes, OutputTarget, PipelineError};
use crate::reports::write_export;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

/// Run the export command
#[allow(clippy::needless_pass_by_value)]
pub fn run_export(config: ExportConfig) -> Result<i32> {
    let snapshot = pipeline::run(&config.pipeline)?;
    if let Err(err) = require_requested_inventory(&snapshot) {
        return Ok(report_pipeline_error(&err));
    }
    let target = OutputTarget::from_option(config.output_file.clone());

    let mut writer = target.open()?;
    let count = write_export(config.kind, snapshot.filtered(), &mut writer, snapshot.today)
        .with_context(|| format!("Failed to write {} export", config.kind))?;
    writer.flush()?;

    if let OutputTarget::File(path) = &target {
        tracing::info!("Wrote {count} {} row(s) to {}", config.kind, path.display());
    }

    if count == 0 {
        let err = PipelineError::NothingMatched {
            filter: snapshot.criteria.description(),
        };
        return Ok(report_pipeline_error(&err));
    }
    Ok(exit_codes::SUCCESS)
}

/// Run the single-host ticket command
#[allow(clippy::needless_pass_by_value)]
pub fn run_ticket(config: TicketConfig) -> Result<i32> {
    let snapshot = pipeline::run(&config.pipeline)?;
    if let Err(err) = require_requested_inventory(&snapshot) {
        return Ok(report_pipeline_error(&err));
    }
    let record = match find_host(&snapshot, &config.hostname) {
        Ok(record) => record,
        Err(err) => return Ok(report_pipeline_error(&err)),
    };

    let target = OutputTarget::from_option(config.output_file.clone());
    let mut writer = target.open()?;
    write_tickets(std::iter::once(record), &mut writer, snapshot.today)
        .context("Failed to write ticket")?;
    writer.flush()?;

    if let OutputTarget::File(path) = &target {
        tracing::info!("Ticket for {} written to {}", record.hostname, path.display());
    }
    Ok(exit_codes::SUCCESS)
}

/// Write the bundled sample inventory to a file, or stdout when `None`.
pub fn run_sample(output: Option<PathBuf>) -> Result<i32> {
    match output {
        Some(path) => write_sample(&path)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(SAMPLE_INVENTORY.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterCriteria;
    use crate::model::EoslStatus;
    use crate::pipeline::PipelineConfig;
    use crate::reports::ExportKind;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn pipeline(criteria: FilterCriteria) -> PipelineConfig {
        PipelineConfig {
            today: NaiveDate::from_ymd_opt(2025, 1, 1),
            criteria,
            ..Default::default()
        }
    }

    #[test]
    fn test_export_contacts_of_expired_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contacts.csv");
        let code = run_export(ExportConfig {
            pipeline: pipeline(FilterCriteria::new().with_status(EoslStatus::Expired)),
            kind: ExportKind::Contacts,
            output_file: Some(path.clone()),
        })
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let content = std::fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("owner,owner_email,hostname,eosl_status"));
        assert_eq!(lines.count(), 4);
    }

    #[test]
    fn test_export_nothing_matched_writes_header_and_exits_1() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tickets.csv");
        let code = run_export(ExportConfig {
            pipeline: pipeline(FilterCriteria::new().with_owner("nobody-at-all")),
            kind: ExportKind::Tickets,
            output_file: Some(path.clone()),
        })
        .unwrap();
        assert_eq!(code, exit_codes::NOT_FOUND);
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("hostname,vendor,eosl_status"));
    }

    #[test]
    fn test_export_refuses_sample_for_malformed_inventory() {
        let dir = TempDir::new().unwrap();
        let inventory = dir.path().join("servers.csv");
        std::fs::write(&inventory, "name,vendor\nsrv01,HPE\n").unwrap();
        let mut config = pipeline(FilterCriteria::new());
        config.inventory = Some(inventory);

        let path = dir.path().join("tickets.csv");
        let code = run_export(ExportConfig {
            pipeline: config.clone(),
            kind: ExportKind::Tickets,
            output_file: Some(path.clone()),
        })
        .unwrap();
        assert_eq!(code, exit_codes::ERROR);
        assert!(!path.exists());

        let code = run_ticket(TicketConfig {
            pipeline: config,
            hostname: "web-01".to_string(),
            output_file: Some(path.clone()),
        })
        .unwrap();
        assert_eq!(code, exit_codes::ERROR);
        assert!(!path.exists());
    }

    #[test]
    fn test_ticket_for_unknown_host() {
        let code = run_ticket(TicketConfig {
            pipeline: pipeline(FilterCriteria::new()),
            hostname: "does-not-exist".to_string(),
            output_file: None,
        })
        .unwrap();
        assert_eq!(code, exit_codes::NOT_FOUND);
    }

    #[test]
    fn test_ticket_ignores_filter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ticket.csv");
        let code = run_ticket(TicketConfig {
            pipeline: pipeline(FilterCriteria::new().with_owner("nobody-at-all")),
            hostname: "web-01".to_string(),
            output_file: Some(path.clone()),
        })
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.lines().nth(1).unwrap().starts_with("web-01,"));
    }

    #[test]
    fn test_sample_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.csv");
        assert_eq!(run_sample(Some(path.clone())).unwrap(), exit_codes::SUCCESS);
        assert_eq!(std::fs::read_to_string(path).unwrap(), SAMPLE_INVENTORY);
    }
}
