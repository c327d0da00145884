//! Change log query handler.

use crate::changelog::{write_entries, ChangeLogStore};
use crate::config::LogConfig;
use crate::model::ChangeLogEntry;
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use crate::reports::{truncate, ReportFormat};
use anyhow::{Context, Result};

/// Run the log command
#[allow(clippy::needless_pass_by_value)]
pub fn run_log(config: LogConfig) -> Result<i32> {
    let store = ChangeLogStore::open(&config.change_log);
    let entries = select_entries(&store, config.host.as_deref(), config.limit)
        .with_context(|| format!("Failed to read {}", store.path().display()))?;

    if entries.is_empty() {
        tracing::info!("No change log entries in {}", store.path().display());
    }

    let content = match config.format {
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(&entries)?;
            json.push('\n');
            json
        }
        ReportFormat::Csv => {
            let mut buf = Vec::new();
            write_entries(&entries, &mut buf)?;
            String::from_utf8(buf)?
        }
        _ => render_table(&entries),
    };

    let target = OutputTarget::from_option(config.output_file.clone());
    write_output(&content, &target, false)?;
    Ok(exit_codes::SUCCESS)
}

/// Entries for the query: all in append order, or the newest `limit`.
fn select_entries(
    store: &ChangeLogStore,
    host: Option<&str>,
    limit: Option<usize>,
) -> crate::error::Result<Vec<ChangeLogEntry>> {
    let mut entries = match host {
        Some(hostname) => store.for_host(hostname)?,
        None => store.read_all()?,
    };
    if let Some(limit) = limit {
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
    }
    Ok(entries)
}

fn render_table(entries: &[ChangeLogEntry]) -> String {
    let mut lines = vec![format!(
        "{:<25}  {:<20}  {:<10}  {:<12}  {}",
        "TIMESTAMP", "HOSTNAME", "ACTION", "ACTOR", "NOTE"
    )];
    for entry in entries {
        lines.push(format!(
            "{:<25}  {:<20}  {:<10}  {:<12}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S %:z"),
            truncate(&entry.hostname, 20),
            truncate(entry.action.as_str(), 10),
            truncate(&entry.actor, 12),
            entry.note
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::ChangeLogWriter;
    use crate::model::ActionKind;
    use chrono::DateTime;
    use tempfile::TempDir;

    fn seeded_store(dir: &TempDir) -> ChangeLogStore {
        let store = ChangeLogStore::open(dir.path().join("change_log.csv"));
        for (host, ts) in [
            ("db-01", "2025-01-01T09:00:00+00:00"),
            ("web-01", "2025-01-02T09:00:00+00:00"),
            ("db-01", "2025-01-03T09:00:00+00:00"),
        ] {
            store
                .append(&ChangeLogEntry {
                    timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
                    hostname: host.to_string(),
                    action: ActionKind::Intimated,
                    note: "n".to_string(),
                    actor: "ops".to_string(),
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn test_select_by_host_in_append_order() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);
        let entries = select_entries(&store, Some("db-01"), None).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].timestamp < entries[1].timestamp);
    }

    #[test]
    fn test_select_limit_is_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);
        let entries = select_entries(&store, None, Some(2)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].hostname, "db-01");
        assert_eq!(entries[1].hostname, "web-01");
    }

    #[test]
    fn test_log_json_to_file() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);
        let out = dir.path().join("log.json");
        let code = run_log(LogConfig {
            change_log: store.path().to_path_buf(),
            host: Some("web-01".to_string()),
            limit: None,
            format: ReportFormat::Json,
            output_file: Some(out.clone()),
        })
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["action"], "intimated");
    }

    #[test]
    fn test_missing_log_renders_header_only() {
        assert_eq!(render_table(&[]).lines().count(), 1);
    }
}
