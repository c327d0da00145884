//! View command handler.
//!
//! Implements the `view` subcommand: the interactive dashboard on a
//! terminal, a rendered report otherwise.

use crate::config::ViewConfig;
use crate::pipeline::{
    self, auto_detect_format, exit_codes, should_use_color, write_output, OutputTarget,
    PipelineError, Snapshot,
};
use crate::reports::{create_reporter_with_options, ReportFormat};
use crate::tui::{run_tui, set_theme, DashboardApp, Theme};
use anyhow::{Context, Result};

/// Run the view command
#[allow(clippy::needless_pass_by_value)]
pub fn run_view(config: ViewConfig) -> Result<i32> {
    let snapshot = pipeline::run(&config.pipeline)?;
    if let Some(reason) = &snapshot.fallback_reason {
        tracing::warn!("Showing the bundled sample: {reason}");
    }

    let output_target = OutputTarget::from_option(config.output.file.clone());
    let effective_output = auto_detect_format(config.output.format, &output_target);

    if effective_output == ReportFormat::Tui {
        set_theme(Theme::from_name(&config.tui.theme));
        let mut app = DashboardApp::new(snapshot, &config);
        run_tui(&mut app).context("dashboard terminal error")?;
        return Ok(exit_codes::SUCCESS);
    }

    output_view_report(&config, &snapshot, effective_output, &output_target)
        .map_err(|source| PipelineError::ReportFailed { source })?;
    Ok(exit_codes::SUCCESS)
}

/// Output view report to file or stdout
fn output_view_report(
    config: &ViewConfig,
    snapshot: &Snapshot,
    format: ReportFormat,
    output_target: &OutputTarget,
) -> Result<()> {
    let use_color = should_use_color(config.output.no_color) && output_target.is_terminal();
    let reporter = create_reporter_with_options(format, use_color)?;
    let report = reporter.generate(snapshot)?;
    write_output(&report, output_target, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChangeLogConfig, OutputConfig, TuiConfig};
    use crate::filter::FilterCriteria;
    use crate::model::EoslStatus;
    use crate::pipeline::PipelineConfig;
    use chrono::NaiveDate;

    fn view_config(format: ReportFormat, file: std::path::PathBuf) -> ViewConfig {
        ViewConfig {
            pipeline: PipelineConfig {
                today: NaiveDate::from_ymd_opt(2025, 1, 1),
                criteria: FilterCriteria::new().with_status(EoslStatus::Expired),
                ..Default::default()
            },
            output: OutputConfig {
                format,
                file: Some(file),
                ..Default::default()
            },
            change_log: ChangeLogConfig::default(),
            tui: TuiConfig::default(),
        }
    }

    #[test]
    fn test_view_json_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("view.json");
        let code = run_view(view_config(ReportFormat::Json, path.clone())).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["kpis"]["total"], 4);
        assert_eq!(json["rows"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_view_auto_to_file_is_summary() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("view.txt");
        run_view(view_config(ReportFormat::Auto, path.clone())).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("EXPIRED"));
        // files never get ANSI colors
        assert!(!text.contains("\x1b["));
    }
}
