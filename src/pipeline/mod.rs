//! Pipeline orchestration for inventory operations.
//!
//! Every command and every dashboard interaction runs the same pure
//! recomputation: load → classify → filter → aggregate. The result is a
//! [`Snapshot`]. Configuration is passed in explicitly through
//! [`PipelineConfig`]; nothing here reads global state.

mod output;
mod snapshot;

pub use output::{
    auto_detect_format, should_use_color, timestamped_path, write_output, OutputTarget,
};
pub use snapshot::Snapshot;

use crate::classify::DEFAULT_NEARING_DAYS;
use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::loader::load_or_sample;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Inventory CSV; `None` uses the bundled sample
    pub inventory: Option<PathBuf>,
    /// Width of the nearing window in days
    pub nearing_days: u32,
    /// Reference date; `None` means the local date at run time
    pub today: Option<NaiveDate>,
    /// Row filter
    pub criteria: FilterCriteria,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inventory: None,
            nearing_days: DEFAULT_NEARING_DAYS,
            today: None,
            criteria: FilterCriteria::default(),
        }
    }
}

impl PipelineConfig {
    /// Reference date for this run.
    #[must_use]
    pub fn effective_today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Run load → classify → filter → aggregate.
///
/// A bad inventory file does not fail the run; the snapshot then carries
/// the bundled sample and a `fallback_reason`.
pub fn run(config: &PipelineConfig) -> Result<Snapshot> {
    let outcome = load_or_sample(config.inventory.as_deref())?;
    tracing::debug!("Loaded {} row(s) from {}", outcome.records().len(), outcome.source_label());
    Ok(Snapshot::build(
        outcome,
        config.effective_today(),
        config.nearing_days,
        config.criteria.clone(),
    ))
}

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Hostname is not in the loaded inventory
    #[error("Host not found in inventory: {hostname}")]
    HostNotFound { hostname: String },

    /// Filter matched no rows where at least one was required
    #[error("No rows match: {filter}")]
    NothingMatched { filter: String },

    /// The requested inventory could not be loaded; the sample stood in
    #[error("Inventory unavailable, refusing to act on the bundled sample: {reason}")]
    InventoryUnavailable { reason: String },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    /// Exit code reported for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::HostNotFound { .. } | Self::NothingMatched { .. } => exit_codes::NOT_FOUND,
            Self::InventoryUnavailable { .. } | Self::ReportFailed { .. } => exit_codes::ERROR,
        }
    }
}

/// Process exit codes
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Host not found, or nothing matched the filter
    pub const NOT_FOUND: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EoslStatus;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::NOT_FOUND, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }

    #[test]
    fn test_pipeline_error_exit_codes() {
        let err = PipelineError::HostNotFound {
            hostname: "x".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
        let err = PipelineError::ReportFailed {
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(err.exit_code(), exit_codes::ERROR);
        let err = PipelineError::InventoryUnavailable {
            reason: "missing".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::ERROR);
    }

    #[test]
    fn test_run_with_fixed_date() {
        let config = PipelineConfig {
            today: NaiveDate::from_ymd_opt(2025, 1, 1),
            criteria: FilterCriteria::new().with_status(EoslStatus::Expired),
            ..Default::default()
        };
        let snapshot = run(&config).unwrap();
        assert_eq!(snapshot.today, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(snapshot.nearing_days, 90);
        assert_eq!(snapshot.visible_count(), 4);
    }
}
