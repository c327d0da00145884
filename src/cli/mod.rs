//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for one CLI subcommand and
//! returns the process exit code.

mod actions;
mod export;
mod log;
mod view;

pub use actions::{run_contact, run_intimate};
pub use export::{run_export, run_sample, run_ticket};
pub use log::run_log;
pub use view::run_view;

// Re-export config types used by handlers
pub use crate::config::{
    ContactConfig, ExportConfig, IntimateConfig, IntimateTarget, LogConfig, TicketConfig,
    ViewConfig,
};

use crate::model::InventoryRecord;
use crate::pipeline::{exit_codes, PipelineError, Snapshot};

/// Look up a host in the loaded inventory, ignoring the filter.
fn find_host<'a>(snapshot: &'a Snapshot, hostname: &str) -> Result<&'a InventoryRecord, PipelineError> {
    snapshot
        .find(hostname)
        .ok_or_else(|| PipelineError::HostNotFound {
            hostname: hostname.to_string(),
        })
}

/// Refuse to act when a requested inventory was replaced by the sample.
///
/// Only the read-only `view` command shows the sample in that case.
fn require_requested_inventory(snapshot: &Snapshot) -> Result<(), PipelineError> {
    match &snapshot.fallback_reason {
        Some(reason) => Err(PipelineError::InventoryUnavailable {
            reason: reason.clone(),
        }),
        None => Ok(()),
    }
}

/// Log a handler-level failure and turn it into its exit code.
fn report_pipeline_error(err: &PipelineError) -> i32 {
    let code = err.exit_code();
    if code == exit_codes::ERROR {
        tracing::error!("{err}");
    } else {
        tracing::warn!("{err}");
    }
    code
}
