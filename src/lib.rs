//! **Server inventory end-of-service-life (EOSL) tracking.**
//!
//! `eosl-inventory` loads a server inventory CSV, classifies every server by
//! how close its hardware is to end of support, and helps an operator act on
//! the result: contact owners, record that they were notified, and export
//! contact lists and ticket rows. It powers both an interactive terminal
//! dashboard and a scriptable command-line interface.
//!
//! ## Core Concepts & Modules
//!
//! - **[`loader`]**: Reads the inventory CSV with lenient headers and dates,
//!   falling back to a bundled sample when the file is missing or malformed.
//! - **[`classify`]**: Derives [`EoslStatus`] (`EXPIRED`, `NEARING`,
//!   `SUPPORTED`, `UNKNOWN`) and firmware completeness for each row.
//! - **[`filter`]** and **[`kpi`]**: Narrow the inventory and count what is
//!   left.
//! - **[`pipeline`]**: Runs load → classify → filter → aggregate into a
//!   [`Snapshot`].
//! - **[`actions`]** and **[`changelog`]**: Owner contact links, the
//!   append-only record of notifications, and ticket rows.
//! - **[`reports`]**: Summary, table, JSON and CSV renderings of a snapshot.
//! - **[`tui`]**: The ratatui dashboard.
//!
//! ## Getting Started
//!
//! ```no_run
//! use eosl_inventory::{pipeline, EoslStatus, FilterCriteria, PipelineConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig {
//!         inventory: Some("servers.csv".into()),
//!         criteria: FilterCriteria::new().with_status(EoslStatus::Expired),
//!         ..Default::default()
//!     };
//!     let snapshot = pipeline::run(&config)?;
//!
//!     println!(
//!         "{} of {} servers are past end of support",
//!         snapshot.kpis.total, snapshot.inventory_kpis.total
//!     );
//!     for server in snapshot.filtered() {
//!         println!("  {} ({})", server.hostname, server.eosl_date_raw);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Recording a notification
//!
//! ```no_run
//! use eosl_inventory::{actions, ChangeLogStore, InventoryRecord};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let log = ChangeLogStore::open("change_log.csv");
//!     let server = InventoryRecord::new("srv01");
//!     actions::mark_intimated(&log, &server, "alice", Some("called owner"))?;
//!     assert_eq!(log.for_host("srv01")?.len(), 1);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: usize↔f64/u16/u32 casts appear in KPI and layout math
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::similar_names
)]

pub mod actions;
pub mod changelog;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod kpi;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod tui;

// Re-export main types for convenience
pub use changelog::{ChangeLogStore, ChangeLogWriter};
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset, OutputConfig, TuiConfig};
pub use config::{ConfigError, Validatable};
pub use error::{ErrorContext, InventoryError, OptionContext, Result};
pub use filter::FilterCriteria;
pub use kpi::{Breakdown, Kpis};
pub use loader::{load_or_sample, LoadOutcome};
pub use model::{ChangeLogEntry, EoslStatus, FirmwareFlags, InventoryRecord, OsFamily};
pub use pipeline::{PipelineConfig, Snapshot};
pub use reports::{ExportKind, ReportFormat, ReportGenerator};
