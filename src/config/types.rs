//! Configuration types for eosl-inventory operations.
//!
//! Provides the file-backed [`AppConfig`] and the per-command configs the
//! CLI handlers receive.

use crate::classify::DEFAULT_NEARING_DAYS;
use crate::changelog::DEFAULT_CHANGE_LOG;
use crate::filter::FilterCriteria;
use crate::model::DEFAULT_ACTOR;
use crate::pipeline::PipelineConfig;
use crate::reports::{ExportKind, ReportFormat};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI flags are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Inventory source and classification window
    pub inventory: InventoryConfig,
    /// Change log location and default actor
    pub change_log: ChangeLogConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
    /// TUI-specific configuration
    pub tui: TuiConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Pipeline inputs for this configuration.
    #[must_use]
    pub fn pipeline(&self, criteria: FilterCriteria, today: Option<NaiveDate>) -> PipelineConfig {
        PipelineConfig {
            inventory: self.inventory.path.clone(),
            nearing_days: self.inventory.nearing_days,
            today,
            criteria,
        }
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for [`AppConfig`], used to turn CLI flags into an override layer.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the inventory CSV path.
    pub fn inventory_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.inventory.path = path;
        self
    }

    /// Set the nearing window in days.
    pub const fn nearing_days(mut self, days: u32) -> Self {
        self.config.inventory.nearing_days = days;
        self
    }

    /// Set the change log path.
    pub fn change_log_path(mut self, path: PathBuf) -> Self {
        self.config.change_log.path = path;
        self
    }

    /// Set the actor recorded on change log entries.
    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.config.change_log.actor = actor.into();
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Suppress non-essential output.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Set the TUI theme.
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.tui.theme = theme.into();
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Inventory source and classification settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InventoryConfig {
    /// Inventory CSV path (omit to use the bundled sample)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Days before EOSL at which a server counts as NEARING
    #[schemars(range(min = 1, max = 3650))]
    pub nearing_days: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            nearing_days: DEFAULT_NEARING_DAYS,
        }
    }
}

/// Change log settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ChangeLogConfig {
    /// Append-only audit CSV
    pub path: PathBuf,
    /// Name recorded as the actor of each entry
    pub actor: String,
}

impl Default for ChangeLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CHANGE_LOG),
            actor: DEFAULT_ACTOR.to_string(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Directory for timestamped exports written from the dashboard
    pub export_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Auto,
            file: None,
            no_color: false,
            export_dir: PathBuf::from("."),
        }
    }
}

/// Behavior flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// TUI Configuration
// ============================================================================

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
    /// Event poll interval in milliseconds
    #[schemars(range(min = 10, max = 5000))]
    pub tick_rate_ms: u64,
    /// Change log entries shown in the activity panel
    pub recent_log_entries: usize,
    /// Models shown in the breakdown chart
    pub top_models: usize,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_rate_ms: 250,
            recent_log_entries: 8,
            top_models: 8,
        }
    }
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for view operations
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub pipeline: PipelineConfig,
    /// Output configuration
    pub output: OutputConfig,
    pub change_log: ChangeLogConfig,
    pub tui: TuiConfig,
}

/// Configuration for export operations
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub pipeline: PipelineConfig,
    pub kind: ExportKind,
    /// Destination; `None` writes to stdout
    pub output_file: Option<PathBuf>,
}

/// Configuration for the contact operation
#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub pipeline: PipelineConfig,
    pub hostname: String,
    pub actor: String,
}

/// Rows a mark-intimated run applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntimateTarget {
    /// One host by name
    Host(String),
    /// Every row passing the pipeline filter
    Filtered,
}

/// Configuration for mark-intimated operations
#[derive(Debug, Clone)]
pub struct IntimateConfig {
    pub pipeline: PipelineConfig,
    pub target: IntimateTarget,
    pub note: Option<String>,
    pub change_log: ChangeLogConfig,
}

/// Configuration for single-host ticket export
#[derive(Debug, Clone)]
pub struct TicketConfig {
    pub pipeline: PipelineConfig,
    pub hostname: String,
    pub output_file: Option<PathBuf>,
}

/// Configuration for change log queries
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub change_log: PathBuf,
    pub host: Option<String>,
    /// Newest entries to show; `None` shows all in append order
    pub limit: Option<usize>,
    pub format: ReportFormat,
    pub output_file: Option<PathBuf>,
}
