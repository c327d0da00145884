//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for the `view` command
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: TUI if TTY, summary otherwise
    #[default]
    Auto,
    /// Interactive dashboard
    Tui,
    /// KPI summary for the shell
    Summary,
    /// Aligned table of the filtered rows
    Table,
    /// Structured JSON output
    Json,
    /// Filtered inventory as CSV
    Csv,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Tui => write!(f, "tui"),
            Self::Summary => write!(f, "summary"),
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// CSV export variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ExportKind {
    /// Filtered inventory with derived status columns
    #[default]
    Inventory,
    /// Owner contact list
    Contacts,
    /// Ticket rows for a ticketing system import
    Tickets,
}

impl ExportKind {
    /// Base name used for timestamped export files.
    #[must_use]
    pub const fn file_stem(&self) -> &'static str {
        match self {
            Self::Inventory => "filtered_inventory",
            Self::Contacts => "contacts_filtered",
            Self::Tickets => "tickets",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Contacts => "contact list",
            Self::Tickets => "tickets",
        }
    }
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
