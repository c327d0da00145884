//! Report generation and CSV exports.
//!
//! Reports render a pipeline [`Snapshot`] for the shell:
//! - Summary: KPI counts, at-risk hosts and breakdowns
//! - Table: one aligned line per filtered row
//! - JSON: structured data for programmatic integration
//! - CSV: the filtered inventory export
//!
//! The [`export`] module writes the three CSV exports (inventory, owner
//! contacts, tickets) to any writer.

pub mod export;
mod json;
mod summary;
mod types;

pub use export::{
    write_contacts_csv, write_export, write_inventory_csv, CsvReporter, CONTACTS_HEADER,
    INVENTORY_HEADER,
};
pub use json::JsonReporter;
pub use summary::{truncate, SummaryReporter, TableReporter};
pub use types::{ExportKind, ReportFormat};

use crate::pipeline::Snapshot;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Output format not supported here: {0}")]
    UnsupportedFormat(ReportFormat),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the filtered view of a snapshot
    fn generate(&self, snapshot: &Snapshot) -> Result<String, ReportError>;

    /// Write the report to a writer
    fn write_report(&self, snapshot: &Snapshot, writer: &mut dyn Write) -> Result<(), ReportError> {
        let report = self.generate(snapshot)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
pub fn create_reporter(format: ReportFormat) -> Result<Box<dyn ReportGenerator>, ReportError> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control.
///
/// `Tui` has no text rendering and is rejected.
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Result<Box<dyn ReportGenerator>, ReportError> {
    let reporter: Box<dyn ReportGenerator> = match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Table => {
            if use_color {
                Box::new(TableReporter::new())
            } else {
                Box::new(TableReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
        ReportFormat::Tui => return Err(ReportError::UnsupportedFormat(format)),
    };
    Ok(reporter)
}
