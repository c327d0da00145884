//! CSV exports.
//!
//! Three exports are produced from the filtered rows: the inventory itself
//! with derived columns appended, an owner contact list, and tickets (see
//! [`crate::actions::write_tickets`]). An empty row set still produces the
//! header line.

use super::{ExportKind, ReportError, ReportFormat, ReportGenerator};
use crate::actions::write_tickets;
use crate::error::{ExportErrorKind, InventoryError, Result};
use crate::model::InventoryRecord;
use crate::pipeline::Snapshot;
use chrono::NaiveDate;
use std::io::Write;

/// Header of the filtered inventory export.
pub const INVENTORY_HEADER: [&str; 19] = [
    "hostname",
    "asset_tag",
    "environment",
    "owner",
    "team",
    "location",
    "vendor",
    "hardware_model",
    "serial",
    "os",
    "os_version",
    "eosl_date",
    "microcode_version",
    "firmware_version",
    "last_audit",
    "notes",
    "owner_email",
    "eosl_status",
    "firmware_complete",
];

/// Header of the owner contact export.
pub const CONTACTS_HEADER: [&str; 4] = ["owner", "owner_email", "hostname", "eosl_status"];

fn inventory_row(r: &InventoryRecord) -> [String; 19] {
    [
        r.hostname.clone(),
        r.asset_tag.clone(),
        r.environment.clone(),
        r.owner.clone(),
        r.team.clone(),
        r.location.clone(),
        r.vendor.clone(),
        r.hardware_model.clone(),
        r.serial.clone(),
        r.os.clone(),
        r.os_version.clone(),
        r.eosl_date_raw.clone(),
        r.microcode_version.clone(),
        r.firmware_version.clone(),
        r.last_audit.clone(),
        r.notes.clone(),
        r.owner_email.clone(),
        r.status.to_string(),
        r.firmware.is_complete().to_string(),
    ]
}

fn contact_row(r: &InventoryRecord) -> [String; 4] {
    [
        r.owner.clone(),
        r.owner_email.clone(),
        r.hostname.clone(),
        r.status.to_string(),
    ]
}

fn write_rows<'a, W, I, const N: usize>(
    header: [&str; N],
    rows: I,
    writer: W,
    to_row: fn(&InventoryRecord) -> [String; N],
) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    let csv_err =
        |e: csv::Error| InventoryError::export("writing CSV", ExportErrorKind::Csv(e.to_string()));

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(header).map_err(csv_err)?;
    let mut count = 0;
    for record in rows {
        csv_writer.write_record(to_row(record)).map_err(csv_err)?;
        count += 1;
    }
    csv_writer.flush()?;
    Ok(count)
}

/// Write the filtered inventory with `eosl_status` and `firmware_complete`.
pub fn write_inventory_csv<'a, W, I>(rows: I, writer: W) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    write_rows(INVENTORY_HEADER, rows, writer, inventory_row)
}

/// Write the owner contact list.
pub fn write_contacts_csv<'a, W, I>(rows: I, writer: W) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    write_rows(CONTACTS_HEADER, rows, writer, contact_row)
}

/// Write one export kind. Logs a warning when there was nothing to export.
pub fn write_export<'a, W, I>(kind: ExportKind, rows: I, writer: W, today: NaiveDate) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    let count = match kind {
        ExportKind::Inventory => write_inventory_csv(rows, writer)?,
        ExportKind::Contacts => write_contacts_csv(rows, writer)?,
        ExportKind::Tickets => write_tickets(rows, writer, today)?,
    };
    if count == 0 {
        tracing::warn!("No rows matched; {kind} export contains only the header");
    }
    Ok(count)
}

/// CSV report generator: the filtered inventory export.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate(&self, snapshot: &Snapshot) -> std::result::Result<String, ReportError> {
        let mut buffer = Vec::new();
        write_inventory_csv(snapshot.filtered(), &mut buffer)
            .map_err(|e| ReportError::SerializationError(e.full_message()))?;
        String::from_utf8(buffer).map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}
