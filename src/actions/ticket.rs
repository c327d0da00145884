//! Ticket export.

use crate::error::{ExportErrorKind, InventoryError, Result};
use crate::model::{EoslStatus, InventoryRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// Header of a ticket CSV.
pub const TICKET_HEADER: [&str; 8] = [
    "hostname",
    "vendor",
    "eosl_status",
    "owner",
    "owner_email",
    "eosl_date",
    "priority",
    "summary",
];

/// Ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    /// `High` for expired servers, `Medium` for everything else.
    #[must_use]
    pub const fn for_status(status: EoslStatus) -> Self {
        match status {
            EoslStatus::Expired => Self::High,
            _ => Self::Medium,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
        }
    }
}

/// One ticket row, fields in [`TICKET_HEADER`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub hostname: String,
    pub vendor: String,
    pub eosl_status: EoslStatus,
    pub owner: String,
    pub owner_email: String,
    pub eosl_date: String,
    pub priority: Priority,
    pub summary: String,
}

/// Build the ticket for a row.
#[must_use]
pub fn ticket_for(record: &InventoryRecord, today: NaiveDate) -> Ticket {
    let timing = match record.days_until_eosl(today) {
        Some(days) if days < 0 => format!(" ({} days past EOSL)", -days),
        Some(days) => format!(" ({days} days left)"),
        None => String::new(),
    };
    Ticket {
        hostname: record.hostname.clone(),
        vendor: record.vendor.clone(),
        eosl_status: record.status,
        owner: record.owner.clone(),
        owner_email: record.owner_email.clone(),
        eosl_date: record
            .eosl_date
            .map_or_else(|| record.eosl_date_raw.clone(), |d| d.to_string()),
        priority: Priority::for_status(record.status),
        summary: format!(
            "Replace / upgrade {} - EOSL {}{timing}",
            record.hostname, record.status
        ),
    }
}

/// Write a header plus one ticket per row. Returns the number of tickets.
pub fn write_tickets<'a, W, I>(rows: I, writer: W, today: NaiveDate) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    let csv_err = |e: csv::Error| {
        InventoryError::export("writing tickets", ExportErrorKind::Csv(e.to_string()))
    };

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(TICKET_HEADER).map_err(csv_err)?;

    let mut count = 0;
    for record in rows {
        csv_writer
            .serialize(ticket_for(record, today))
            .map_err(csv_err)?;
        count += 1;
    }
    csv_writer.flush()?;
    Ok(count)
}
