//! EOSL status and firmware completeness classification.
//!
//! Everything here is a pure function of its inputs. The reference date is
//! always passed in so results are reproducible (`--today` on the CLI).

use crate::model::{EoslStatus, FirmwareFlags, InventoryRecord};
use chrono::{Days, NaiveDate};

/// Default width of the nearing window in days.
pub const DEFAULT_NEARING_DAYS: u32 = 90;

/// Classify an EOSL date relative to `today`.
///
/// - `Expired` when the date is before `today`
/// - `Nearing` when `today <= date < today + threshold_days`
/// - `Supported` when the date is at or beyond `today + threshold_days`
/// - `Unknown` when there is no date
#[must_use]
pub fn classify(eosl: Option<NaiveDate>, today: NaiveDate, threshold_days: u32) -> EoslStatus {
    let Some(date) = eosl else {
        return EoslStatus::Unknown;
    };
    if date < today {
        return EoslStatus::Expired;
    }
    // Saturates at the end of the calendar: everything left is nearing.
    match today.checked_add_days(Days::new(u64::from(threshold_days))) {
        Some(horizon) if date >= horizon => EoslStatus::Supported,
        _ => EoslStatus::Nearing,
    }
}

/// Completeness flags for a firmware/microcode pair. Whitespace-only
/// values count as missing.
#[must_use]
pub fn firmware_flags(firmware: &str, microcode: &str) -> FirmwareFlags {
    FirmwareFlags {
        missing_firmware: firmware.trim().is_empty(),
        missing_microcode: microcode.trim().is_empty(),
    }
}

/// Recompute the derived fields of every row in place.
pub fn classify_records(records: &mut [InventoryRecord], today: NaiveDate, threshold_days: u32) {
    for record in records.iter_mut() {
        record.status = classify(record.eosl_date, today, threshold_days);
        record.firmware = firmware_flags(&record.firmware_version, &record.microcode_version);
    }
    tracing::debug!(
        "Classified {} row(s) against {today} with a {threshold_days}-day window",
        records.len()
    );
}

/// Signed number of days from `today` to the row's EOSL date.
#[must_use]
pub fn days_until_eosl(record: &InventoryRecord, today: NaiveDate) -> Option<i64> {
    record.days_until_eosl(today)
}
