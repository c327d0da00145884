//! Headline counts and breakdown tables.

use crate::model::{EoslStatus, InventoryRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Dashboard headline numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total: usize,
    pub expired: usize,
    pub nearing: usize,
    pub supported: usize,
    pub unknown: usize,
    /// Rows missing firmware or microcode
    pub missing_firmware: usize,
    /// Expired share in percent, one decimal; 0 for an empty set
    pub pct_expired: f64,
}

impl Kpis {
    /// Aggregate over any set of rows in a single pass.
    pub fn aggregate<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a InventoryRecord>,
    {
        let mut kpis = Self::default();
        for record in rows {
            kpis.total += 1;
            match record.status {
                EoslStatus::Expired => kpis.expired += 1,
                EoslStatus::Nearing => kpis.nearing += 1,
                EoslStatus::Supported => kpis.supported += 1,
                EoslStatus::Unknown => kpis.unknown += 1,
            }
            if record.firmware.is_incomplete() {
                kpis.missing_firmware += 1;
            }
        }
        kpis.pct_expired = percent(kpis.expired, kpis.total);
        kpis
    }

    /// Count for one status.
    #[must_use]
    pub const fn count(&self, status: EoslStatus) -> usize {
        match status {
            EoslStatus::Expired => self.expired,
            EoslStatus::Nearing => self.nearing,
            EoslStatus::Supported => self.supported,
            EoslStatus::Unknown => self.unknown,
        }
    }

    /// Rows that are expired or nearing.
    #[must_use]
    pub const fn at_risk(&self) -> usize {
        self.expired + self.nearing
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let raw = part as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Count table keyed by a row attribute, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub title: String,
    pub entries: Vec<(String, usize)>,
}

impl Breakdown {
    /// Hardware models (`vendor model`), truncated to `limit` entries.
    pub fn by_model<'a, I>(rows: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = &'a InventoryRecord>,
    {
        let mut breakdown = Self::count_by("Hardware models", rows, |r| {
            or_unspecified(r.vendor_model())
        });
        breakdown.entries.truncate(limit);
        breakdown
    }

    /// Environments.
    pub fn by_environment<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a InventoryRecord>,
    {
        Self::count_by("Environments", rows, |r| or_unspecified(r.environment.clone()))
    }

    /// OS families.
    pub fn by_os_family<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a InventoryRecord>,
    {
        Self::count_by("OS families", rows, |r| r.os_family().label().to_string())
    }

    fn count_by<'a, I, F>(title: &str, rows: I, key: F) -> Self
    where
        I: IntoIterator<Item = &'a InventoryRecord>,
        F: Fn(&InventoryRecord) -> String,
    {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for record in rows {
            *counts.entry(key(record)).or_insert(0) += 1;
        }
        let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
        // Stable: ties keep first-seen order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self {
            title: title.to_string(),
            entries,
        }
    }

    /// Largest count, for bar scaling.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|(_, n)| *n).max().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn or_unspecified(value: String) -> String {
    if value.trim().is_empty() {
        "(unspecified)".to_string()
    } else {
        value
    }
}
