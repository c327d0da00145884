//! Inventory rows.

use super::{EoslStatus, FirmwareFlags, OsFamily};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One server in the inventory.
///
/// Text fields hold the values as loaded (vendor already normalized).
/// `status` and `firmware` are derived and are overwritten by
/// [`crate::classify::classify_records`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Host name, used as the row identity
    pub hostname: String,
    pub asset_tag: String,
    /// Upper-cased vendor name
    pub vendor: String,
    pub hardware_model: String,
    pub serial: String,
    /// OS name (e.g. "RHEL", "Windows Server")
    pub os: String,
    pub os_version: String,
    pub environment: String,
    pub owner: String,
    pub team: String,
    pub owner_email: String,
    pub location: String,
    /// EOSL date text exactly as supplied
    pub eosl_date_raw: String,
    /// Parsed EOSL date (`None` when missing or unparseable)
    pub eosl_date: Option<NaiveDate>,
    pub firmware_version: String,
    pub microcode_version: String,
    pub last_audit: String,
    pub notes: String,
    /// Derived EOSL status
    pub status: EoslStatus,
    /// Derived firmware/microcode completeness
    pub firmware: FirmwareFlags,
}

impl InventoryRecord {
    /// Create a record with only a hostname set.
    #[must_use]
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Default::default()
        }
    }

    /// OS family of this row.
    #[must_use]
    pub fn os_family(&self) -> OsFamily {
        OsFamily::detect(&self.os)
    }

    /// "owner / team" display string.
    #[must_use]
    pub fn owner_team(&self) -> String {
        match (self.owner.is_empty(), self.team.is_empty()) {
            (false, false) => format!("{} / {}", self.owner, self.team),
            (false, true) => self.owner.clone(),
            (true, false) => self.team.clone(),
            (true, true) => String::new(),
        }
    }

    /// "vendor model" display string.
    #[must_use]
    pub fn vendor_model(&self) -> String {
        format!("{} {}", self.vendor, self.hardware_model)
            .trim()
            .to_string()
    }

    /// "os version" display string.
    #[must_use]
    pub fn os_display(&self) -> String {
        format!("{} {}", self.os, self.os_version).trim().to_string()
    }

    /// Where contact mail should go: the e-mail column when present,
    /// otherwise the owner field.
    #[must_use]
    pub fn contact_address(&self) -> Option<&str> {
        [self.owner_email.trim(), self.owner.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
    }

    /// Days from `today` to the EOSL date (negative once expired).
    #[must_use]
    pub fn days_until_eosl(&self, today: NaiveDate) -> Option<i64> {
        self.eosl_date.map(|d| (d - today).num_days())
    }

    /// Firmware version, or `MISSING` when empty.
    #[must_use]
    pub fn firmware_display(&self) -> &str {
        or_missing(&self.firmware_version)
    }

    /// Microcode version, or `MISSING` when empty.
    #[must_use]
    pub fn microcode_display(&self) -> &str {
        or_missing(&self.microcode_version)
    }
}

fn or_missing(s: &str) -> &str {
    if s.trim().is_empty() {
        "MISSING"
    } else {
        s
    }
}
