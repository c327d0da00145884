//! Row filtering.
//!
//! A [`FilterCriteria`] is a conjunction of optional constraints. Empty
//! constraints match everything, so the default criteria is the identity
//! filter. Filtering never reorders or modifies rows.

use crate::model::{normalize_vendor, EoslStatus, InventoryRecord, OsFamily, VENDOR_PICKLIST};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Active filter constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Vendor names (normalized before comparison)
    pub vendors: Vec<String>,
    /// OS families
    pub os_families: Vec<OsFamily>,
    /// Environments (exact match)
    pub environments: Vec<String>,
    /// Case-insensitive substring of owner or team
    pub owner: Option<String>,
    /// Exact EOSL status
    pub status: Option<EoslStatus>,
    /// Only rows missing firmware or microcode
    pub missing_firmware_only: bool,
}

impl FilterCriteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_vendor(mut self, vendor: impl AsRef<str>) -> Self {
        self.vendors.push(normalize_vendor(vendor.as_ref()));
        self
    }

    #[must_use]
    pub fn with_os_family(mut self, family: OsFamily) -> Self {
        self.os_families.push(family);
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environments.push(environment.into());
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: EoslStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn missing_firmware_only(mut self, enabled: bool) -> Self {
        self.missing_firmware_only = enabled;
        self
    }

    /// True when no constraint is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
            && self.os_families.is_empty()
            && self.environments.is_empty()
            && self.owner_needle().is_none()
            && self.status.is_none()
            && !self.missing_firmware_only
    }

    /// Check if a row matches all active constraints.
    #[must_use]
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        if !self.vendors.is_empty() {
            let vendor = normalize_vendor(&record.vendor);
            if !self.vendors.iter().any(|v| normalize_vendor(v) == vendor) {
                return false;
            }
        }

        if !self.os_families.is_empty() && !self.os_families.contains(&record.os_family()) {
            return false;
        }

        if !self.environments.is_empty()
            && !self.environments.iter().any(|e| *e == record.environment)
        {
            return false;
        }

        if let Some(needle) = self.owner_needle() {
            let owner = record.owner.to_lowercase();
            let team = record.team.to_lowercase();
            if !owner.contains(&needle) && !team.contains(&needle) {
                return false;
            }
        }

        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }

        if self.missing_firmware_only && !record.firmware.is_incomplete() {
            return false;
        }

        true
    }

    /// Rows matching all constraints, in input order.
    #[must_use]
    pub fn apply<'a>(&self, records: &'a [InventoryRecord]) -> Vec<&'a InventoryRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Human-readable summary of the active constraints.
    #[must_use]
    pub fn description(&self) -> String {
        let mut parts = Vec::new();
        if !self.vendors.is_empty() {
            parts.push(format!("vendor in [{}]", self.vendors.join(", ")));
        }
        if !self.os_families.is_empty() {
            let families: Vec<_> = self.os_families.iter().map(OsFamily::label).collect();
            parts.push(format!("os in [{}]", families.join(", ")));
        }
        if !self.environments.is_empty() {
            parts.push(format!("env in [{}]", self.environments.join(", ")));
        }
        if let Some(owner) = self.owner_needle() {
            parts.push(format!("owner/team ~ \"{owner}\""));
        }
        if let Some(status) = self.status {
            parts.push(format!("status = {status}"));
        }
        if self.missing_firmware_only {
            parts.push("firmware/microcode missing".to_string());
        }
        if parts.is_empty() {
            "all rows".to_string()
        } else {
            parts.join(" AND ")
        }
    }

    fn owner_needle(&self) -> Option<String> {
        self.owner
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Vendor choices: the fixed picklist plus every vendor in the inventory.
#[must_use]
pub fn vendor_options(records: &[InventoryRecord]) -> Vec<String> {
    let mut options: BTreeSet<String> = VENDOR_PICKLIST.iter().map(|v| (*v).to_string()).collect();
    options.extend(
        records
            .iter()
            .map(|r| normalize_vendor(&r.vendor))
            .filter(|v| !v.is_empty()),
    );
    options.into_iter().collect()
}

/// Distinct non-empty environments, sorted.
#[must_use]
pub fn environment_options(records: &[InventoryRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.environment.clone())
        .filter(|e| !e.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
