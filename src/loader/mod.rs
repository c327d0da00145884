//! Inventory CSV loading.
//!
//! The loader is header driven: columns are matched by name, unknown
//! columns are ignored and missing columns are read as empty. The
//! legacy export column names (`hardware_vendor`, `os_name`,
//! `end_of_service_date`) are accepted as aliases of the logical ones.
//! When a column appears more than once, under its own name or an alias,
//! the leftmost one is read.
//!
//! [`load_or_sample`] never fails on a bad inventory file. It logs the
//! problem and hands back the bundled sample as a [`LoadOutcome::Fallback`]
//! so a dashboard session always has data to show.
//!
//! Derived fields are left at their defaults here; run
//! [`crate::classify::classify_records`] afterwards.

mod dates;
mod sample;

pub use dates::{parse_date_lenient, DATE_FORMATS};
pub use sample::{write_sample, SAMPLE_FILE_NAME, SAMPLE_INVENTORY};

use crate::error::{ErrorContext, InventoryError, LoadErrorKind, Result};
use crate::model::{normalize_vendor, InventoryRecord};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Maximum inventory file size (64 MB).
const MAX_INVENTORY_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Columns that must be present in the header row.
pub const REQUIRED_HEADERS: &[&str] = &["hostname"];

/// Legacy column names and the logical column each one fills.
pub const HEADER_ALIASES: &[(&str, &str)] = &[
    ("hardware_vendor", "vendor"),
    ("os_name", "os"),
    ("end_of_service_date", "eosl_date"),
];

/// Row shape as it appears on disk.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    hostname: String,
    asset_tag: String,
    vendor: String,
    hardware_model: String,
    serial: String,
    os: String,
    os_version: String,
    environment: String,
    owner: String,
    team: String,
    owner_email: String,
    location: String,
    eosl_date: String,
    firmware_version: String,
    microcode_version: String,
    last_audit: String,
    notes: String,
}

impl From<RawRecord> for InventoryRecord {
    fn from(raw: RawRecord) -> Self {
        let eosl_date = parse_date_lenient(&raw.eosl_date);
        Self {
            hostname: raw.hostname,
            asset_tag: raw.asset_tag,
            vendor: normalize_vendor(&raw.vendor),
            hardware_model: raw.hardware_model,
            serial: raw.serial,
            os: raw.os,
            os_version: raw.os_version,
            environment: raw.environment,
            owner: raw.owner,
            team: raw.team,
            owner_email: raw.owner_email,
            location: raw.location,
            eosl_date_raw: raw.eosl_date,
            eosl_date,
            firmware_version: raw.firmware_version,
            microcode_version: raw.microcode_version,
            last_audit: raw.last_audit,
            notes: raw.notes,
            ..Default::default()
        }
    }
}

/// Where the loaded rows came from.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// Rows read from the given file
    Loaded {
        path: PathBuf,
        records: Vec<InventoryRecord>,
    },
    /// No file was requested; bundled sample in use
    Sample { records: Vec<InventoryRecord> },
    /// The requested file could not be used; bundled sample in use
    Fallback {
        path: PathBuf,
        reason: String,
        records: Vec<InventoryRecord>,
    },
}

impl LoadOutcome {
    /// Loaded rows.
    #[must_use]
    pub fn records(&self) -> &[InventoryRecord] {
        match self {
            Self::Loaded { records, .. }
            | Self::Sample { records }
            | Self::Fallback { records, .. } => records,
        }
    }

    /// Consume and return the loaded rows.
    #[must_use]
    pub fn into_records(self) -> Vec<InventoryRecord> {
        match self {
            Self::Loaded { records, .. }
            | Self::Sample { records }
            | Self::Fallback { records, .. } => records,
        }
    }

    /// Whether the bundled sample replaced a requested file.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Short description of the data source for headers and logs.
    #[must_use]
    pub fn source_label(&self) -> String {
        match self {
            Self::Loaded { path, .. } => path.display().to_string(),
            Self::Sample { .. } => "bundled sample".to_string(),
            Self::Fallback { path, .. } => {
                format!("bundled sample (failed to load {})", path.display())
            }
        }
    }

    /// Reason the requested file was rejected, if it was.
    #[must_use]
    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            Self::Fallback { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Read inventory rows from any CSV source.
///
/// `origin` names the source in error messages.
pub fn load_reader<R: Read>(reader: R, origin: &str) -> Result<Vec<InventoryRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| InventoryError::load(origin, LoadErrorKind::Csv(e.to_string())))?
        .clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(InventoryError::load(origin, LoadErrorKind::EmptyFile));
    }

    let normalized = logical_headers(&headers);
    for required in REQUIRED_HEADERS {
        if !normalized.iter().any(|h| h == *required) {
            return Err(InventoryError::missing_column(*required, origin));
        }
    }
    csv_reader.set_headers(normalized);

    let mut records = Vec::new();
    for (idx, row) in csv_reader.deserialize::<RawRecord>().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let raw = row.map_err(|e| {
            InventoryError::load(
                format!("{origin}, line {}", idx + 2),
                LoadErrorKind::Csv(e.to_string()),
            )
        })?;
        records.push(InventoryRecord::from(raw));
    }

    let undated = records.iter().filter(|r| r.eosl_date.is_none()).count();
    if undated > 0 {
        tracing::debug!("{undated} row(s) in {origin} have no parseable EOSL date");
    }
    tracing::debug!("Loaded {} row(s) from {origin}", records.len());
    Ok(records)
}

/// Read inventory rows from a file.
pub fn load_path(path: &Path) -> Result<Vec<InventoryRecord>> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(InventoryError::load(
                path.display().to_string(),
                LoadErrorKind::NotFound,
            ));
        }
        Err(e) => return Err(InventoryError::io(path, e)),
    };
    if metadata.len() > MAX_INVENTORY_FILE_SIZE {
        return Err(InventoryError::validation(format!(
            "{} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_INVENTORY_FILE_SIZE / (1024 * 1024),
        )));
    }

    let file = std::fs::File::open(path).map_err(|e| InventoryError::io(path, e))?;
    load_reader(file, &path.display().to_string())
}

/// Parse the bundled sample inventory.
pub fn load_sample() -> Result<Vec<InventoryRecord>> {
    load_reader(SAMPLE_INVENTORY.as_bytes(), "bundled sample").context("loading bundled sample")
}

/// Load `path` if given, falling back to the bundled sample on any failure.
///
/// Only a broken bundled sample is reported as an error.
pub fn load_or_sample(path: Option<&Path>) -> Result<LoadOutcome> {
    let Some(path) = path else {
        return Ok(LoadOutcome::Sample {
            records: load_sample()?,
        });
    };

    match load_path(path) {
        Ok(records) => Ok(LoadOutcome::Loaded {
            path: path.to_path_buf(),
            records,
        }),
        Err(err) => {
            let reason = err.full_message();
            tracing::warn!("{reason}; falling back to the bundled sample inventory");
            Ok(LoadOutcome::Fallback {
                path: path.to_path_buf(),
                reason,
                records: load_sample()?,
            })
        }
    }
}

/// Map each header to its logical column name.
///
/// Repeated columns after the first are blanked so they are ignored.
fn logical_headers(headers: &csv::StringRecord) -> csv::StringRecord {
    let mut seen = HashSet::new();
    headers
        .iter()
        .map(|header| {
            let name = normalize_header(header);
            let logical = HEADER_ALIASES
                .iter()
                .find(|(alias, _)| *alias == name)
                .map_or(name.as_str(), |(_, logical)| *logical)
                .to_string();
            if seen.insert(logical.clone()) {
                logical
            } else {
                String::new()
            }
        })
        .collect()
}

/// Lower-case a header and replace spaces and dashes with underscores.
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .replace([' ', '-'], "_")
}
