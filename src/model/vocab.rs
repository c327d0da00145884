//! Vendor and operating-system vocabularies.

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Vendors always offered by the vendor filter, even when absent from the
/// loaded inventory.
pub const VENDOR_PICKLIST: &[&str] = &[
    "HPE", "DELL", "IBM", "ORACLE", "SUN", "LENOVO", "CISCO", "OTHER",
];

/// Normalize a vendor name: trim, upper-case, fold Sun into Oracle.
#[must_use]
pub fn normalize_vendor(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    match upper.as_str() {
        "SUN" | "ORACLE/SUN" | "SUN/ORACLE" => "ORACLE".to_string(),
        _ => upper,
    }
}

/// Operating system family used by the OS filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum OsFamily {
    Rhel,
    Suse,
    Ubuntu,
    Solaris,
    Aix,
    #[value(name = "windows-server", alias = "windows")]
    WindowsServer,
    Centos,
    Other,
}

static FAMILY_PATTERNS: LazyLock<Vec<(OsFamily, Regex)>> = LazyLock::new(|| {
    [
        (OsFamily::Centos, r"(?i)cent\s*os"),
        (OsFamily::Rhel, r"(?i)\brhel\b|red\s*hat"),
        (OsFamily::Suse, r"(?i)suse|\bsles\b"),
        (OsFamily::Ubuntu, r"(?i)ubuntu"),
        (OsFamily::Solaris, r"(?i)solaris|sunos"),
        (OsFamily::Aix, r"(?i)\baix\b"),
        (OsFamily::WindowsServer, r"(?i)windows"),
    ]
    .into_iter()
    .map(|(family, pattern)| (family, Regex::new(pattern).expect("static regex")))
    .collect()
});

impl OsFamily {
    /// Detect the family of a free-text OS name. Blank and unrecognised
    /// names are `Other`.
    #[must_use]
    pub fn detect(os_name: &str) -> Self {
        let trimmed = os_name.trim();
        if trimmed.is_empty() {
            return Self::Other;
        }
        FAMILY_PATTERNS
            .iter()
            .find(|(_, re)| re.is_match(trimmed))
            .map_or(Self::Other, |(family, _)| *family)
    }

    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rhel => "RHEL",
            Self::Suse => "SUSE",
            Self::Ubuntu => "Ubuntu",
            Self::Solaris => "Solaris",
            Self::Aix => "AIX",
            Self::WindowsServer => "Windows Server",
            Self::Centos => "CentOS",
            Self::Other => "Other",
        }
    }

    /// All families in picklist order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Rhel,
            Self::Suse,
            Self::Ubuntu,
            Self::Solaris,
            Self::Aix,
            Self::WindowsServer,
            Self::Centos,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
