//! Derived risk classifications attached to each inventory row.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// End-of-service-life status of a server.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum EoslStatus {
    /// EOSL date is in the past
    Expired,
    /// EOSL date falls inside the nearing window
    Nearing,
    /// EOSL date is beyond the nearing window
    Supported,
    /// EOSL date missing or unparseable
    #[default]
    Unknown,
}

impl EoslStatus {
    /// Upper-case label used in tables, exports and tickets.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Expired => "EXPIRED",
            Self::Nearing => "NEARING",
            Self::Supported => "SUPPORTED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Get icon for TUI display
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Expired => "⛔",
            Self::Nearing => "⚠",
            Self::Supported => "✓",
            Self::Unknown => "?",
        }
    }

    /// Severity weight (higher = worse). Unknown ranks above supported.
    #[must_use]
    pub const fn severity(&self) -> u8 {
        match self {
            Self::Supported => 0,
            Self::Unknown => 1,
            Self::Nearing => 2,
            Self::Expired => 3,
        }
    }

    /// Whether the row needs operator attention.
    #[must_use]
    pub const fn needs_attention(&self) -> bool {
        matches!(self, Self::Expired | Self::Nearing)
    }

    /// All statuses in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Expired, Self::Nearing, Self::Supported, Self::Unknown]
    }

    /// Parse a label case-insensitively (`"expired"`, `"NEARING"`, ...).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "EXPIRED" => Some(Self::Expired),
            "NEARING" => Some(Self::Nearing),
            "SUPPORTED" => Some(Self::Supported),
            "UNKNOWN" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for EoslStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Firmware and microcode completeness for a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareFlags {
    pub missing_firmware: bool,
    pub missing_microcode: bool,
}

impl FirmwareFlags {
    /// True when either version field is empty.
    #[must_use]
    pub const fn is_incomplete(&self) -> bool {
        self.missing_firmware || self.missing_microcode
    }

    /// True when both version fields are populated.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !self.is_incomplete()
    }

    /// Short description of what is missing, if anything.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match (self.missing_firmware, self.missing_microcode) {
            (true, true) => "firmware+microcode missing",
            (true, false) => "firmware missing",
            (false, true) => "microcode missing",
            (false, false) => "complete",
        }
    }
}
