//! Audit trail entries.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Actor recorded when the operator does not give a name.
pub const DEFAULT_ACTOR: &str = "operator";

/// Action recorded in the change log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    /// Owner has been notified of the EOSL risk
    Intimated,
    /// Any other action written by another tool
    Other(String),
}

impl ActionKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Intimated => "intimated",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ActionKind {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case("intimated") {
            Self::Intimated
        } else {
            Self::Other(s)
        }
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the change log. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<FixedOffset>,
    pub hostname: String,
    pub action: ActionKind,
    #[serde(default, alias = "details")]
    pub note: String,
    #[serde(default)]
    pub actor: String,
}

impl ChangeLogEntry {
    /// Create an entry stamped with the current local time.
    pub fn now(
        hostname: impl Into<String>,
        action: ActionKind,
        actor: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Local::now().fixed_offset(),
            hostname: hostname.into(),
            action,
            note: note.into(),
            actor: actor.into(),
        }
    }
}

/// Accept RFC 3339 timestamps and zone-less ISO timestamps (read as UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

/// Parse a change log timestamp.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
}
