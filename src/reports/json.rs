//! JSON report generator.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::filter::FilterCriteria;
use crate::kpi::{Breakdown, Kpis};
use crate::model::InventoryRecord;
use crate::pipeline::Snapshot;
use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Whether to pretty-print JSON output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact JSON reporter
    #[must_use]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: JsonMetadata<'a>,
    filter: &'a FilterCriteria,
    kpis: &'a Kpis,
    inventory_kpis: &'a Kpis,
    breakdowns: Vec<Breakdown>,
    rows: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonMetadata<'a> {
    tool: &'static str,
    version: &'static str,
    generated_at: String,
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_reason: Option<&'a str>,
    today: NaiveDate,
    nearing_days: u32,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(flatten)]
    record: &'a InventoryRecord,
    days_until_eosl: Option<i64>,
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, snapshot: &Snapshot) -> Result<String, ReportError> {
        let report = JsonReport {
            metadata: JsonMetadata {
                tool: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
                generated_at: Utc::now().to_rfc3339(),
                source: &snapshot.source,
                fallback_reason: snapshot.fallback_reason.as_deref(),
                today: snapshot.today,
                nearing_days: snapshot.nearing_days,
            },
            filter: &snapshot.criteria,
            kpis: &snapshot.kpis,
            inventory_kpis: &snapshot.inventory_kpis,
            breakdowns: vec![
                Breakdown::by_environment(snapshot.filtered()),
                Breakdown::by_model(snapshot.filtered(), 10),
                Breakdown::by_os_family(snapshot.filtered()),
            ],
            rows: snapshot
                .filtered()
                .map(|record| JsonRow {
                    record,
                    days_until_eosl: record.days_until_eosl(snapshot.today),
                })
                .collect(),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
