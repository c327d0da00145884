//! Summary and table reports for shell output.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::kpi::Breakdown;
use crate::model::EoslStatus;
use crate::pipeline::Snapshot;
use unicode_width::UnicodeWidthChar;

/// Number of at-risk hosts listed in the summary.
const SUMMARY_RISK_ROWS: usize = 10;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn status_color(status: EoslStatus) -> &'static str {
    match status {
        EoslStatus::Expired => "red",
        EoslStatus::Nearing => "yellow",
        EoslStatus::Supported => "green",
        EoslStatus::Unknown => "dim",
    }
}

/// Truncate to a display width, marking the cut with `...`.
#[must_use]
pub fn truncate(s: &str, max: usize) -> String {
    let width: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max > 3 {
        out.push_str("...");
    }
    out
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn breakdown_lines(&self, breakdown: &Breakdown, lines: &mut Vec<String>) {
        if breakdown.is_empty() {
            return;
        }
        lines.push(String::new());
        lines.push(self.color(&format!("{}:", breakdown.title), "bold"));
        for (label, count) in &breakdown.entries {
            lines.push(format!("  {:<28} {count}", truncate(label, 28)));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, snapshot: &Snapshot) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let kpis = &snapshot.kpis;

        lines.push(self.color("Server Inventory - EOSL Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!("{}  {}", self.color("Source:", "cyan"), snapshot.source));
        if let Some(reason) = &snapshot.fallback_reason {
            lines.push(format!("{}  {reason}", self.color("Warning:", "yellow")));
        }
        lines.push(format!(
            "{}  {} (nearing window {} days)",
            self.color("As of:", "cyan"),
            snapshot.today,
            snapshot.nearing_days
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Filter:", "cyan"),
            snapshot.criteria.description()
        ));
        lines.push(String::new());

        lines.push(format!(
            "{} {} of {} servers",
            self.color("Rows:", "bold"),
            kpis.total,
            snapshot.records.len()
        ));
        for status in EoslStatus::all() {
            lines.push(format!(
                "  {} {}",
                self.color(&format!("{:<10}", status.label()), status_color(*status)),
                kpis.count(*status)
            ));
        }
        lines.push(format!(
            "  {:<10} {}",
            "NO FW/MC",
            kpis.missing_firmware
        ));
        lines.push(format!("  {:<10} {}%", "% EXPIRED", kpis.pct_expired));

        let at_risk: Vec<_> = snapshot
            .filtered()
            .filter(|r| r.status.needs_attention())
            .collect();
        if !at_risk.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Needs attention:", "bold"));
            for record in at_risk.iter().take(SUMMARY_RISK_ROWS) {
                let days = record
                    .days_until_eosl(snapshot.today)
                    .map_or_else(String::new, |d| format!("{d:>6}d"));
                lines.push(format!(
                    "  {} {:<20} {:<24} {days}",
                    self.color(&format!("{:<9}", record.status.label()), status_color(record.status)),
                    truncate(&record.hostname, 20),
                    truncate(&record.owner_team(), 24),
                ));
            }
            if at_risk.len() > SUMMARY_RISK_ROWS {
                lines.push(self.color(
                    &format!("  ... and {} more", at_risk.len() - SUMMARY_RISK_ROWS),
                    "dim",
                ));
            }
        }

        self.breakdown_lines(&Breakdown::by_environment(snapshot.filtered()), &mut lines);
        self.breakdown_lines(&Breakdown::by_model(snapshot.filtered(), 10), &mut lines);

        lines.push(String::new());
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Table reporter: one line per filtered row
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate(&self, snapshot: &Snapshot) -> Result<String, ReportError> {
        let rows: Vec<_> = snapshot.filtered().collect();
        let mut lines = Vec::new();

        if rows.is_empty() {
            lines.push(format!("0 servers match: {}", snapshot.criteria.description()));
            lines.push(String::new());
            return Ok(lines.join("\n"));
        }

        let host_w = rows
            .iter()
            .map(|r| r.hostname.len())
            .max()
            .unwrap_or(8)
            .clamp(8, 30);
        let model_w = rows
            .iter()
            .map(|r| r.vendor_model().len())
            .max()
            .unwrap_or(12)
            .clamp(12, 28);
        let os_w = rows
            .iter()
            .map(|r| r.os_display().len())
            .max()
            .unwrap_or(2)
            .clamp(2, 22);

        lines.push(self.color(
            &format!(
                "{:<9}  {:<host_w$}  {:<model_w$}  {:<os_w$}  {:<11}  {:>6}  {:<6}  {}",
                "STATUS", "HOSTNAME", "VENDOR/MODEL", "OS", "EOSL", "DAYS", "FW/MC", "OWNER"
            ),
            "bold",
        ));
        lines.push("─".repeat(9 + host_w + model_w + os_w + 11 + 6 + 6 + 20 + 14));

        for record in &rows {
            let days = record
                .days_until_eosl(snapshot.today)
                .map_or_else(|| "-".to_string(), |d| d.to_string());
            let eosl = record
                .eosl_date
                .map_or_else(|| truncate(&record.eosl_date_raw, 11), |d| d.to_string());
            let fw = if record.firmware.is_complete() { "ok" } else { "GAP" };
            lines.push(format!(
                "{}  {:<host_w$}  {:<model_w$}  {:<os_w$}  {:<11}  {:>6}  {}  {}",
                self.color(&format!("{:<9}", record.status.label()), status_color(record.status)),
                truncate(&record.hostname, host_w),
                truncate(&record.vendor_model(), model_w),
                truncate(&record.os_display(), os_w),
                eosl,
                days,
                self.color(&format!("{fw:<6}"), if fw == "ok" { "dim" } else { "yellow" }),
                record.owner_team(),
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "{} of {} servers ({})",
            rows.len(),
            snapshot.records.len(),
            snapshot.criteria.description()
        ));
        lines.push(String::new());
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}
