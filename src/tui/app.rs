//! Dashboard application state.
//!
//! `DashboardApp` holds the current [`Snapshot`] and everything the
//! operator can change from the keyboard. Each filter change reruns the
//! filter and KPI stages; each action writes through the same handlers
//! the CLI uses and reports its outcome on the status bar.

use super::clipboard::copy_to_clipboard;
use super::export::export_visible;
use super::state::{ListNavigation, ListState};
use super::status::{StatusMessage, STATUS_TIMEOUT};
use super::theme::toggle_theme;
use crate::actions::{contact_owner, mark_intimated, mark_intimated_bulk};
use crate::changelog::ChangeLogStore;
use crate::config::{ViewConfig, NEARING_DAYS_RANGE};
use crate::filter::{environment_options, vendor_options, FilterCriteria};
use crate::kpi::Breakdown;
use crate::loader::load_or_sample;
use crate::model::{ChangeLogEntry, EoslStatus, InventoryRecord, OsFamily};
use crate::pipeline::{PipelineConfig, Snapshot};
use crate::reports::ExportKind;
use std::path::PathBuf;

/// Days added or removed by one nearing-window adjustment.
pub const NEARING_STEP_DAYS: u32 = 30;

/// Breakdown shown in the chart panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BreakdownKind {
    #[default]
    Model,
    Environment,
    OsFamily,
}

impl BreakdownKind {
    pub const fn next(self) -> Self {
        match self {
            Self::Model => Self::Environment,
            Self::Environment => Self::OsFamily,
            Self::OsFamily => Self::Model,
        }
    }
}

/// Owner search input.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
    /// Owner filter in force when the search opened, restored on cancel
    previous: Option<String>,
}

/// Rows a mark-intimated note applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteScope {
    #[default]
    Selected,
    Visible,
}

/// Operator note typed before marking rows intimated.
#[derive(Debug, Clone, Default)]
pub struct NotePrompt {
    pub active: bool,
    pub scope: NoteScope,
    pub input: String,
}

/// Overlay visibility.
#[derive(Debug, Clone, Default)]
pub struct Overlays {
    pub show_help: bool,
    pub search: SearchState,
    pub note: NotePrompt,
}

/// Interactive dashboard state.
pub struct DashboardApp {
    pub snapshot: Snapshot,
    inventory: Option<PathBuf>,
    pub change_log: ChangeLogStore,
    pub actor: String,
    export_dir: PathBuf,
    pub table: ListState,
    pub overlays: Overlays,
    pub status: StatusMessage,
    pub breakdown: BreakdownKind,
    top_models: usize,
    recent_limit: usize,
    /// Newest change log entries, refreshed after every write
    pub recent_log: Vec<ChangeLogEntry>,
    /// Latest change log entry for the selected row
    pub selected_last_action: Option<ChangeLogEntry>,
    pub tick_rate_ms: u64,
    pub should_quit: bool,
}

impl DashboardApp {
    /// Build the dashboard over an already computed snapshot.
    pub fn new(snapshot: Snapshot, config: &ViewConfig) -> Self {
        let mut app = Self {
            table: ListState::with_total(snapshot.visible_count()),
            snapshot,
            inventory: config.pipeline.inventory.clone(),
            change_log: ChangeLogStore::open(&config.change_log.path),
            actor: config.change_log.actor.clone(),
            export_dir: config.output.export_dir.clone(),
            overlays: Overlays::default(),
            status: StatusMessage::with_auto_clear(STATUS_TIMEOUT),
            breakdown: BreakdownKind::default(),
            top_models: config.tui.top_models,
            recent_limit: config.tui.recent_log_entries,
            recent_log: Vec::new(),
            selected_last_action: None,
            tick_rate_ms: config.tui.tick_rate_ms,
            should_quit: false,
        };
        if let Some(reason) = app.snapshot.fallback_reason.clone() {
            app.status.set_error(format!("Showing bundled sample: {reason}"));
        }
        app.refresh_activity();
        app
    }

    /// Pipeline inputs matching the current dashboard state.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            inventory: self.inventory.clone(),
            nearing_days: self.snapshot.nearing_days,
            today: Some(self.snapshot.today),
            criteria: self.snapshot.criteria.clone(),
        }
    }

    /// Row under the cursor.
    pub fn selected_record(&self) -> Option<&InventoryRecord> {
        self.snapshot.visible_row(self.table.selected())
    }

    /// Breakdown for the chart panel, over the visible rows.
    pub fn current_breakdown(&self) -> Breakdown {
        match self.breakdown {
            BreakdownKind::Model => Breakdown::by_model(self.snapshot.filtered(), self.top_models),
            BreakdownKind::Environment => Breakdown::by_environment(self.snapshot.filtered()),
            BreakdownKind::OsFamily => Breakdown::by_os_family(self.snapshot.filtered()),
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn select_next(&mut self) {
        self.table.select_next();
        self.refresh_selected_action();
    }

    pub fn select_prev(&mut self) {
        self.table.select_prev();
        self.refresh_selected_action();
    }

    pub fn page_down(&mut self) {
        self.table.page_down();
        self.refresh_selected_action();
    }

    pub fn page_up(&mut self) {
        self.table.page_up();
        self.refresh_selected_action();
    }

    pub fn go_first(&mut self) {
        self.table.go_first();
        self.refresh_selected_action();
    }

    pub fn go_last(&mut self) {
        self.table.go_last();
        self.refresh_selected_action();
    }

    pub fn cycle_breakdown(&mut self) {
        self.breakdown = self.breakdown.next();
    }

    pub fn toggle_help(&mut self) {
        self.overlays.show_help = !self.overlays.show_help;
    }

    pub fn toggle_theme(&mut self) {
        let name = toggle_theme();
        self.status.set(format!("Theme: {name}"));
    }

    // ========================================================================
    // Filters
    // ========================================================================

    fn apply_criteria(&mut self, criteria: FilterCriteria) {
        self.snapshot.set_criteria(criteria);
        self.after_recompute();
    }

    fn after_recompute(&mut self) {
        self.table.resize(self.snapshot.visible_count());
        self.refresh_selected_action();
    }

    /// Status filter: all → EXPIRED → NEARING → SUPPORTED → UNKNOWN → all.
    pub fn cycle_status_filter(&mut self) {
        let statuses = EoslStatus::all();
        let next = match self.snapshot.criteria.status {
            None => statuses.first().copied(),
            Some(current) => statuses
                .iter()
                .position(|s| *s == current)
                .and_then(|i| statuses.get(i + 1))
                .copied(),
        };
        let mut criteria = self.snapshot.criteria.clone();
        criteria.status = next;
        self.apply_criteria(criteria);
        self.status.set(format!(
            "Status filter: {}",
            next.map_or("all", |s| s.label())
        ));
    }

    /// Vendor filter: all → each vendor present in the inventory → all.
    pub fn cycle_vendor_filter(&mut self) {
        let options = vendor_options(&self.snapshot.records);
        let next = next_option(&options, &self.snapshot.criteria.vendors);
        let mut criteria = self.snapshot.criteria.clone();
        criteria.vendors = next.iter().cloned().collect();
        self.apply_criteria(criteria);
        self.status.set(format!(
            "Vendor filter: {}",
            next.as_deref().unwrap_or("all")
        ));
    }

    /// Environment filter: all → each environment present → all.
    pub fn cycle_environment_filter(&mut self) {
        let options = environment_options(&self.snapshot.records);
        let next = next_option(&options, &self.snapshot.criteria.environments);
        let mut criteria = self.snapshot.criteria.clone();
        criteria.environments = next.iter().cloned().collect();
        self.apply_criteria(criteria);
        self.status.set(format!(
            "Environment filter: {}",
            next.as_deref().unwrap_or("all")
        ));
    }

    /// OS family filter: all → each family → all.
    pub fn cycle_os_family_filter(&mut self) {
        let families = OsFamily::all();
        let current = self.snapshot.criteria.os_families.first().copied();
        let next = match current {
            None => families.first().copied(),
            Some(family) => families
                .iter()
                .position(|f| *f == family)
                .and_then(|i| families.get(i + 1))
                .copied(),
        };
        let mut criteria = self.snapshot.criteria.clone();
        criteria.os_families = next.into_iter().collect();
        self.apply_criteria(criteria);
        self.status.set(format!(
            "OS filter: {}",
            next.map_or("all", |f| f.label())
        ));
    }

    pub fn toggle_missing_firmware(&mut self) {
        let criteria = self
            .snapshot
            .criteria
            .clone()
            .missing_firmware_only(!self.snapshot.criteria.missing_firmware_only);
        let enabled = criteria.missing_firmware_only;
        self.apply_criteria(criteria);
        self.status.set(if enabled {
            "Showing rows missing firmware or microcode"
        } else {
            "Firmware filter off"
        });
    }

    pub fn clear_filters(&mut self) {
        self.apply_criteria(FilterCriteria::new());
        self.status.set("Filters cleared");
    }

    /// Widen or narrow the nearing window, staying within the valid range.
    pub fn adjust_nearing_days(&mut self, widen: bool) {
        let current = self.snapshot.nearing_days;
        let next = if widen {
            current.saturating_add(NEARING_STEP_DAYS)
        } else {
            current.saturating_sub(NEARING_STEP_DAYS)
        }
        .clamp(*NEARING_DAYS_RANGE.start(), *NEARING_DAYS_RANGE.end());
        if next == current {
            return;
        }
        self.snapshot.set_nearing_days(next);
        self.after_recompute();
        self.status.set(format!("Nearing window: {next} days"));
    }

    // ========================================================================
    // Owner search
    // ========================================================================

    pub fn start_search(&mut self) {
        let previous = self.snapshot.criteria.owner.clone();
        self.overlays.search = SearchState {
            active: true,
            query: previous.clone().unwrap_or_default(),
            previous,
        };
    }

    pub fn search_push(&mut self, c: char) {
        self.overlays.search.query.push(c);
        self.apply_owner_query();
    }

    pub fn search_pop(&mut self) {
        self.overlays.search.query.pop();
        self.apply_owner_query();
    }

    /// Keep the typed owner filter.
    pub fn confirm_search(&mut self) {
        self.overlays.search.active = false;
        let query = self.overlays.search.query.trim();
        if query.is_empty() {
            self.status.set("Owner filter cleared");
        } else {
            self.status.set(format!("Owner filter: {query}"));
        }
    }

    /// Drop the typed query and restore the previous owner filter.
    pub fn cancel_search(&mut self) {
        let previous = self.overlays.search.previous.take();
        self.overlays.search = SearchState::default();
        let mut criteria = self.snapshot.criteria.clone();
        criteria.owner = previous;
        self.apply_criteria(criteria);
    }

    fn apply_owner_query(&mut self) {
        let query = self.overlays.search.query.trim();
        let mut criteria = self.snapshot.criteria.clone();
        criteria.owner = (!query.is_empty()).then(|| query.to_string());
        self.apply_criteria(criteria);
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Open the note prompt for the selected row or every visible row.
    pub fn start_note(&mut self, scope: NoteScope) {
        let available = match scope {
            NoteScope::Selected => self.selected_record().is_some(),
            NoteScope::Visible => self.snapshot.visible_count() > 0,
        };
        if !available {
            self.status.set_error(match scope {
                NoteScope::Selected => "No row selected",
                NoteScope::Visible => "No rows match the current filter",
            });
            return;
        }
        self.overlays.note = NotePrompt {
            active: true,
            scope,
            input: String::new(),
        };
    }

    pub fn note_push(&mut self, c: char) {
        self.overlays.note.input.push(c);
    }

    pub fn note_pop(&mut self) {
        self.overlays.note.input.pop();
    }

    /// Record the typed note. A blank note records the generated default.
    pub fn confirm_note(&mut self) {
        let prompt = std::mem::take(&mut self.overlays.note);
        let note = prompt.input.trim();
        let note = (!note.is_empty()).then_some(note);
        match prompt.scope {
            NoteScope::Selected => self.intimate_selected(note),
            NoteScope::Visible => self.intimate_visible(note),
        }
    }

    pub fn cancel_note(&mut self) {
        self.overlays.note = NotePrompt::default();
        self.status.set("Mark intimated cancelled");
    }

    /// Mark the selected row intimated.
    pub fn intimate_selected(&mut self, note: Option<&str>) {
        let Some(record) = self.selected_record().cloned() else {
            self.status.set_error("No row selected");
            return;
        };
        match mark_intimated(&self.change_log, &record, &self.actor, note) {
            Ok(entry) => self
                .status
                .set(format!("Marked {} intimated: {}", entry.hostname, entry.note)),
            Err(e) => self
                .status
                .set_error(format!("Change log write failed: {}", e.full_message())),
        }
        self.refresh_activity();
    }

    /// Mark every visible row intimated.
    pub fn intimate_visible(&mut self, note: Option<&str>) {
        if self.snapshot.visible_count() == 0 {
            self.status.set_error("No rows match the current filter");
            return;
        }
        match mark_intimated_bulk(&self.change_log, self.snapshot.filtered(), &self.actor, note) {
            Ok(written) => self.status.set(format!("Marked {written} row(s) intimated")),
            Err(e) => self.status.set_error(format!(
                "Change log write failed after {} of {} row(s): {}",
                e.written,
                e.attempted,
                e.source.full_message()
            )),
        }
        self.refresh_activity();
    }

    /// Build the owner mail link for the selected row and copy it.
    pub fn contact_selected(&mut self) {
        let Some(record) = self.selected_record() else {
            self.status.set_error("No row selected");
            return;
        };
        let Some(link) = contact_owner(record, &self.actor) else {
            let hostname = record.hostname.clone();
            self.status
                .set_error(format!("{hostname} has no owner or owner email"));
            return;
        };
        match copy_to_clipboard(&link.url) {
            Some(_) => self
                .status
                .set(format!("Mail link for {} copied to clipboard", link.recipient)),
            None => self.status.set(format!("Mail link: {}", link.url)),
        }
    }

    /// Copy the selected hostname.
    pub fn copy_hostname(&mut self) {
        let Some(hostname) = self.selected_record().map(|r| r.hostname.clone()) else {
            return;
        };
        if copy_to_clipboard(&hostname).is_some() {
            self.status.set(format!("Copied {hostname}"));
        } else {
            self.status.set_error("No clipboard tool available");
        }
    }

    /// Export the visible rows to a timestamped CSV.
    pub fn export(&mut self, kind: ExportKind) {
        match export_visible(kind, &self.snapshot, &self.export_dir) {
            Ok(result) => self.status.set(result.message(kind)),
            Err(e) => self
                .status
                .set_error(format!("Export failed: {}", e.full_message())),
        }
    }

    /// Reload the inventory file, keeping filters and the nearing window.
    pub fn reload(&mut self) {
        match load_or_sample(self.inventory.as_deref()) {
            Ok(outcome) => {
                self.snapshot.replace_records(outcome);
                self.after_recompute();
                match self.snapshot.fallback_reason.clone() {
                    Some(reason) => self
                        .status
                        .set_error(format!("Showing bundled sample: {reason}")),
                    None => self.status.set(format!(
                        "Reloaded {} row(s) from {}",
                        self.snapshot.records.len(),
                        self.snapshot.source
                    )),
                }
            }
            Err(e) => self
                .status
                .set_error(format!("Reload failed: {}", e.full_message())),
        }
        self.refresh_activity();
    }

    // ========================================================================
    // Change log views
    // ========================================================================

    fn refresh_activity(&mut self) {
        match self.change_log.recent(self.recent_limit) {
            Ok(entries) => self.recent_log = entries,
            Err(e) => {
                self.recent_log.clear();
                self.status
                    .set_error(format!("Cannot read change log: {}", e.full_message()));
            }
        }
        self.refresh_selected_action();
    }

    fn refresh_selected_action(&mut self) {
        self.selected_last_action = self
            .selected_record()
            .map(|r| r.hostname.clone())
            .and_then(|hostname| self.change_log.last_for_host(&hostname).ok().flatten());
    }
}

/// Next single-value selection when cycling through `options`.
fn next_option(options: &[String], current: &[String]) -> Option<String> {
    match current {
        [] => options.first().cloned(),
        [only] => options
            .iter()
            .position(|o| o.eq_ignore_ascii_case(only))
            .and_then(|i| options.get(i + 1))
            .cloned(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChangeLogConfig, OutputConfig, TuiConfig};
    use crate::model::ActionKind;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> DashboardApp {
        let config = ViewConfig {
            pipeline: PipelineConfig {
                today: NaiveDate::from_ymd_opt(2025, 1, 1),
                ..Default::default()
            },
            output: OutputConfig {
                export_dir: dir.path().to_path_buf(),
                ..Default::default()
            },
            change_log: ChangeLogConfig {
                path: dir.path().join("change_log.csv"),
                actor: "tester".to_string(),
            },
            tui: TuiConfig::default(),
        };
        let snapshot = crate::pipeline::run(&config.pipeline).unwrap();
        DashboardApp::new(snapshot, &config)
    }

    #[test]
    fn test_status_filter_cycles_back_to_all() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        assert_eq!(app.table.total, 8);

        app.cycle_status_filter();
        assert_eq!(app.snapshot.criteria.status, Some(EoslStatus::Expired));
        assert_eq!(app.table.total, 4);

        for _ in 0..4 {
            app.cycle_status_filter();
        }
        assert_eq!(app.snapshot.criteria.status, None);
        assert_eq!(app.table.total, 8);
    }

    #[test]
    fn test_selection_clamped_after_filter() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.go_last();
        assert_eq!(app.table.selected, 7);
        app.cycle_environment_filter();
        assert!(app.table.selected < app.table.total.max(1));
        assert!(app.selected_record().is_some());
    }

    #[test]
    fn test_intimate_selected_writes_and_refreshes() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        let host = app.selected_record().unwrap().hostname.clone();

        app.intimate_selected(None);

        assert_eq!(app.recent_log.len(), 1);
        assert_eq!(app.recent_log[0].hostname, host);
        assert_eq!(app.recent_log[0].action, ActionKind::Intimated);
        assert_eq!(app.recent_log[0].actor, "tester");
        assert_eq!(
            app.selected_last_action.as_ref().map(|e| e.hostname.as_str()),
            Some(host.as_str())
        );
        assert!(!app.status.is_error());
    }

    #[test]
    fn test_intimate_visible_respects_filter() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.cycle_status_filter(); // EXPIRED
        app.intimate_visible(None);
        let entries = app.change_log.read_all().unwrap();
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_intimate_failure_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.change_log = ChangeLogStore::open(dir.path().join("missing").join("log.csv"));
        app.intimate_selected(None);
        assert!(app.status.is_error());
        assert!(app.status.peek().unwrap().starts_with("Change log write failed"));
        assert_eq!(app.snapshot.records.len(), 8);
    }

    #[test]
    fn test_note_prompt_records_typed_note() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        let host = app.selected_record().unwrap().hostname.clone();

        app.start_note(NoteScope::Selected);
        assert!(app.overlays.note.active);
        for c in "called ownerx".chars() {
            app.note_push(c);
        }
        app.note_pop();
        app.confirm_note();

        assert!(!app.overlays.note.active);
        let entries = app.change_log.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hostname, host);
        assert_eq!(entries[0].note, "called owner");
    }

    #[test]
    fn test_blank_note_uses_default_for_visible_rows() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.cycle_status_filter(); // EXPIRED
        app.start_note(NoteScope::Visible);
        app.confirm_note();
        let entries = app.change_log.read_all().unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| e.note.starts_with("Bulk intimated")));
    }

    #[test]
    fn test_cancelled_note_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.start_note(NoteScope::Selected);
        app.note_push('x');
        app.cancel_note();
        assert!(!app.overlays.note.active);
        assert!(app.change_log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_note_prompt_needs_visible_rows() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.start_search();
        for c in "nobody-at-all".chars() {
            app.search_push(c);
        }
        app.confirm_search();
        app.start_note(NoteScope::Visible);
        assert!(!app.overlays.note.active);
        assert!(app.status.is_error());
    }

    #[test]
    fn test_owner_search_and_cancel() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.start_search();
        for c in "ali".chars() {
            app.search_push(c);
        }
        assert_eq!(app.table.total, 1);
        app.cancel_search();
        assert_eq!(app.snapshot.criteria.owner, None);
        assert_eq!(app.table.total, 8);

        app.start_search();
        app.search_push('b');
        app.search_push('o');
        app.confirm_search();
        assert!(!app.overlays.search.active);
        assert_eq!(app.snapshot.criteria.owner.as_deref(), Some("bo"));
    }

    #[test]
    fn test_nearing_window_adjustment_is_clamped() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.adjust_nearing_days(false);
        app.adjust_nearing_days(false);
        app.adjust_nearing_days(false);
        assert_eq!(app.snapshot.nearing_days, 1);
        app.adjust_nearing_days(true);
        assert_eq!(app.snapshot.nearing_days, 31);
    }

    #[test]
    fn test_export_from_dashboard() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.export(ExportKind::Contacts);
        let msg = app.status.peek().unwrap().to_string();
        assert!(msg.starts_with("Exported 8"), "{msg}");
    }

    #[test]
    fn test_next_option() {
        let options = vec!["DELL".to_string(), "HPE".to_string()];
        assert_eq!(next_option(&options, &[]), Some("DELL".to_string()));
        assert_eq!(next_option(&options, &["dell".to_string()]), Some("HPE".to_string()));
        assert_eq!(next_option(&options, &["HPE".to_string()]), None);
    }
}
