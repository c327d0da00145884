//! Classified, filtered and aggregated inventory state.

use crate::classify::classify_records;
use crate::filter::FilterCriteria;
use crate::kpi::Kpis;
use crate::loader::LoadOutcome;
use crate::model::InventoryRecord;
use chrono::NaiveDate;

/// Result of one load → classify → filter → aggregate pass.
///
/// All rows are kept; `visible` indexes the rows that pass the current
/// criteria, in inventory order. Changing the criteria, the reference date
/// or the nearing window recomputes every derived value.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Description of where the rows came from
    pub source: String,
    /// Why a requested inventory file was replaced by the sample
    pub fallback_reason: Option<String>,
    pub today: NaiveDate,
    pub nearing_days: u32,
    /// Every loaded row, classified
    pub records: Vec<InventoryRecord>,
    pub criteria: FilterCriteria,
    /// Indices into `records` of the rows passing `criteria`
    pub visible: Vec<usize>,
    /// KPIs over the visible rows
    pub kpis: Kpis,
    /// KPIs over the whole inventory
    pub inventory_kpis: Kpis,
}

impl Snapshot {
    /// Build a snapshot from loader output.
    #[must_use]
    pub fn build(
        outcome: LoadOutcome,
        today: NaiveDate,
        nearing_days: u32,
        criteria: FilterCriteria,
    ) -> Self {
        let source = outcome.source_label();
        let fallback_reason = outcome.fallback_reason().map(str::to_string);
        let mut snapshot = Self::from_records(
            outcome.into_records(),
            source,
            today,
            nearing_days,
            criteria,
        );
        snapshot.fallback_reason = fallback_reason;
        snapshot
    }

    /// Build a snapshot from rows already in memory.
    #[must_use]
    pub fn from_records(
        records: Vec<InventoryRecord>,
        source: impl Into<String>,
        today: NaiveDate,
        nearing_days: u32,
        criteria: FilterCriteria,
    ) -> Self {
        let mut snapshot = Self {
            source: source.into(),
            fallback_reason: None,
            today,
            nearing_days,
            records,
            criteria,
            visible: Vec::new(),
            kpis: Kpis::default(),
            inventory_kpis: Kpis::default(),
        };
        snapshot.reclassify();
        snapshot
    }

    /// Visible rows in inventory order.
    pub fn filtered(&self) -> impl Iterator<Item = &InventoryRecord> + Clone + '_ {
        self.visible.iter().filter_map(move |&i| self.records.get(i))
    }

    /// Visible row at a table position.
    #[must_use]
    pub fn visible_row(&self, position: usize) -> Option<&InventoryRecord> {
        self.visible
            .get(position)
            .and_then(|&i| self.records.get(i))
    }

    /// Number of visible rows.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// First row with this hostname, visible or not.
    #[must_use]
    pub fn find(&self, hostname: &str) -> Option<&InventoryRecord> {
        self.records.iter().find(|r| r.hostname == hostname)
    }

    /// Replace the filter and recompute visible rows and KPIs.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    /// Change the nearing window and reclassify.
    pub fn set_nearing_days(&mut self, nearing_days: u32) {
        self.nearing_days = nearing_days;
        self.reclassify();
    }

    /// Change the reference date and reclassify.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
        self.reclassify();
    }

    /// Swap in freshly loaded rows, keeping criteria and window.
    pub fn replace_records(&mut self, outcome: LoadOutcome) {
        self.source = outcome.source_label();
        self.fallback_reason = outcome.fallback_reason().map(str::to_string);
        self.records = outcome.into_records();
        self.reclassify();
    }

    fn reclassify(&mut self) {
        classify_records(&mut self.records, self.today, self.nearing_days);
        self.inventory_kpis = Kpis::aggregate(&self.records);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.criteria.matches(r))
            .map(|(i, _)| i)
            .collect();
        self.kpis = Kpis::aggregate(self.filtered());
        tracing::debug!(
            "{} of {} row(s) match: {}",
            self.visible.len(),
            self.records.len(),
            self.criteria.description()
        );
    }
}
