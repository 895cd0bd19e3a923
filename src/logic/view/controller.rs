//! View Controller - client-side filter, sort & summary over the risk table
//!
//! Synchronous and DOM-free: the host hands in rows and control values,
//! reads back visibility, order, rank labels and counter texts.

use std::time::{Duration, Instant};

use super::counter::CounterBoard;
use super::filter;
use super::sort::{self, SortState};
use super::types::{FilterControls, FilterCriteria, LevelCounts, SortColumn, TableRow, ViewSummary};
use crate::logic::markup::navigation_url;

pub struct ViewController {
    rows: Vec<TableRow>,
    controls: FilterControls,
    criteria: FilterCriteria,
    sort: SortState,
    counters: CounterBoard,
    counts: LevelCounts,
    empty_state_visible: bool,
}

impl ViewController {
    pub fn new(rows: Vec<TableRow>, counter_duration: Duration) -> Self {
        Self::with_counters(rows, CounterBoard::new(counter_duration))
    }

    pub fn with_counters(rows: Vec<TableRow>, counters: CounterBoard) -> Self {
        let visible = rows.iter().filter(|r| r.visible).count();
        Self {
            rows,
            controls: FilterControls::default(),
            criteria: FilterCriteria::default(),
            sort: SortState::default(),
            counters,
            counts: LevelCounts::default(),
            empty_state_visible: visible == 0,
        }
    }

    // ========================================================================
    // FILTERING
    // ========================================================================

    /// Recompute visibility, empty state and counters for `criteria`
    pub fn apply_filters(&mut self, criteria: &FilterCriteria, now: Instant) -> ViewSummary {
        let visible = filter::apply(&mut self.rows, criteria);
        self.criteria = criteria.clone();
        self.empty_state_visible = visible == 0;

        log::debug!("Filters applied: {} of {} rows visible", visible, self.rows.len());

        let counts = self.update_counts(now);
        ViewSummary {
            visible,
            counts,
            empty_state_visible: self.empty_state_visible,
        }
    }

    /// Replace the control values and re-filter
    pub fn apply_controls(&mut self, controls: FilterControls, now: Instant) -> ViewSummary {
        self.controls = controls;
        let criteria = self.controls.criteria();
        self.apply_filters(&criteria, now)
    }

    /// Update only the free-text box value; does not re-filter
    pub fn set_query_text(&mut self, text: Option<String>) {
        self.controls.query = text;
    }

    /// Re-filter from the current control values
    pub fn refresh(&mut self, now: Instant) -> ViewSummary {
        let criteria = self.controls.criteria();
        self.apply_filters(&criteria, now)
    }

    /// Count visible rows and start the counters towards the new totals
    pub fn update_counts(&mut self, now: Instant) -> LevelCounts {
        self.counts = filter::count_visible(&self.rows);
        self.counters.retarget(&self.counts, now);
        self.counts
    }

    // ========================================================================
    // SORTING
    // ========================================================================

    /// Header click on `column`
    pub fn sort_by(&mut self, column: SortColumn) -> SortState {
        let ascending = self.sort.click(column);
        sort::sort_rows(&mut self.rows, column, ascending);
        sort::rerank(&mut self.rows);
        log::debug!("Sorted by {:?} (ascending: {})", column, ascending);
        self.sort
    }

    /// Header click by `data-col` name; unknown columns are ignored
    pub fn sort_by_name(&mut self, column: &str) -> Option<SortState> {
        SortColumn::from_name(column).map(|c| self.sort_by(c))
    }

    // ========================================================================
    // FRAMES & NAVIGATION
    // ========================================================================

    /// One animation frame; true while counters are still moving
    pub fn tick(&mut self, now: Instant) -> bool {
        self.counters.tick(now)
    }

    /// Navigation target for the row at `index`
    pub fn activate_row(&self, index: usize, risk_url: &str) -> Option<String> {
        let id = self.rows.get(index)?.customer_id.as_deref()?;
        Some(navigation_url(risk_url, id))
    }

    // ========================================================================
    // READ-ONLY VIEW
    // ========================================================================

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|r| r.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().count()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn controls(&self) -> &FilterControls {
        &self.controls
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn counts(&self) -> LevelCounts {
        self.counts
    }

    pub fn counters(&self) -> &CounterBoard {
        &self.counters
    }

    pub fn empty_state_visible(&self) -> bool {
        self.empty_state_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::record::{RiskLevel, RiskRecord};
    use crate::logic::view::types::ActiveFlag;

    const DURATION: Duration = Duration::from_millis(300);

    fn record(i: usize, level: RiskLevel, score: f64, balance: f64) -> RiskRecord {
        RiskRecord {
            customer_id: format!("C-{}", 100 + i),
            surname: format!("Customer{}", i),
            geography: if i % 2 == 0 { "France" } else { "Spain" }.to_string(),
            gender: "Male".to_string(),
            risk_score: score,
            risk_level: level,
            balance,
            is_active: i % 3 != 0,
        }
    }

    /// 10 rows, 3 of them high risk
    fn ten_rows() -> Vec<TableRow> {
        let levels = [
            (RiskLevel::High, 91.0),
            (RiskLevel::Low, 12.0),
            (RiskLevel::Medium, 45.0),
            (RiskLevel::Low, 20.0),
            (RiskLevel::High, 75.5),
            (RiskLevel::Medium, 52.0),
            (RiskLevel::Low, 8.0),
            (RiskLevel::High, 88.0),
            (RiskLevel::Low, 30.0),
            (RiskLevel::Medium, 61.0),
        ];
        levels
            .iter()
            .enumerate()
            .map(|(i, (level, score))| TableRow::from_record(&record(i, *level, *score, 1000.0 * (i as f64 + 1.0))))
            .collect()
    }

    #[test]
    fn test_high_filter_counts_three() {
        let t0 = Instant::now();
        let mut view = ViewController::new(ten_rows(), DURATION);

        let criteria = FilterCriteria { risk_level: Some(RiskLevel::High), ..Default::default() };
        let summary = view.apply_filters(&criteria, t0);
        assert_eq!(summary.visible, 3);
        assert_eq!(summary.counts.high, 3);
        assert_eq!(summary.counts.total, 3);
        assert!(!summary.empty_state_visible);

        assert!(view.tick(t0 + Duration::from_millis(100)));
        assert!(!view.tick(t0 + DURATION));
        assert_eq!(view.counters().get("cnt-high").unwrap().displayed(), 3);
        assert_eq!(view.counters().get("cnt-total").unwrap().displayed(), 3);
        assert_eq!(view.counters().get("cnt-low").unwrap().displayed(), 0);
    }

    #[test]
    fn test_apply_filters_idempotent() {
        let t0 = Instant::now();
        let mut view = ViewController::new(ten_rows(), DURATION);
        let criteria = FilterCriteria {
            geography: Some("France".to_string()),
            active_flag: ActiveFlag::Active,
            ..Default::default()
        };

        let first = view.apply_filters(&criteria, t0);
        let first_rows = view.rows().to_vec();
        let second = view.apply_filters(&criteria, t0 + Duration::from_millis(5));
        assert_eq!(first, second);
        assert_eq!(first_rows, view.rows());
        assert_eq!(view.visible_count(), first.visible);
    }

    #[test]
    fn test_empty_state_tracks_every_apply() {
        let t0 = Instant::now();
        let mut view = ViewController::new(ten_rows(), DURATION);

        let none = FilterCriteria { query: Some("nobody".to_string()), ..Default::default() };
        assert!(view.apply_filters(&none, t0).empty_state_visible);
        assert!(view.empty_state_visible());

        assert!(!view.apply_filters(&FilterCriteria::default(), t0).empty_state_visible);
        assert!(!view.empty_state_visible());
    }

    #[test]
    fn test_missing_controls_do_not_block_other_filters() {
        let t0 = Instant::now();
        let mut view = ViewController::new(ten_rows(), DURATION);
        let controls = FilterControls {
            risk_level: None,
            geography: None,
            active: Some("1".to_string()),
            query: None,
        };
        let summary = view.apply_controls(controls, t0);
        let expected = ten_rows().iter().filter(|r| r.is_active()).count();
        assert_eq!(summary.visible, expected);
    }

    #[test]
    fn test_balance_header_twice() {
        let mut view = ViewController::new(ten_rows(), DURATION);

        let state = view.sort_by(SortColumn::Balance);
        assert!(state.ascending);
        assert_eq!(view.rows()[0].balance_text.as_deref(), Some("$10,000.00"));
        assert_eq!(view.rows()[0].rank, Some(1));

        let state = view.sort_by(SortColumn::Balance);
        assert!(!state.ascending);
        assert_eq!(view.rows()[0].balance_text.as_deref(), Some("$1,000.00"));
        assert_eq!(view.rows()[0].rank, Some(1));
        assert!(view.rows()[0].top3);
    }

    #[test]
    fn test_sort_reorders_hidden_rows_too() {
        let t0 = Instant::now();
        let mut view = ViewController::new(ten_rows(), DURATION);
        let criteria = FilterCriteria { risk_level: Some(RiskLevel::Low), ..Default::default() };
        view.apply_filters(&criteria, t0);

        view.sort_by(SortColumn::RiskScore);
        let scores: Vec<f64> = view.rows().iter().map(|r| r.sort_value(SortColumn::RiskScore)).collect();
        assert_eq!(scores[0], 91.0);
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));

        let ranks: Vec<usize> = view.rows().iter().filter_map(|r| r.rank).collect();
        assert_eq!(ranks, (1..=10).collect::<Vec<_>>());
        assert_eq!(view.rows().iter().filter(|r| r.top3).count(), 3);
        assert_eq!(view.visible_count(), 4);
    }

    #[test]
    fn test_switching_column_resets_direction() {
        let mut view = ViewController::new(ten_rows(), DURATION);
        view.sort_by(SortColumn::Balance);
        view.sort_by(SortColumn::Balance);
        let state = view.sort_by(SortColumn::RiskScore);
        assert!(state.ascending);
        assert_eq!(state.indicator(SortColumn::Balance), "↕");
        assert!(view.sort_by_name("gender").is_none());
    }

    #[test]
    fn test_activate_row() {
        let view = ViewController::new(ten_rows(), DURATION);
        assert_eq!(view.activate_row(0, "/dashboard/risk/"), Some("/dashboard/risk/?q=C-100".to_string()));
        assert_eq!(view.activate_row(99, "/dashboard/risk/"), None);
    }
}
