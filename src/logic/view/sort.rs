//! Column Sort & Ranking
//!
//! `ascending` follows the header arrow: an ascending rank order puts the
//! largest value at rank 1. The first click on a column therefore lists
//! the riskiest (or richest) customer first; the second click flips it.

use serde::Serialize;
use std::cmp::Ordering;

use super::types::{SortColumn, TableRow};
use crate::constants::TOP_RANK_COUNT;

/// Which header is sorted, and which way
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub ascending: bool,
}

impl SortState {
    /// Header click: same column flips, any other column starts ascending
    pub fn click(&mut self, column: SortColumn) -> bool {
        self.ascending = if self.column == Some(column) { !self.ascending } else { true };
        self.column = Some(column);
        self.ascending
    }

    pub fn is_sorted(&self, column: SortColumn) -> bool {
        self.column == Some(column)
    }

    /// Header icon glyph
    pub fn indicator(&self, column: SortColumn) -> &'static str {
        if !self.is_sorted(column) {
            "↕"
        } else if self.ascending {
            "↑"
        } else {
            "↓"
        }
    }
}

/// Stable re-order of every row, hidden ones included
pub fn sort_rows(rows: &mut [TableRow], column: SortColumn, ascending: bool) {
    rows.sort_by(|a, b| {
        let (av, bv) = (a.sort_value(column), b.sort_value(column));
        let ord = if ascending { bv.partial_cmp(&av) } else { av.partial_cmp(&bv) };
        ord.unwrap_or(Ordering::Equal)
    });
}

/// Rank labels follow position; the first few get the top marker
pub fn rerank(rows: &mut [TableRow]) {
    for (i, row) in rows.iter_mut().enumerate() {
        if !row.has_rank_badge {
            continue;
        }
        row.rank = Some(i + 1);
        row.top3 = i < TOP_RANK_COUNT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, balance: &str) -> TableRow {
        TableRow {
            customer_id: Some(id.to_string()),
            balance_text: Some(balance.to_string()),
            has_rank_badge: true,
            ..Default::default()
        }
    }

    fn ids(rows: &[TableRow]) -> Vec<String> {
        rows.iter().map(|r| r.customer_id.clone().unwrap_or_default()).collect()
    }

    #[test]
    fn test_click_toggles_and_resets() {
        let mut state = SortState::default();
        assert_eq!(state.indicator(SortColumn::Balance), "↕");

        assert!(state.click(SortColumn::Balance));
        assert_eq!(state.indicator(SortColumn::Balance), "↑");
        assert!(!state.click(SortColumn::Balance));
        assert_eq!(state.indicator(SortColumn::Balance), "↓");
        assert!(state.click(SortColumn::Balance));

        state.click(SortColumn::Balance);
        assert!(state.click(SortColumn::RiskScore));
        assert!(!state.is_sorted(SortColumn::Balance));
        assert_eq!(state.indicator(SortColumn::Balance), "↕");
    }

    #[test]
    fn test_directions_reverse_exactly() {
        let mut rows = vec![
            row("a", "$1,200.00"),
            row("b", "$95,000.10"),
            row("c", "$0.00"),
            row("d", "$40,500.00"),
        ];
        sort_rows(&mut rows, SortColumn::Balance, true);
        let first = ids(&rows);
        assert_eq!(first, vec!["b", "d", "a", "c"]);

        sort_rows(&mut rows, SortColumn::Balance, false);
        let mut reversed = first.clone();
        reversed.reverse();
        assert_eq!(ids(&rows), reversed);
    }

    #[test]
    fn test_sort_is_stable_and_unparsable_is_zero() {
        let mut rows = vec![
            row("x", "n/a"),
            row("y", "$10.00"),
            row("z", "$0"),
            TableRow { customer_id: Some("w".to_string()), ..Default::default() },
        ];
        sort_rows(&mut rows, SortColumn::Balance, false);
        assert_eq!(ids(&rows), vec!["x", "z", "w", "y"]);
    }

    #[test]
    fn test_rerank_marks_top_three() {
        let mut rows: Vec<TableRow> = (0..5).map(|i| row(&i.to_string(), "$1")).collect();
        rerank(&mut rows);
        let ranks: Vec<usize> = rows.iter().filter_map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert_eq!(rows.iter().filter(|r| r.top3).count(), 3);
        assert!(rows[2].top3 && !rows[3].top3);
    }
}
