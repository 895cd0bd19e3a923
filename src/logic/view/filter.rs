//! Row Filtering
//!
//! Predicates combine with AND. Recomputing is a pure function of the
//! criteria and the rows, so applying the same criteria twice yields the
//! same visible set.

use super::types::{ActiveFlag, AuditRow, FilterCriteria, LevelCounts, TableRow};
use crate::logic::record::RiskLevel;

/// Does `row` satisfy every active predicate?
pub fn matches(row: &TableRow, criteria: &FilterCriteria) -> bool {
    if let Some(level) = criteria.risk_level {
        if row.risk_level() != Some(level) {
            return false;
        }
    }

    if let Some(ref geography) = criteria.geography {
        let same = row
            .geography
            .as_deref()
            .map(|g| g.trim().eq_ignore_ascii_case(geography.trim()))
            .unwrap_or(false);
        if !same {
            return false;
        }
    }

    match criteria.active_flag {
        ActiveFlag::Active if !row.is_active() => return false,
        ActiveFlag::Inactive if row.is_active() => return false,
        _ => {}
    }

    if let Some(ref query) = criteria.query {
        let needle = query.to_lowercase();
        let name = row.name.as_deref().unwrap_or("").to_lowercase();
        let id = row.customer_id.as_deref().unwrap_or("").to_lowercase();
        if !name.contains(&needle) && !id.contains(&needle) {
            return false;
        }
    }

    true
}

/// Show/hide every row; returns the visible count
pub fn apply(rows: &mut [TableRow], criteria: &FilterCriteria) -> usize {
    let mut visible = 0;
    for row in rows.iter_mut() {
        row.visible = matches(row, criteria);
        if row.visible {
            visible += 1;
        }
    }
    visible
}

/// Total and per-level counts over visible rows only
pub fn count_visible(rows: &[TableRow]) -> LevelCounts {
    rows.iter()
        .filter(|row| row.visible)
        .fold(LevelCounts::default(), |mut counts, row| {
            counts.total += 1;
            match row.risk_level() {
                Some(RiskLevel::High) => counts.high += 1,
                Some(RiskLevel::Medium) => counts.medium += 1,
                Some(RiskLevel::Low) => counts.low += 1,
                None => {}
            }
            counts
        })
}

/// Audit table quick filter: plain substring over name and row text
pub fn filter_haystack(rows: &mut [AuditRow], query: &str) -> usize {
    let needle = query.to_lowercase();
    let mut visible = 0;
    for row in rows.iter_mut() {
        let haystack = format!("{} {}", row.name.as_deref().unwrap_or(""), row.text).to_lowercase();
        row.visible = haystack.contains(&needle);
        if row.visible {
            visible += 1;
        }
    }
    visible
}
