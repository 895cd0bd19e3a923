//! Table View Types

use serde::{Deserialize, Serialize};

use crate::constants::ACTIVE_STATUS_TEXT;
use crate::logic::markup::{format_currency, format_score, parse_number};
use crate::logic::record::{RiskLevel, RiskRecord};

// ============================================================================
// ROWS
// ============================================================================

/// Risk badge cell: its level class and its text (`"81%"`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskBadge {
    pub level: Option<RiskLevel>,
    pub text: String,
}

/// One rendered table row
///
/// Every cell is optional: a row missing a cell simply fails predicates
/// that need it and sorts as 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableRow {
    pub customer_id: Option<String>,
    pub name: Option<String>,
    pub geography: Option<String>,
    pub badge: Option<RiskBadge>,
    pub balance_text: Option<String>,
    pub status_text: Option<String>,
    /// Whether the row carries a rank label at all
    pub has_rank_badge: bool,
    pub rank: Option<usize>,
    pub top3: bool,
    pub visible: bool,
}

impl Default for TableRow {
    fn default() -> Self {
        Self {
            customer_id: None,
            name: None,
            geography: None,
            badge: None,
            balance_text: None,
            status_text: None,
            has_rank_badge: false,
            rank: None,
            top3: false,
            visible: true,
        }
    }
}

impl TableRow {
    /// Row as the server renders it for a record
    pub fn from_record(record: &RiskRecord) -> Self {
        Self {
            customer_id: Some(record.customer_id.clone()),
            name: Some(record.surname.clone()),
            geography: Some(record.geography.clone()),
            badge: Some(RiskBadge {
                level: Some(record.risk_level),
                text: format!("{}%", format_score(record.risk_score)),
            }),
            balance_text: Some(format_currency(record.balance)),
            status_text: Some(if record.is_active { ACTIVE_STATUS_TEXT } else { "Inactive" }.to_string()),
            has_rank_badge: true,
            ..Default::default()
        }
    }

    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.badge.as_ref().and_then(|b| b.level)
    }

    pub fn is_active(&self) -> bool {
        self.status_text
            .as_deref()
            .map(|s| s.trim() == ACTIVE_STATUS_TEXT)
            .unwrap_or(false)
    }

    /// Numeric value under a sortable column
    pub fn sort_value(&self, column: SortColumn) -> f64 {
        match column {
            SortColumn::RiskScore => self.badge.as_ref().map(|b| parse_number(&b.text)).unwrap_or(0.0),
            SortColumn::Balance => self.balance_text.as_deref().map(parse_number).unwrap_or(0.0),
        }
    }
}

/// Row of the upload audit table, filtered by plain text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditRow {
    /// `data-name` attribute
    pub name: Option<String>,
    pub text: String,
    pub visible: bool,
}

impl AuditRow {
    pub fn new(name: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            name: name.map(str::to_string),
            text: text.into(),
            visible: true,
        }
    }
}

// ============================================================================
// FILTERS
// ============================================================================

/// Active/inactive select: `'1'`, `'0'` or `''`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ActiveFlag {
    #[default]
    Any,
    Active,
    Inactive,
}

impl ActiveFlag {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "1" => ActiveFlag::Active,
            "0" => ActiveFlag::Inactive,
            _ => ActiveFlag::Any,
        }
    }
}

/// Filter predicates; `None` means no constraint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterCriteria {
    pub risk_level: Option<RiskLevel>,
    pub geography: Option<String>,
    pub active_flag: ActiveFlag,
    pub query: Option<String>,
}

/// Raw values of the filter controls on the page
///
/// `None` means the control is not on the page at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterControls {
    pub risk_level: Option<String>,
    pub geography: Option<String>,
    pub active: Option<String>,
    pub query: Option<String>,
}

impl FilterControls {
    pub fn criteria(&self) -> FilterCriteria {
        let non_empty = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let risk_level = non_empty(&self.risk_level).and_then(|v| {
            let level = RiskLevel::parse(&v);
            if level.is_none() {
                log::debug!("Ignoring unknown risk level filter {:?}", v);
            }
            level
        });

        FilterCriteria {
            risk_level,
            geography: non_empty(&self.geography),
            active_flag: self.active.as_deref().map(ActiveFlag::parse).unwrap_or_default(),
            query: non_empty(&self.query),
        }
    }
}

// ============================================================================
// SORT & SUMMARY
// ============================================================================

/// Sortable columns
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SortColumn {
    RiskScore,
    Balance,
}

impl SortColumn {
    /// Map a header's `data-col` value
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "risk" => Some(SortColumn::RiskScore),
            "balance" => Some(SortColumn::Balance),
            _ => None,
        }
    }
}

/// Total and per-level counts over visible rows
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LevelCounts {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Snapshot of the view after a recompute
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewSummary {
    pub visible: usize,
    pub counts: LevelCounts,
    pub empty_state_visible: bool,
}
