//! Risk Records
//!
//! The read-only customer records both controllers work over.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Coarse churn-risk severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Derive a level from a 0-100 score
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if score >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Strict, case-insensitive parse
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }

    /// Styling class for a level string; anything unknown styles as low
    pub fn css_class_for(value: &str) -> &'static str {
        Self::parse(value).unwrap_or(RiskLevel::Low).as_str()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// A customer risk record as supplied by the host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskRecord {
    pub customer_id: String,
    pub surname: String,
    pub geography: String,
    pub gender: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub balance: f64,
    pub is_active: bool,
}
