//! Dashboard statistics models.

use serde::{Deserialize, Serialize};

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_requirements: usize,
    pub pending_review: usize,
    pub in_progress: usize,
    pub completed_this_month: usize,
    pub total_customers: usize,
}

/// Requirement counts grouped several ways.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub by_status: Vec<CountEntry>,
    pub by_module: Vec<CountEntry>,
    pub by_priority: Vec<CountEntry>,
    pub by_source_category: Vec<CountEntry>,
    pub top_customers: Vec<CountEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub key: String,
    pub count: usize,
}

impl CountEntry {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}
