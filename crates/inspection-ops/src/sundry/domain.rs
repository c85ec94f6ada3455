use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier allocated by the store for a [`SundryTask`] row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SundryId(pub i64);

impl fmt::Display for SundryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Money is carried as whole cents.
pub const MAX_COST_CENTS: i64 = 99_999_999;

/// Ledger entry for an ad-hoc paid chore. No business rule attaches to
/// these; the payroll report just sums them over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SundryTask {
    pub id: SundryId,
    pub description: String,
    pub cost_cents: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    /// When the chore was done; entries without one never enter a report.
    pub execution_date: Option<NaiveDate>,
    pub row_version: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SundryDraft {
    pub description: String,
    #[serde(default)]
    pub cost_cents: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub execution_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SundryUpdate {
    pub description: String,
    #[serde(default)]
    pub cost_cents: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub execution_date: Option<NaiveDate>,
    #[serde(default)]
    pub row_version: Option<u64>,
}
