use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::inspections::domain::InspectionType;

/// Identifier allocated by the store for a [`Property`] row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PropertyId(pub i64);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Billing strategy, selected per property. The variants are deliberately
/// kept separate rather than merged into one rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingPolicy {
    /// Visits on a six-month cadence, never charged.
    SixMonthFree,
    /// Charged and free visits take strict turns, regardless of elapsed
    /// time. The default for new properties.
    #[default]
    ThreeMonthToggle,
    /// Move-in and move-out visits always charge; routine visits alternate,
    /// except that a charge recurs once the prior visit is three months old.
    TypeBased,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub address: String,
    pub billing_policy: BillingPolicy,
    /// Memory fields below are owned by the completion workflow.
    pub last_inspection_date: Option<NaiveDate>,
    pub last_inspection_type: Option<InspectionType>,
    pub last_inspection_was_charged: bool,
    pub row_version: u64,
}

/// Create payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub address: String,
    #[serde(default)]
    pub billing_policy: BillingPolicy,
}

/// Edit payload for address and policy. Last-inspection memory is not
/// editable here. `row_version`, when supplied, must match the stored row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    pub address: String,
    pub billing_policy: BillingPolicy,
    #[serde(default)]
    pub row_version: Option<u64>,
}
