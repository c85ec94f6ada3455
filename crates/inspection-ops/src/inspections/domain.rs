use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::properties::domain::{BillingPolicy, Property, PropertyId};

/// Identifier allocated by the store for an [`InspectionTask`] row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier allocated by the store for an [`InspectionRecord`] row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InspectionType {
    MoveIn,
    MoveOut,
    Routine,
}

/// Pending: no agreed slot yet. Ready: slot agreed, awaiting the visit.
/// Completed is terminal and reached only through the completion workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InspectionStatus {
    Pending,
    Ready,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionTask {
    pub id: TaskId,
    pub property_id: PropertyId,
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub inspection_type: InspectionType,
    pub status: InspectionStatus,
    /// Computed by the billing evaluator at scheduling time; re-derived
    /// whenever the property or type changes.
    pub is_billable: bool,
    /// Manual charge decision. When set it wins over `is_billable`; both
    /// are kept so the override stays visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_billable_override: Option<bool>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub row_version: u64,
}

impl InspectionTask {
    /// The charge decision completion writes into the permanent record.
    pub fn effective_billable(&self) -> bool {
        self.is_billable_override.unwrap_or(self.is_billable)
    }
}

/// Append-only history row produced by the completion workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRecord {
    pub id: RecordId,
    pub property_id: PropertyId,
    pub execution_date: NaiveDate,
    #[serde(rename = "type")]
    pub inspection_type: InspectionType,
    pub is_charged: bool,
    pub notes: String,
    pub task_id: Option<TaskId>,
}

/// Create payload for the scheduler. Status is not accepted here; new
/// tasks start Pending and are promoted when a slot is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub property_id: PropertyId,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub inspection_type: InspectionType,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_billable_override: Option<bool>,
}

/// Edit payload. Status stays system-managed: promotion re-applies after
/// the edit and never runs backwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub property_id: PropertyId,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub inspection_type: InspectionType,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_billable_override: Option<bool>,
    #[serde(default)]
    pub row_version: Option<u64>,
}

/// Input for the completion workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionInput {
    pub execution_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Task row joined with its property, as served to the scheduling UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: TaskId,
    pub property_id: PropertyId,
    pub property_address: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub inspection_type: InspectionType,
    pub status: InspectionStatus,
    pub is_billable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_billable_override: Option<bool>,
    pub effective_billable: bool,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub billing_policy: BillingPolicy,
    pub last_inspection_date: Option<NaiveDate>,
    pub last_inspection_type: Option<InspectionType>,
    pub last_inspection_was_charged: bool,
    pub row_version: u64,
}

impl TaskView {
    pub fn from_parts(task: &InspectionTask, property: &Property) -> Self {
        Self {
            id: task.id,
            property_id: task.property_id,
            property_address: property.address.clone(),
            scheduled_at: task.scheduled_at,
            inspection_type: task.inspection_type,
            status: task.status,
            is_billable: task.is_billable,
            is_billable_override: task.is_billable_override,
            effective_billable: task.effective_billable(),
            contact_phone: task.contact_phone.clone(),
            contact_email: task.contact_email.clone(),
            notes: task.notes.clone(),
            created_at: task.created_at,
            completed_at: task.completed_at,
            billing_policy: property.billing_policy,
            last_inspection_date: property.last_inspection_date,
            last_inspection_type: property.last_inspection_type,
            last_inspection_was_charged: property.last_inspection_was_charged,
            row_version: task.row_version,
        }
    }
}

/// Record row joined with the property address, for history and reports.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub id: RecordId,
    pub property_id: PropertyId,
    pub property_address: Option<String>,
    pub execution_date: NaiveDate,
    #[serde(rename = "type")]
    pub inspection_type: InspectionType,
    pub is_charged: bool,
    pub notes: String,
    pub task_id: Option<TaskId>,
}

impl RecordView {
    pub fn from_parts(record: &InspectionRecord, property_address: Option<String>) -> Self {
        Self {
            id: record.id,
            property_id: record.property_id,
            property_address,
            execution_date: record.execution_date,
            inspection_type: record.inspection_type,
            is_charged: record.is_charged,
            notes: record.notes.clone(),
            task_id: record.task_id,
        }
    }
}
