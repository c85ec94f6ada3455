use chrono::NaiveDate;
use serde::Serialize;

use crate::inspections::domain::RecordView;
use crate::sundry::domain::SundryTask;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Whole days in the inclusive span.
    pub days: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Charged inspections only; free visits never enter the report.
    pub total_inspections: usize,
    pub total_sundry_tasks: usize,
    pub total_sundry_cost_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollReport {
    pub period: ReportPeriod,
    pub summary: ReportSummary,
    pub inspections: Vec<RecordView>,
    pub sundry_tasks: Vec<SundryTask>,
}
