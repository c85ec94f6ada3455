use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::clock::Clock;
use crate::error::ApiError;
use crate::store::Storage;

use super::service::ReportService;

/// Router exposing the payroll report endpoints.
pub fn report_router<S, C>(service: Arc<ReportService<S, C>>) -> Router
where
    S: Storage + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/api/reports/payroll", get(payroll_report::<S, C>))
        .route("/api/reports/two-weeks", get(two_weeks_report::<S, C>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PayrollQuery {
    pub(crate) start_date: NaiveDate,
    pub(crate) end_date: NaiveDate,
}

pub(crate) async fn payroll_report<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<ReportService<S, C>>>,
    Query(query): Query<PayrollQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = service.payroll(query.start_date, query.end_date)?;
    Ok(Json(report))
}

pub(crate) async fn two_weeks_report<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<ReportService<S, C>>>,
) -> Result<impl IntoResponse, ApiError> {
    let report = service.two_weeks()?;
    Ok(Json(report))
}
