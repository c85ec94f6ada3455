use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::clock::Clock;
use crate::error::ApiError;
use crate::store::Storage;

use super::domain::{CompletionInput, TaskDraft, TaskId, TaskUpdate};
use super::service::InspectionService;

/// Router exposing the scheduler, the `/complete` sub-action, and the
/// record history.
pub fn inspection_router<S, C>(service: Arc<InspectionService<S, C>>) -> Router
where
    S: Storage + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/api/inspection-tasks",
            get(list_tasks::<S, C>).post(create_task::<S, C>),
        )
        .route(
            "/api/inspection-tasks/:id",
            get(get_task::<S, C>)
                .put(update_task::<S, C>)
                .delete(delete_task::<S, C>),
        )
        .route(
            "/api/inspection-tasks/:id/complete",
            post(complete_task::<S, C>),
        )
        .route("/api/inspection-records", get(list_records::<S, C>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecordQuery {
    #[serde(default)]
    pub(crate) start_date: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) end_date: Option<NaiveDate>,
}

pub(crate) async fn list_tasks<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<InspectionService<S, C>>>,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = service.list()?;
    Ok(Json(tasks))
}

pub(crate) async fn get_task<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<InspectionService<S, C>>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let task = service.get(TaskId(id))?;
    Ok(Json(task))
}

pub(crate) async fn create_task<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<InspectionService<S, C>>>,
    Json(draft): Json<TaskDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let task = service.create(draft)?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub(crate) async fn update_task<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<InspectionService<S, C>>>,
    Path(id): Path<i64>,
    Json(update): Json<TaskUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    service.update(TaskId(id), update)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_task<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<InspectionService<S, C>>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    service.delete(TaskId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn complete_task<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<InspectionService<S, C>>>,
    Path(id): Path<i64>,
    Json(input): Json<CompletionInput>,
) -> Result<impl IntoResponse, ApiError> {
    let record = service.complete(TaskId(id), input)?;
    Ok(Json(record))
}

pub(crate) async fn list_records<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<InspectionService<S, C>>>,
    Query(query): Query<RecordQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let records = service.records(query.start_date, query.end_date)?;
    Ok(Json(records))
}
