use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::clock::Clock;
use crate::error::ApiError;
use crate::store::Storage;

use super::domain::{SundryDraft, SundryId, SundryUpdate};
use super::service::SundryService;

/// Router exposing the sundry ledger.
pub fn sundry_router<S, C>(service: Arc<SundryService<S, C>>) -> Router
where
    S: Storage + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/api/sundry-tasks",
            get(list_sundry::<S, C>).post(create_sundry::<S, C>),
        )
        .route(
            "/api/sundry-tasks/:id",
            get(get_sundry::<S, C>)
                .put(update_sundry::<S, C>)
                .delete(delete_sundry::<S, C>),
        )
        .with_state(service)
}

pub(crate) async fn list_sundry<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<SundryService<S, C>>>,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = service.list()?;
    Ok(Json(tasks))
}

pub(crate) async fn get_sundry<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<SundryService<S, C>>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let task = service.get(SundryId(id))?;
    Ok(Json(task))
}

pub(crate) async fn create_sundry<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<SundryService<S, C>>>,
    Json(draft): Json<SundryDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let task = service.create(draft)?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub(crate) async fn update_sundry<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<SundryService<S, C>>>,
    Path(id): Path<i64>,
    Json(update): Json<SundryUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    service.update(SundryId(id), update)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_sundry<S: Storage + 'static, C: Clock + 'static>(
    State(service): State<Arc<SundryService<S, C>>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    service.delete(SundryId(id))?;
    Ok(StatusCode::NO_CONTENT)
}
