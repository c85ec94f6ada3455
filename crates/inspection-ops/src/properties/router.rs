use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::store::Storage;

use super::domain::{PropertyDraft, PropertyId, PropertyUpdate};
use super::service::PropertyService;

/// Router exposing the property registry.
pub fn property_router<S>(service: Arc<PropertyService<S>>) -> Router
where
    S: Storage + 'static,
{
    Router::new()
        .route(
            "/api/properties",
            get(list_properties::<S>).post(create_property::<S>),
        )
        .route(
            "/api/properties/:id",
            get(get_property::<S>)
                .put(update_property::<S>)
                .delete(delete_property::<S>),
        )
        .with_state(service)
}

pub(crate) async fn list_properties<S: Storage + 'static>(
    State(service): State<Arc<PropertyService<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let properties = service.list()?;
    Ok(Json(properties))
}

pub(crate) async fn get_property<S: Storage + 'static>(
    State(service): State<Arc<PropertyService<S>>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let property = service.get(PropertyId(id))?;
    Ok(Json(property))
}

pub(crate) async fn create_property<S: Storage + 'static>(
    State(service): State<Arc<PropertyService<S>>>,
    Json(draft): Json<PropertyDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let property = service.create(draft)?;
    Ok((StatusCode::CREATED, Json(property)))
}

pub(crate) async fn update_property<S: Storage + 'static>(
    State(service): State<Arc<PropertyService<S>>>,
    Path(id): Path<i64>,
    Json(update): Json<PropertyUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    service.update(PropertyId(id), update)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_property<S: Storage + 'static>(
    State(service): State<Arc<PropertyService<S>>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    service.delete(PropertyId(id))?;
    Ok(StatusCode::NO_CONTENT)
}
