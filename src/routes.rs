//! Generic HTTP handlers for any [`CrudService`].
//!
//! ```rust,ignore
//! let todos = Arc::new(BaseService::new(DatabaseRepository::<Todo>::new(db)));
//! let app = Router::new().nest("/api/v1/todos", crud_router(todos));
//! ```

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::response::ApiResponse;
use crate::service::{CrudService, IdOf};

/// Router with the five CRUD routes for `service`, ready to be nested under a
/// resource path.
pub fn crud_router<S: CrudService>(service: Arc<S>) -> Router {
    Router::new()
        .route("/", get(get_all::<S>).post(create_one::<S>))
        .route(
            "/{id}",
            get(get_one::<S>).put(update_one::<S>).delete(delete_one::<S>),
        )
        .with_state(service)
}

/// `GET /` - every stored entity.
///
/// # Errors
///
/// Any [`ApiError`] raised by the service.
pub async fn get_all<S: CrudService>(
    State(service): State<Arc<S>>,
) -> Result<Json<ApiResponse<Vec<S::Entity>>>, ApiError> {
    Ok(Json(service.find_all().await?))
}

/// `GET /{id}` - one entity, or 404.
///
/// # Errors
///
/// Any [`ApiError`] raised by the service.
pub async fn get_one<S: CrudService>(
    State(service): State<Arc<S>>,
    Path(id): Path<IdOf<S>>,
) -> Result<Json<ApiResponse<S::Entity>>, ApiError> {
    Ok(Json(service.find_by_id(id).await?))
}

/// `POST /` - create from a payload without key, 201 on success.
///
/// # Errors
///
/// Any [`ApiError`] raised by the service.
pub async fn create_one<S: CrudService>(
    State(service): State<Arc<S>>,
    Json(payload): Json<S::Entity>,
) -> Result<(StatusCode, Json<ApiResponse<S::Entity>>), ApiError> {
    let created = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /{id}` - overwrite the stored entity, keeping its key.
///
/// # Errors
///
/// Any [`ApiError`] raised by the service.
pub async fn update_one<S: CrudService>(
    State(service): State<Arc<S>>,
    Path(id): Path<IdOf<S>>,
    Json(payload): Json<S::Entity>,
) -> Result<Json<ApiResponse<S::Entity>>, ApiError> {
    Ok(Json(service.update(id, payload).await?))
}

/// `DELETE /{id}` - 204 with an empty body.
///
/// A service answering without the deleted entity gets 403. The default
/// services never do: a missing key fails with 404 before that point.
///
/// # Errors
///
/// Any [`ApiError`] raised by the service.
pub async fn delete_one<S: CrudService>(
    State(service): State<Arc<S>>,
    Path(id): Path<IdOf<S>>,
) -> Result<StatusCode, ApiError> {
    let deleted = service.delete(id).await?;
    if deleted.data.is_some() {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::FORBIDDEN)
    }
}
