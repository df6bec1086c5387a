use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use uuid::Uuid;

use crate::api::rest::extract::AppJson;
use crate::api::rest::vehicles::DeletedResponse;
use crate::error::AppError;
use crate::models::location::{Location, LocationInput};
use crate::state::AppState;
use crate::store::locations;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/locations", get(list_locations).post(create_location))
        .route(
            "/locations/:id",
            get(get_location).put(update_location).delete(delete_location),
        )
}

async fn list_locations(State(state): State<Arc<AppState>>) -> Json<Vec<Location>> {
    Json(locations::list_locations(&state))
}

async fn get_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Location>, AppError> {
    Ok(Json(locations::get_location(&state, id)?))
}

async fn create_location(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<LocationInput>,
) -> Result<Json<Location>, AppError> {
    Ok(Json(locations::create_location(&state, payload)?))
}

async fn update_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<LocationInput>,
) -> Result<Json<Location>, AppError> {
    Ok(Json(locations::update_location(&state, id, payload)?))
}

async fn delete_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let pricing_removed = locations::delete_location(&state, id)?;
    Ok(Json(DeletedResponse {
        deleted: id,
        pricing_removed,
    }))
}
