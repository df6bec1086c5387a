use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use uuid::Uuid;

use crate::api::rest::extract::AppJson;
use crate::error::AppError;
use crate::models::vehicle::{Vehicle, VehicleInput};
use crate::state::AppState;
use crate::store::vehicles;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub deleted: Uuid,
    pub pricing_removed: usize,
}

async fn list_vehicles(State(state): State<Arc<AppState>>) -> Json<Vec<Vehicle>> {
    Json(vehicles::list_vehicles(&state))
}

async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    Ok(Json(vehicles::get_vehicle(&state, id)?))
}

async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<VehicleInput>,
) -> Result<Json<Vehicle>, AppError> {
    Ok(Json(vehicles::create_vehicle(&state, payload)?))
}

async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<VehicleInput>,
) -> Result<Json<Vehicle>, AppError> {
    Ok(Json(vehicles::update_vehicle(&state, id, payload)?))
}

async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    let pricing_removed = vehicles::delete_vehicle(&state, id)?;
    Ok(Json(DeletedResponse {
        deleted: id,
        pricing_removed,
    }))
}
