use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::rest::extract::AppJson;
use crate::error::AppError;
use crate::models::location::GeoPoint;
use crate::models::pricing::{PricingKey, PricingMode, PricingPayload, PricingRecord};
use crate::state::AppState;
use crate::store::pricing::{self, ResolvedPricing};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/vehicles/:id/pricing/:mode",
            get(get_vehicle_pricing).put(put_vehicle_pricing),
        )
        .route("/locations/:id/pricing", get(list_location_pricing))
        .route(
            "/locations/:id/pricing/:vehicle_id",
            get(get_location_pricing).put(put_location_pricing),
        )
        .route("/pricing/resolve", post(resolve_pricing))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub vehicle_id: Uuid,
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
}

fn found(key: PricingKey, record: Option<PricingRecord>) -> Result<Json<PricingRecord>, AppError> {
    record
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no pricing stored for {key}")))
}

async fn get_vehicle_pricing(
    State(state): State<Arc<AppState>>,
    Path((vehicle_id, mode)): Path<(Uuid, PricingMode)>,
) -> Result<Json<PricingRecord>, AppError> {
    let key = PricingKey::Vehicle { vehicle_id, mode };
    found(key, pricing::get_pricing(&state, &key))
}

async fn put_vehicle_pricing(
    State(state): State<Arc<AppState>>,
    Path((vehicle_id, mode)): Path<(Uuid, PricingMode)>,
    AppJson(payload): AppJson<PricingPayload>,
) -> Result<Json<PricingRecord>, AppError> {
    let key = PricingKey::Vehicle { vehicle_id, mode };
    Ok(Json(pricing::upsert_pricing(&state, key, payload)?))
}

async fn get_location_pricing(
    State(state): State<Arc<AppState>>,
    Path((location_id, vehicle_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<PricingRecord>, AppError> {
    let key = PricingKey::Location {
        location_id,
        vehicle_id,
    };
    found(key, pricing::get_pricing(&state, &key))
}

async fn put_location_pricing(
    State(state): State<Arc<AppState>>,
    Path((location_id, vehicle_id)): Path<(Uuid, Uuid)>,
    AppJson(payload): AppJson<PricingPayload>,
) -> Result<Json<PricingRecord>, AppError> {
    let key = PricingKey::Location {
        location_id,
        vehicle_id,
    };
    Ok(Json(pricing::upsert_pricing(&state, key, payload)?))
}

async fn list_location_pricing(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<Uuid>,
) -> Result<Json<Vec<PricingRecord>>, AppError> {
    Ok(Json(pricing::list_location_pricing(&state, location_id)?))
}

async fn resolve_pricing(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<ResolveRequest>,
) -> Result<Json<ResolvedPricing>, AppError> {
    Ok(Json(pricing::resolve_pricing(
        &state,
        payload.vehicle_id,
        payload.pickup,
        payload.dropoff,
    )?))
}
