use chrono::Utc;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::location::GeoPoint;
use crate::models::pricing::{
    PricingKey, PricingMode, PricingPayload, PricingRates, PricingRecord,
};
use crate::pricing::form::normalize;
use crate::pricing::resolve::locations_touching;
use crate::pricing::validation::validate_payload;
use crate::state::AppState;
use crate::store::PricingEvent;

pub fn get_pricing(state: &AppState, key: &PricingKey) -> Option<PricingRecord> {
    state.pricing.get(key).map(|entry| entry.value().clone())
}

/// Creates the record on first save, replaces it in place afterwards.
///
/// The record id and creation time survive updates.
pub fn upsert_pricing(
    state: &AppState,
    key: PricingKey,
    payload: PricingPayload,
) -> Result<PricingRecord, AppError> {
    let scope = key.scope_label();

    let result = check_and_store(state, key, payload);
    match &result {
        Ok(record) => {
            state
                .metrics
                .pricing_saves_total
                .with_label_values(&[scope, "success"])
                .inc();
            state.metrics.pricing_records.set(state.pricing.len() as i64);
            let _ = state.pricing_events_tx.send(PricingEvent::Saved {
                record: record.clone(),
            });
            info!(pricing_id = %record.id, key = %key, "pricing saved");
        }
        Err(err) => {
            state
                .metrics
                .pricing_saves_total
                .with_label_values(&[scope, "error"])
                .inc();
            warn!(key = %key, error = %err, "pricing save rejected");
        }
    }

    result
}

fn check_and_store(
    state: &AppState,
    key: PricingKey,
    payload: PricingPayload,
) -> Result<PricingRecord, AppError> {
    ensure_owners(state, &key)?;

    if let PricingKey::Vehicle { mode, .. } = key {
        if mode != payload.rates.mode() {
            return Err(AppError::BadRequest(format!(
                "payload mode {} does not match {mode} pricing",
                payload.rates.mode()
            )));
        }
    }

    let payload = normalize(payload);
    let issues = validate_payload(&payload);
    if !issues.is_empty() {
        return Err(AppError::Validation(issues));
    }

    let now = Utc::now();
    let record = match state.pricing.entry(key) {
        Entry::Occupied(mut occupied) => {
            let existing = occupied.get();
            let mut record = PricingRecord::new(existing.id, key, payload, existing.created_at);
            record.updated_at = now;
            occupied.insert(record.clone());
            record
        }
        Entry::Vacant(vacant) => {
            let record = PricingRecord::new(Uuid::new_v4(), key, payload, now);
            vacant.insert(record.clone());
            record
        }
    };

    release_if_orphaned(state, key)?;
    Ok(record)
}

/// The vehicle, and the location for overrides, must exist.
fn ensure_owners(state: &AppState, key: &PricingKey) -> Result<(), AppError> {
    let vehicle_id = key.vehicle_id();
    if !state.vehicles.contains_key(&vehicle_id) {
        return Err(AppError::NotFound(format!("vehicle {vehicle_id} not found")));
    }

    if let PricingKey::Location { location_id, .. } = key {
        if !state.locations.contains_key(location_id) {
            return Err(AppError::NotFound(format!("location {location_id} not found")));
        }
    }

    Ok(())
}

/// Drops a just-stored record whose vehicle or location was deleted
/// while the save was in flight.
fn release_if_orphaned(state: &AppState, key: PricingKey) -> Result<(), AppError> {
    let Err(err) = ensure_owners(state, &key) else {
        return Ok(());
    };

    if state.pricing.remove(&key).is_some() {
        warn!(key = %key, "owner deleted during save, record dropped");
    }
    Err(err)
}

/// Overrides stored for one location, ordered like the vehicle list.
pub fn list_location_pricing(
    state: &AppState,
    location_id: Uuid,
) -> Result<Vec<PricingRecord>, AppError> {
    if !state.locations.contains_key(&location_id) {
        return Err(AppError::NotFound(format!("location {location_id} not found")));
    }

    let mut records: Vec<PricingRecord> = state
        .pricing
        .iter()
        .filter(|entry| entry.value().location_id == Some(location_id))
        .map(|entry| entry.value().clone())
        .collect();

    records.sort_by_key(|record| {
        let priority = state
            .vehicles
            .get(&record.vehicle_id)
            .map(|vehicle| vehicle.list_priority)
            .unwrap_or(i32::MAX);
        (priority, record.vehicle_id)
    });

    Ok(records)
}

/// Removes every record whose key matches; returns how many went.
pub fn remove_pricing_where<F>(state: &AppState, predicate: F) -> usize
where
    F: Fn(&PricingKey) -> bool,
{
    let doomed: Vec<PricingKey> = state
        .pricing
        .iter()
        .filter(|entry| predicate(entry.key()))
        .map(|entry| *entry.key())
        .collect();

    let mut removed = 0;
    for key in doomed {
        if state.pricing.remove(&key).is_some() {
            removed += 1;
            let _ = state.pricing_events_tx.send(PricingEvent::Deleted { key });
        }
    }

    state.metrics.cascade_deleted_total.inc_by(removed as u64);
    state.metrics.pricing_records.set(state.pricing.len() as i64);
    removed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingSource {
    Location,
    Vehicle,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPricing {
    pub source: PricingSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<Uuid>,
    pub record: PricingRecord,
}

/// Picks the pricing that applies to a trip for `vehicle_id`.
///
/// An active point-to-point override at a location the trip touches wins
/// over the vehicle's global point-to-point pricing. Hourly records never
/// resolve for a trip.
pub fn resolve_pricing(
    state: &AppState,
    vehicle_id: Uuid,
    pickup: GeoPoint,
    dropoff: GeoPoint,
) -> Result<ResolvedPricing, AppError> {
    if !state.vehicles.contains_key(&vehicle_id) {
        return Err(AppError::NotFound(format!("vehicle {vehicle_id} not found")));
    }

    let locations: Vec<_> = state
        .locations
        .iter()
        .map(|entry| entry.value().clone())
        .collect();

    for location in locations_touching(&locations, pickup, dropoff) {
        let key = PricingKey::Location {
            location_id: location.id,
            vehicle_id,
        };
        let distance_override = get_pricing(state, &key)
            .filter(|record| record.is_active() && matches!(record.rates, PricingRates::P2p(_)));
        if let Some(record) = distance_override {
            return Ok(ResolvedPricing {
                source: PricingSource::Location,
                location_id: Some(location.id),
                record,
            });
        }
    }

    let key = PricingKey::Vehicle {
        vehicle_id,
        mode: PricingMode::P2p,
    };
    get_pricing(state, &key)
        .filter(PricingRecord::is_active)
        .map(|record| ResolvedPricing {
            source: PricingSource::Vehicle,
            location_id: None,
            record,
        })
        .ok_or_else(|| AppError::NotFound(format!("no active pricing for vehicle {vehicle_id}")))
}
