use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::location::{Location, LocationInput, LocationType, MAX_RADIUS_KM, MIN_RADIUS_KM};
use crate::models::pricing::PricingKey;
use crate::state::AppState;
use crate::store::pricing::remove_pricing_where;

pub fn list_locations(state: &AppState) -> Vec<Location> {
    let mut locations: Vec<Location> = state
        .locations
        .iter()
        .map(|entry| entry.value().clone())
        .collect();

    locations.sort_by(|a, b| a.name.cmp(&b.name));
    locations
}

pub fn get_location(state: &AppState, id: Uuid) -> Result<Location, AppError> {
    state
        .locations
        .get(&id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound(format!("location {id} not found")))
}

pub fn create_location(state: &AppState, input: LocationInput) -> Result<Location, AppError> {
    validate_location(&input)?;

    let location = Location::from_input(Uuid::new_v4(), input, Utc::now());
    state.locations.insert(location.id, location.clone());
    state.metrics.locations_total.set(state.locations.len() as i64);

    info!(location_id = %location.id, name = %location.name, "location created");
    Ok(location)
}

pub fn update_location(
    state: &AppState,
    id: Uuid,
    input: LocationInput,
) -> Result<Location, AppError> {
    validate_location(&input)?;

    let mut entry = state
        .locations
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("location {id} not found")))?;

    let updated = Location::from_input(id, input, entry.created_at);
    *entry = updated.clone();

    Ok(updated)
}

/// Deletes the location and every pricing override keyed to it.
pub fn delete_location(state: &AppState, id: Uuid) -> Result<usize, AppError> {
    state
        .locations
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("location {id} not found")))?;
    state.metrics.locations_total.set(state.locations.len() as i64);

    let removed = remove_pricing_where(state, |key| {
        matches!(key, PricingKey::Location { location_id, .. } if *location_id == id)
    });

    info!(location_id = %id, pricing_removed = removed, "location deleted");
    Ok(removed)
}

fn validate_location(input: &LocationInput) -> Result<(), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&input.radius_km) {
        return Err(AppError::BadRequest(format!(
            "radiusKm must be between {MIN_RADIUS_KM} and {MAX_RADIUS_KM}"
        )));
    }

    let point = input.coordinates;
    if !(-90.0..=90.0).contains(&point.lat) || !(-180.0..=180.0).contains(&point.lng) {
        return Err(AppError::BadRequest("coordinates out of range".to_string()));
    }

    let has_code = |code: &Option<String>| code.as_deref().is_some_and(|c| !c.trim().is_empty());
    if input.location_type != LocationType::Airport
        && (has_code(&input.iata_code) || has_code(&input.icao_code))
    {
        return Err(AppError::BadRequest(
            "iataCode and icaoCode are only allowed on airports".to_string(),
        ));
    }

    check_code(input.iata_code.as_deref(), 3, "iataCode")?;
    check_code(input.icao_code.as_deref(), 4, "icaoCode")?;

    Ok(())
}

fn check_code(code: Option<&str>, len: usize, field: &str) -> Result<(), AppError> {
    let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(());
    };

    if code.len() != len || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::BadRequest(format!("{field} must be {len} letters")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::GeoPoint;

    fn input(name: &str, location_type: LocationType) -> LocationInput {
        LocationInput {
            name: name.to_string(),
            address: String::new(),
            place_id: String::new(),
            location_type,
            iata_code: None,
            icao_code: None,
            coordinates: GeoPoint {
                lat: 52.0786,
                lng: -1.0169,
            },
            zone: "Northamptonshire".to_string(),
            radius_km: 5.0,
            is_active: true,
        }
    }

    #[test]
    fn radius_must_be_within_bounds() {
        let state = AppState::new(16, None);
        let mut wide = input("Silverstone", LocationType::Circuit);
        wide.radius_km = 51.0;
        assert!(matches!(
            create_location(&state, wide),
            Err(AppError::BadRequest(_))
        ));

        let mut tight = input("Silverstone", LocationType::Circuit);
        tight.radius_km = 0.5;
        assert!(create_location(&state, tight).is_err());
    }

    #[test]
    fn airport_codes_only_on_airports() {
        let state = AppState::new(16, None);
        let mut circuit = input("Silverstone", LocationType::Circuit);
        circuit.iata_code = Some("ORM".to_string());
        assert!(create_location(&state, circuit).is_err());

        let mut airport = input("Luton", LocationType::Airport);
        airport.iata_code = Some("ltn".to_string());
        airport.icao_code = Some("EGGW".to_string());
        let created = create_location(&state, airport).unwrap();
        assert_eq!(created.iata_code.as_deref(), Some("LTN"));
    }

    #[test]
    fn malformed_icao_code_is_rejected() {
        let state = AppState::new(16, None);
        let mut airport = input("Luton", LocationType::Airport);
        airport.icao_code = Some("EG1".to_string());
        assert!(create_location(&state, airport).is_err());
    }

    #[test]
    fn update_keeps_creation_time() {
        let state = AppState::new(16, None);
        let created = create_location(&state, input("Wembley", LocationType::Stadium)).unwrap();

        let mut changed = input("Wembley Stadium", LocationType::Stadium);
        changed.radius_km = 2.0;
        let updated = update_location(&state, created.id, changed).unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(get_location(&state, created.id).unwrap().name, "Wembley Stadium");
    }
}
