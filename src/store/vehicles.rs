use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::vehicle::{Vehicle, VehicleInput};
use crate::state::AppState;
use crate::store::pricing::remove_pricing_where;

/// All vehicles in booking-list order.
pub fn list_vehicles(state: &AppState) -> Vec<Vehicle> {
    let mut vehicles: Vec<Vehicle> = state
        .vehicles
        .iter()
        .map(|entry| entry.value().clone())
        .collect();

    vehicles.sort_by(|a, b| {
        a.list_priority
            .cmp(&b.list_priority)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });
    vehicles
}

pub fn get_vehicle(state: &AppState, id: Uuid) -> Result<Vehicle, AppError> {
    state
        .vehicles
        .get(&id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound(format!("vehicle {id} not found")))
}

pub fn create_vehicle(state: &AppState, input: VehicleInput) -> Result<Vehicle, AppError> {
    validate_vehicle(&input)?;

    let now = Utc::now();
    let vehicle = Vehicle::from_input(Uuid::new_v4(), input, now);
    state.vehicles.insert(vehicle.id, vehicle.clone());
    state.metrics.vehicles_total.set(state.vehicles.len() as i64);

    info!(vehicle_id = %vehicle.id, category = %vehicle.category_name, "vehicle created");
    Ok(vehicle)
}

pub fn update_vehicle(state: &AppState, id: Uuid, input: VehicleInput) -> Result<Vehicle, AppError> {
    validate_vehicle(&input)?;

    let mut entry = state
        .vehicles
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("vehicle {id} not found")))?;

    let updated = Vehicle::from_input(id, input, entry.created_at);
    *entry = updated.clone();

    Ok(updated)
}

/// Deletes the vehicle along with its global and location pricing.
pub fn delete_vehicle(state: &AppState, id: Uuid) -> Result<usize, AppError> {
    state
        .vehicles
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("vehicle {id} not found")))?;
    state.metrics.vehicles_total.set(state.vehicles.len() as i64);

    let removed = remove_pricing_where(state, |key| key.vehicle_id() == id);
    info!(vehicle_id = %id, pricing_removed = removed, "vehicle deleted");
    Ok(removed)
}

fn validate_vehicle(input: &VehicleInput) -> Result<(), AppError> {
    if input.category_name.trim().is_empty() {
        return Err(AppError::BadRequest("categoryName cannot be empty".to_string()));
    }

    if input.passenger_capacity == 0 {
        return Err(AppError::BadRequest("passengerCapacity must be > 0".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleType;

    fn input(name: &str, priority: i32) -> VehicleInput {
        VehicleInput {
            category_name: name.to_string(),
            category_details: String::new(),
            vehicle_type: VehicleType::Sedan,
            passenger_capacity: 3,
            luggage_capacity: 2,
            list_priority: priority,
            display_vat_inclusive: false,
            vat_applicable: true,
            minimum_notice_hours: 4,
            same_day_booking: true,
            company_features: vec!["Wi-Fi".to_string(), " ".to_string()],
            is_active: true,
        }
    }

    #[test]
    fn vehicles_are_listed_by_priority() {
        let state = AppState::new(16, None);
        create_vehicle(&state, input("V-Class", 3)).unwrap();
        create_vehicle(&state, input("E-Class", 1)).unwrap();
        create_vehicle(&state, input("S-Class", 2)).unwrap();

        let names: Vec<_> = list_vehicles(&state)
            .into_iter()
            .map(|vehicle| vehicle.category_name)
            .collect();
        assert_eq!(names, vec!["E-Class", "S-Class", "V-Class"]);
    }

    #[test]
    fn blank_features_are_dropped() {
        let state = AppState::new(16, None);
        let vehicle = create_vehicle(&state, input("E-Class", 1)).unwrap();
        assert_eq!(vehicle.company_features, vec!["Wi-Fi"]);
    }

    #[test]
    fn zero_passenger_capacity_is_rejected() {
        let state = AppState::new(16, None);
        let mut bad = input("E-Class", 1);
        bad.passenger_capacity = 0;
        assert!(matches!(
            create_vehicle(&state, bad),
            Err(AppError::BadRequest(_))
        ));
    }
}
