use crate::geo::trip_proximity_km;
use crate::models::location::{GeoPoint, Location};

/// Active locations whose radius covers the pickup or the dropoff,
/// nearest first.
pub fn locations_touching(locations: &[Location], pickup: GeoPoint, dropoff: GeoPoint) -> Vec<&Location> {
    let mut touching: Vec<(f64, &Location)> = locations
        .iter()
        .filter(|location| location.is_active)
        .filter_map(|location| {
            let distance = trip_proximity_km(&location.coordinates, &pickup, &dropoff);
            (distance <= location.radius_km).then_some((distance, location))
        })
        .collect();

    touching.sort_by(|a, b| a.0.total_cmp(&b.0));
    touching.into_iter().map(|(_, location)| location).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::location::LocationType;

    fn location(name: &str, lat: f64, lng: f64, radius_km: f64, is_active: bool) -> Location {
        Location {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address: String::new(),
            place_id: String::new(),
            location_type: LocationType::Airport,
            iata_code: None,
            icao_code: None,
            coordinates: GeoPoint { lat, lng },
            zone: String::new(),
            radius_km,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn dropoff_inside_radius_counts() {
        let heathrow = location("Heathrow", 51.47, -0.4543, 5.0, true);
        let locations = vec![heathrow.clone()];

        let mayfair = GeoPoint {
            lat: 51.5099,
            lng: -0.1478,
        };
        let terminal = GeoPoint {
            lat: 51.4713,
            lng: -0.4524,
        };

        let hits = locations_touching(&locations, mayfair, terminal);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, heathrow.id);

        assert!(locations_touching(&locations, mayfair, mayfair).is_empty());
    }

    #[test]
    fn inactive_locations_are_skipped_and_nearest_comes_first() {
        let point = GeoPoint {
            lat: 51.5,
            lng: -0.12,
        };
        let far = location("Wide zone", 51.55, -0.12, 20.0, true);
        let near = location("Venue", 51.501, -0.12, 2.0, true);
        let closed = location("Closed", 51.5, -0.12, 10.0, false);
        let locations = vec![far.clone(), closed, near.clone()];

        let hits: Vec<_> = locations_touching(&locations, point, point)
            .into_iter()
            .map(|location| location.id)
            .collect();
        assert_eq!(hits, vec![near.id, far.id]);
    }
}
