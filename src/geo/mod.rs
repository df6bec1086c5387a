//! Great-circle helpers for matching trips against location radii.

use crate::models::location::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6_371.0;

impl GeoPoint {
    /// Great-circle distance in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let (lat_a, lat_b) = (self.lat.to_radians(), other.lat.to_radians());
        let half_dlat = (lat_b - lat_a) / 2.0;
        let half_dlng = (other.lng - self.lng).to_radians() / 2.0;

        let h = half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlng.sin().powi(2);
        2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
    }
}

/// How close a trip's endpoints come to `center`, in kilometres.
pub fn trip_proximity_km(center: &GeoPoint, pickup: &GeoPoint, dropoff: &GeoPoint) -> f64 {
    center.distance_km(pickup).min(center.distance_km(dropoff))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEATHROW: GeoPoint = GeoPoint {
        lat: 51.47,
        lng: -0.4543,
    };
    const GATWICK: GeoPoint = GeoPoint {
        lat: 51.1537,
        lng: -0.1821,
    };

    #[test]
    fn airports_are_about_forty_km_apart_either_way() {
        let there = HEATHROW.distance_km(&GATWICK);
        let back = GATWICK.distance_km(&HEATHROW);
        assert!((there - 40.5).abs() < 3.0);
        assert!((there - back).abs() < 1e-9);
        assert!(HEATHROW.distance_km(&HEATHROW) < 1e-9);
    }

    #[test]
    fn proximity_uses_the_closer_endpoint() {
        let terminal_five = GeoPoint {
            lat: 51.4713,
            lng: -0.4524,
        };
        let proximity = trip_proximity_km(&HEATHROW, &GATWICK, &terminal_five);
        assert!(proximity < 1.0);
        assert_eq!(
            proximity,
            trip_proximity_km(&HEATHROW, &terminal_five, &GATWICK)
        );
    }
}
