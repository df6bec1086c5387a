use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Airport,
    Stadium,
    Circuit,
    Venue,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    /// Reference into the external geocoder.
    pub place_id: String,
    pub location_type: LocationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iata_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icao_code: Option<String>,
    pub coordinates: GeoPoint,
    pub zone: String,
    pub radius_km: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /locations` and `PUT /locations/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub place_id: String,
    pub location_type: LocationType,
    #[serde(default)]
    pub iata_code: Option<String>,
    #[serde(default)]
    pub icao_code: Option<String>,
    pub coordinates: GeoPoint,
    #[serde(default)]
    pub zone: String,
    pub radius_km: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

pub const MIN_RADIUS_KM: f64 = 1.0;
pub const MAX_RADIUS_KM: f64 = 50.0;

impl Location {
    pub fn from_input(id: Uuid, input: LocationInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name.trim().to_string(),
            address: input.address.trim().to_string(),
            place_id: input.place_id,
            location_type: input.location_type,
            iata_code: normalize_code(input.iata_code),
            icao_code: normalize_code(input.icao_code),
            coordinates: input.coordinates,
            zone: input.zone.trim().to_string(),
            radius_km: input.radius_km,
            is_active: input.is_active,
            created_at,
            updated_at: Utc::now(),
        }
    }
}

fn normalize_code(code: Option<String>) -> Option<String> {
    code.map(|c| c.trim().to_uppercase()).filter(|c| !c.is_empty())
}
