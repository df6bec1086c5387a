use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VehicleType {
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Luxury,
    Van,
    Business,
    #[serde(rename = "First Class")]
    FirstClass,
    Executive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub category_name: String,
    pub category_details: String,
    pub vehicle_type: VehicleType,
    pub passenger_capacity: u8,
    pub luggage_capacity: u8,
    pub list_priority: i32,
    pub display_vat_inclusive: bool,
    pub vat_applicable: bool,
    /// Hours of notice required before a pickup can be booked.
    pub minimum_notice_hours: u32,
    pub same_day_booking: bool,
    pub company_features: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /vehicles` and `PUT /vehicles/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    pub category_name: String,
    #[serde(default)]
    pub category_details: String,
    pub vehicle_type: VehicleType,
    pub passenger_capacity: u8,
    pub luggage_capacity: u8,
    #[serde(default)]
    pub list_priority: i32,
    #[serde(default)]
    pub display_vat_inclusive: bool,
    #[serde(default)]
    pub vat_applicable: bool,
    #[serde(default)]
    pub minimum_notice_hours: u32,
    #[serde(default = "default_true")]
    pub same_day_booking: bool,
    #[serde(default)]
    pub company_features: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Vehicle {
    pub fn from_input(id: Uuid, input: VehicleInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            category_name: input.category_name.trim().to_string(),
            category_details: input.category_details,
            vehicle_type: input.vehicle_type,
            passenger_capacity: input.passenger_capacity,
            luggage_capacity: input.luggage_capacity,
            list_priority: input.list_priority,
            display_vat_inclusive: input.display_vat_inclusive,
            vat_applicable: input.vat_applicable,
            minimum_notice_hours: input.minimum_notice_hours,
            same_day_booking: input.same_day_booking,
            company_features: input
                .company_features
                .into_iter()
                .map(|feature| feature.trim().to_string())
                .filter(|feature| !feature.is_empty())
                .collect(),
            is_active: input.is_active,
            created_at,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VehicleType;

    #[test]
    fn vehicle_type_uses_display_names_on_the_wire() {
        let json = serde_json::to_string(&VehicleType::FirstClass).unwrap();
        assert_eq!(json, "\"First Class\"");

        let parsed: VehicleType = serde_json::from_str("\"SUV\"").unwrap();
        assert_eq!(parsed, VehicleType::Suv);
    }
}
