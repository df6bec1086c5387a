use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TierType {
    /// Flat charge for any distance inside the tier (minimum fare).
    Fixed,
    /// Price per mile travelled inside the tier.
    PerMile,
}

/// A distance band in miles, both bounds inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistanceTier {
    pub from_distance: u32,
    pub to_distance: u32,
    pub price: Decimal,
    #[serde(rename = "type")]
    pub tier_type: TierType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    P2p,
    Hourly,
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingMode::P2p => f.write_str("p2p"),
            PricingMode::Hourly => f.write_str("hourly"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PricingStatus {
    #[default]
    Active,
    Inactive,
}

/// Named surcharges added on top of the distance or hourly fare.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Extras {
    pub extra_stop_price: Decimal,
    pub child_seat_price: Decimal,
    pub congestion_charge: Decimal,
    pub airport_pickup_charge: Decimal,
    pub airport_dropoff_charge: Decimal,
    pub parking_included: Decimal,
}

impl Extras {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Decimal)> {
        [
            ("extraStopPrice", self.extra_stop_price),
            ("childSeatPrice", self.child_seat_price),
            ("congestionCharge", self.congestion_charge),
            ("airportPickupCharge", self.airport_pickup_charge),
            ("airportDropoffCharge", self.airport_dropoff_charge),
            ("parkingIncluded", self.parking_included),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistanceRates {
    pub distance_tiers: Vec<DistanceTier>,
    pub after_distance_threshold: u32,
    pub after_distance_price_per_mile: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRates {
    pub hourly_rate: Decimal,
    pub minimum_hours: u32,
    pub additional_hour_charge: Decimal,
    pub miles_included: u32,
    pub excess_mileage_charge: Decimal,
}

/// Point-to-point tiers and hourly rates never coexist on one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PricingRates {
    P2p(DistanceRates),
    Hourly(HourlyRates),
}

impl PricingRates {
    pub fn mode(&self) -> PricingMode {
        match self {
            PricingRates::P2p(_) => PricingMode::P2p,
            PricingRates::Hourly(_) => PricingMode::Hourly,
        }
    }
}

/// Identity a pricing record is upserted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "camelCase")]
pub enum PricingKey {
    #[serde(rename_all = "camelCase")]
    Vehicle { vehicle_id: Uuid, mode: PricingMode },
    #[serde(rename_all = "camelCase")]
    Location { location_id: Uuid, vehicle_id: Uuid },
}

impl PricingKey {
    pub fn vehicle_id(&self) -> Uuid {
        match self {
            PricingKey::Vehicle { vehicle_id, .. } | PricingKey::Location { vehicle_id, .. } => {
                *vehicle_id
            }
        }
    }

    pub fn scope_label(&self) -> &'static str {
        match self {
            PricingKey::Vehicle { .. } => "vehicle",
            PricingKey::Location { .. } => "location",
        }
    }
}

impl fmt::Display for PricingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingKey::Vehicle { vehicle_id, mode } => write!(f, "vehicle {vehicle_id} ({mode})"),
            PricingKey::Location {
                location_id,
                vehicle_id,
            } => write!(f, "location {location_id} / vehicle {vehicle_id}"),
        }
    }
}

/// Everything an admin edits; the body of a pricing upsert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PricingPayload {
    #[serde(default)]
    pub zone: String,
    #[serde(flatten)]
    pub rates: PricingRates,
    #[serde(default)]
    pub extras: Extras,
    #[serde(default)]
    pub display_vat_inclusive: bool,
    #[serde(default)]
    pub display_parking_inclusive: bool,
    #[serde(default)]
    pub price_round_off: bool,
    #[serde(default)]
    pub status: PricingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PricingRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<Uuid>,
    pub zone: String,
    #[serde(flatten)]
    pub rates: PricingRates,
    pub extras: Extras,
    pub display_vat_inclusive: bool,
    pub display_parking_inclusive: bool,
    pub price_round_off: bool,
    pub status: PricingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PricingRecord {
    pub fn new(id: Uuid, key: PricingKey, payload: PricingPayload, now: DateTime<Utc>) -> Self {
        let location_id = match key {
            PricingKey::Location { location_id, .. } => Some(location_id),
            PricingKey::Vehicle { .. } => None,
        };

        Self {
            id,
            vehicle_id: key.vehicle_id(),
            location_id,
            zone: payload.zone,
            rates: payload.rates,
            extras: payload.extras,
            display_vat_inclusive: payload.display_vat_inclusive,
            display_parking_inclusive: payload.display_parking_inclusive,
            price_round_off: payload.price_round_off,
            status: payload.status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> PricingKey {
        match self.location_id {
            Some(location_id) => PricingKey::Location {
                location_id,
                vehicle_id: self.vehicle_id,
            },
            None => PricingKey::Vehicle {
                vehicle_id: self.vehicle_id,
                mode: self.rates.mode(),
            },
        }
    }

    /// The editable part of the record, without server-assigned fields.
    pub fn payload(&self) -> PricingPayload {
        PricingPayload {
            zone: self.zone.clone(),
            rates: self.rates.clone(),
            extras: self.extras.clone(),
            display_vat_inclusive: self.display_vat_inclusive,
            display_parking_inclusive: self.display_parking_inclusive,
            price_round_off: self.price_round_off,
            status: self.status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PricingStatus::Active
    }
}
