//! Storage operations shared by the REST handlers and the in-process backend.

pub mod locations;
pub mod pricing;
pub mod vehicles;

use serde::{Deserialize, Serialize};

use crate::models::pricing::{PricingKey, PricingRecord};

/// Change notification pushed to websocket subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PricingEvent {
    Saved { record: PricingRecord },
    Deleted { key: PricingKey },
}
