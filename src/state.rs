use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::location::Location;
use crate::models::pricing::{PricingKey, PricingRecord};
use crate::models::vehicle::Vehicle;
use crate::observability::metrics::Metrics;
use crate::store::PricingEvent;

pub struct AppState {
    pub vehicles: DashMap<Uuid, Vehicle>,
    pub locations: DashMap<Uuid, Location>,
    pub pricing: DashMap<PricingKey, PricingRecord>,
    pub pricing_events_tx: broadcast::Sender<PricingEvent>,
    /// Bearer token required on mutating routes; `None` leaves them open.
    pub admin_token: Option<String>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(event_buffer_size: usize, admin_token: Option<String>) -> Self {
        let (pricing_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            vehicles: DashMap::new(),
            locations: DashMap::new(),
            pricing: DashMap::new(),
            pricing_events_tx,
            admin_token,
            metrics: Metrics::new(),
        }
    }
}
