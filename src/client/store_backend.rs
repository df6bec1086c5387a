use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::client::backend::PricingBackend;
use crate::client::error::ClientError;
use crate::models::location::{Location, LocationInput};
use crate::models::pricing::{PricingKey, PricingPayload, PricingRecord};
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::store;

/// Backend that calls the store of a server running in the same process.
#[derive(Clone)]
pub struct StoreBackend {
    state: Arc<AppState>,
}

impl StoreBackend {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl PricingBackend for StoreBackend {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ClientError> {
        Ok(store::vehicles::list_vehicles(&self.state))
    }

    async fn list_locations(&self) -> Result<Vec<Location>, ClientError> {
        Ok(store::locations::list_locations(&self.state))
    }

    async fn get_location(&self, id: Uuid) -> Result<Location, ClientError> {
        Ok(store::locations::get_location(&self.state, id)?)
    }

    async fn create_location(&self, input: &LocationInput) -> Result<Location, ClientError> {
        Ok(store::locations::create_location(&self.state, input.clone())?)
    }

    async fn update_location(
        &self,
        id: Uuid,
        input: &LocationInput,
    ) -> Result<Location, ClientError> {
        Ok(store::locations::update_location(&self.state, id, input.clone())?)
    }

    async fn delete_location(&self, id: Uuid) -> Result<(), ClientError> {
        store::locations::delete_location(&self.state, id)?;
        Ok(())
    }

    async fn fetch_pricing(&self, key: PricingKey) -> Result<Option<PricingRecord>, ClientError> {
        Ok(store::pricing::get_pricing(&self.state, &key))
    }

    async fn save_pricing(
        &self,
        key: PricingKey,
        payload: &PricingPayload,
    ) -> Result<PricingRecord, ClientError> {
        Ok(store::pricing::upsert_pricing(&self.state, key, payload.clone())?)
    }

    async fn list_location_pricing(
        &self,
        location_id: Uuid,
    ) -> Result<Vec<PricingRecord>, ClientError> {
        Ok(store::pricing::list_location_pricing(&self.state, location_id)?)
    }
}
