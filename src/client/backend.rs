use async_trait::async_trait;
use uuid::Uuid;

use crate::client::error::ClientError;
use crate::models::location::{Location, LocationInput};
use crate::models::pricing::{PricingKey, PricingPayload, PricingRecord};
use crate::models::vehicle::Vehicle;

/// Operations the pricing editors need from the backend.
///
/// A missing pricing record is `Ok(None)`: the editor treats it as
/// "create new", never as an error.
#[async_trait]
pub trait PricingBackend: Send + Sync {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ClientError>;

    async fn list_locations(&self) -> Result<Vec<Location>, ClientError>;

    async fn get_location(&self, id: Uuid) -> Result<Location, ClientError>;

    async fn create_location(&self, input: &LocationInput) -> Result<Location, ClientError>;

    async fn update_location(&self, id: Uuid, input: &LocationInput)
        -> Result<Location, ClientError>;

    async fn delete_location(&self, id: Uuid) -> Result<(), ClientError>;

    async fn fetch_pricing(&self, key: PricingKey) -> Result<Option<PricingRecord>, ClientError>;

    async fn save_pricing(
        &self,
        key: PricingKey,
        payload: &PricingPayload,
    ) -> Result<PricingRecord, ClientError>;

    async fn list_location_pricing(
        &self,
        location_id: Uuid,
    ) -> Result<Vec<PricingRecord>, ClientError>;
}
