use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::client::backend::PricingBackend;
use crate::client::error::ClientError;
use crate::client::session::Session;
use crate::config::ClientConfig;
use crate::models::location::{Location, LocationInput};
use crate::models::pricing::{PricingKey, PricingPayload, PricingRecord};
use crate::models::vehicle::Vehicle;
use crate::pricing::validation::ValidationIssue;

/// Backend reached over the REST API.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    session: Session,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    #[serde(default)]
    issues: Vec<ValidationIssue>,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn pricing_path(key: &PricingKey) -> String {
        match key {
            PricingKey::Vehicle { vehicle_id, mode } => {
                format!("/vehicles/{vehicle_id}/pricing/{mode}")
            }
            PricingKey::Location {
                location_id,
                vehicle_id,
            } => format!("/locations/{location_id}/pricing/{vehicle_id}"),
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let builder = match self.session.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        Ok(builder.send().await?)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = check_status(self.send(builder).await?).await?;
        Ok(response.json::<T>().await?)
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthenticated);
    }

    let body = response.json::<ErrorBody>().await.ok();
    debug!(status = status.as_u16(), "pricing api request failed");

    match body {
        Some(body) if status == StatusCode::UNPROCESSABLE_ENTITY && !body.issues.is_empty() => {
            Err(ClientError::Validation(body.issues))
        }
        body => Err(ClientError::Backend {
            status: status.as_u16(),
            message: body.and_then(|b| b.error),
        }),
    }
}

#[async_trait]
impl PricingBackend for HttpBackend {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ClientError> {
        self.send_json(self.client.get(self.url("/vehicles"))).await
    }

    async fn list_locations(&self) -> Result<Vec<Location>, ClientError> {
        self.send_json(self.client.get(self.url("/locations"))).await
    }

    async fn get_location(&self, id: Uuid) -> Result<Location, ClientError> {
        self.send_json(self.client.get(self.url(&format!("/locations/{id}"))))
            .await
    }

    async fn create_location(&self, input: &LocationInput) -> Result<Location, ClientError> {
        self.send_json(self.client.post(self.url("/locations")).json(input))
            .await
    }

    async fn update_location(
        &self,
        id: Uuid,
        input: &LocationInput,
    ) -> Result<Location, ClientError> {
        self.send_json(
            self.client
                .put(self.url(&format!("/locations/{id}")))
                .json(input),
        )
        .await
    }

    async fn delete_location(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .send(self.client.delete(self.url(&format!("/locations/{id}"))))
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn fetch_pricing(&self, key: PricingKey) -> Result<Option<PricingRecord>, ClientError> {
        let response = self
            .send(self.client.get(self.url(&Self::pricing_path(&key))))
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(key = %key, "no stored pricing");
            return Ok(None);
        }

        let response = check_status(response).await?;
        Ok(Some(response.json::<PricingRecord>().await?))
    }

    async fn save_pricing(
        &self,
        key: PricingKey,
        payload: &PricingPayload,
    ) -> Result<PricingRecord, ClientError> {
        self.send_json(
            self.client
                .put(self.url(&Self::pricing_path(&key)))
                .json(payload),
        )
        .await
    }

    async fn list_location_pricing(
        &self,
        location_id: Uuid,
    ) -> Result<Vec<PricingRecord>, ClientError> {
        self.send_json(
            self.client
                .get(self.url(&format!("/locations/{location_id}/pricing"))),
        )
        .await
    }
}
