//! Rental backend REST client
//!
//! Thin reqwest wrapper: one GET per collection, optional bearer token,
//! no retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

use super::{ClientError, RentalApi};
use crate::config::BackendConfig;
use crate::models::{Booking, Car, Payment, User};

/// HTTP implementation of [`RentalApi`]
pub struct HttpRentalClient {
    client: Client,
    config: BackendConfig,
}

impl HttpRentalClient {
    /// Create a new client with the given backend configuration
    pub fn new(config: BackendConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ClientError> {
        let started = Instant::now();

        let mut request = self.client.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ClientError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(path, status = status.as_u16(), "Backend returned an error");
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(ClientError::from_transport)?;
        let value = serde_json::from_slice(&body).map_err(|e| ClientError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            path,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched from backend"
        );

        Ok(value)
    }
}

#[async_trait]
impl RentalApi for HttpRentalClient {
    async fn list_cars(&self) -> Result<Vec<Car>, ClientError> {
        self.get_json("/cars", &[]).await
    }

    async fn search_cars(&self, params: &[(&'static str, String)]) -> Result<Vec<Car>, ClientError> {
        self.get_json("/cars/search", params).await
    }

    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.get_json("/users", &[]).await
    }

    async fn current_user(&self) -> Result<User, ClientError> {
        self.get_json("/users/me", &[]).await
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, ClientError> {
        self.get_json("/bookings", &[]).await
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, ClientError> {
        self.get_json("/payments/all", &[]).await
    }
}
