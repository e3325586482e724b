//! Rental Backend Access
//!
//! Every unit reaches the backend through the [`RentalApi`] capability so
//! that views can be driven by the real HTTP client, a recorded fixture,
//! or a test double.
//!
//! ## Endpoints
//!
//! - `GET /cars`, `GET /cars/search?{model,brand,type,minPrice,maxPrice}`
//! - `GET /users`, `GET /users/me`
//! - `GET /bookings`
//! - `GET /payments/all`

mod fixture;
mod http;

pub use fixture::FixtureApi;
pub use http::HttpRentalClient;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{Booking, Car, Payment, User};

/// Query string pairs for `/cars/search`
pub type QueryParams = Vec<(&'static str, String)>;

/// Read access to the rental backend
#[async_trait]
pub trait RentalApi: Send + Sync {
    /// `GET /cars`
    async fn list_cars(&self) -> Result<Vec<Car>, ClientError>;

    /// `GET /cars/search` with the given, already non-empty, parameters
    async fn search_cars(&self, params: &[(&'static str, String)]) -> Result<Vec<Car>, ClientError>;

    /// `GET /users`
    async fn list_users(&self) -> Result<Vec<User>, ClientError>;

    /// `GET /users/me`
    async fn current_user(&self) -> Result<User, ClientError>;

    /// `GET /bookings`
    async fn list_bookings(&self) -> Result<Vec<Booking>, ClientError>;

    /// `GET /payments/all`
    async fn list_payments(&self) -> Result<Vec<Payment>, ClientError>;
}

/// Errors that can occur when talking to the backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Rental backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Failed to load fixture {path:?}: {error}")]
    Fixture { path: PathBuf, error: String },
}

impl ClientError {
    /// Classify a transport error the way callers care about it
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(e)
        }
    }
}
