//! Offline backend replay
//!
//! Serves a recorded JSON snapshot through [`RentalApi`], for demos and for
//! running the dashboard without a live backend. The file holds the four
//! collections plus an optional `me` record:
//!
//! ```json
//! { "users": [], "cars": [], "bookings": [], "payments": [], "me": null }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use super::{ClientError, RentalApi};
use crate::models::{Booking, Car, Payment, Snapshot, User};

/// [`RentalApi`] backed by an in-memory snapshot
#[derive(Debug, Clone, Default)]
pub struct FixtureApi {
    snapshot: Snapshot,
    me: Option<User>,
}

#[derive(Deserialize)]
struct FixtureFile {
    #[serde(flatten)]
    snapshot: Snapshot,
    #[serde(default)]
    me: Option<User>,
}

impl FixtureApi {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot, me: None }
    }

    /// Builder method: set the record returned by `/users/me`
    pub fn with_current_user(mut self, user: User) -> Self {
        self.me = Some(user);
        self
    }

    /// Load a fixture from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let fixture_error = |error: String| ClientError::Fixture {
            path: path.to_path_buf(),
            error,
        };

        let content = std::fs::read_to_string(path).map_err(|e| fixture_error(e.to_string()))?;
        let file: FixtureFile =
            serde_json::from_str(&content).map_err(|e| fixture_error(e.to_string()))?;

        tracing::info!(
            path = %path.display(),
            users = file.snapshot.users.len(),
            cars = file.snapshot.cars.len(),
            bookings = file.snapshot.bookings.len(),
            payments = file.snapshot.payments.len(),
            "Loaded fixture"
        );

        Ok(Self {
            snapshot: file.snapshot,
            me: file.me,
        })
    }

    fn matches(car: &Car, params: &[(&'static str, String)]) -> Result<bool, ClientError> {
        for (key, value) in params {
            let keep = match *key {
                "brand" => car.brand.eq_ignore_ascii_case(value),
                "model" => car.model.eq_ignore_ascii_case(value),
                "type" => car.car_type.eq_ignore_ascii_case(value),
                "minPrice" => car.price_per_day >= parse_price(key, value)?,
                "maxPrice" => car.price_per_day <= parse_price(key, value)?,
                _ => true,
            };
            if !keep {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn parse_price(key: &str, value: &str) -> Result<f64, ClientError> {
    value.trim().parse().map_err(|_| ClientError::ApiError {
        status: 400,
        message: format!("{} must be a number, got {:?}", key, value),
    })
}

#[async_trait]
impl RentalApi for FixtureApi {
    async fn list_cars(&self) -> Result<Vec<Car>, ClientError> {
        Ok(self.snapshot.cars.clone())
    }

    async fn search_cars(&self, params: &[(&'static str, String)]) -> Result<Vec<Car>, ClientError> {
        let mut found = Vec::new();
        for car in &self.snapshot.cars {
            if Self::matches(car, params)? {
                found.push(car.clone());
            }
        }
        Ok(found)
    }

    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        Ok(self.snapshot.users.clone())
    }

    async fn current_user(&self) -> Result<User, ClientError> {
        self.me.clone().ok_or(ClientError::ApiError {
            status: 401,
            message: "no current user in fixture".to_string(),
        })
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, ClientError> {
        Ok(self.snapshot.bookings.clone())
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, ClientError> {
        Ok(self.snapshot.payments.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fleet() -> FixtureApi {
        FixtureApi::new(Snapshot {
            cars: vec![
                Car::new(1, "Toyota", "Corolla", "Sedan").price_per_day(2500.0),
                Car::new(2, "Toyota", "Fortuner", "SUV").price_per_day(5500.0),
                Car::new(3, "Honda", "City", "Sedan").price_per_day(2200.0),
            ],
            ..Snapshot::default()
        })
    }

    #[tokio::test]
    async fn test_search_by_brand_and_price() {
        let api = fleet();
        let params = vec![("brand", "toyota".to_string()), ("maxPrice", "3000".to_string())];

        let cars = api.search_cars(&params).await.unwrap();
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].model, "Corolla");
    }

    #[tokio::test]
    async fn test_search_rejects_bad_price() {
        let api = fleet();
        let params = vec![("minPrice", "cheap".to_string())];

        let err = api.search_cars(&params).await.unwrap_err();
        assert!(matches!(err, ClientError::ApiError { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_current_user_requires_me() {
        let api = fleet();
        assert!(api.current_user().await.is_err());

        let api = api.with_current_user(User::new(1, "Admin", "admin@rentify.io"));
        assert_eq!(api.current_user().await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "cars": [{{"id": 4, "brand": "Kia", "model": "Seltos", "type": "SUV"}}],
                "bookings": [{{"id": 1, "carId": 4, "userId": 2, "status": "PAID"}}],
                "me": {{"id": 2, "name": "Asha", "email": "asha@rentify.io"}}
            }}"#
        )
        .unwrap();

        let api = FixtureApi::from_path(file.path()).unwrap();
        assert_eq!(api.list_cars().await.unwrap().len(), 1);
        assert_eq!(api.list_bookings().await.unwrap().len(), 1);
        assert!(api.list_users().await.unwrap().is_empty());
        assert_eq!(api.current_user().await.unwrap().name, "Asha");
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = FixtureApi::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ClientError::Fixture { .. }));
    }
}
