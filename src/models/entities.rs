//! Car, booking, payment and user records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::timestamp::parse_timestamp;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// A rentable car
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    /// Body style as the backend names it ("SUV", "Sedan", ...)
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub car_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_per_day: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
}

impl Car {
    pub fn new(
        id: i64,
        brand: impl Into<String>,
        model: impl Into<String>,
        car_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            brand: brand.into(),
            model: model.into(),
            car_type: car_type.into(),
            price_per_day: 0.0,
            available: true,
            image_url: None,
            description: None,
            seats: None,
            fuel_type: None,
            transmission: None,
        }
    }

    /// Builder method: set the daily price
    pub fn price_per_day(mut self, price: f64) -> Self {
        self.price_per_day = price;
        self
    }

    /// Builder method: set availability
    pub fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// "Brand Model", as shown on chart axes and tables
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// Lifecycle state of a booking
///
/// The backend sends bare strings. Known states are matched
/// case-insensitively; anything else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Booked,
    Paid,
    Cancelled,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Booked => "BOOKED",
            BookingStatus::Paid => "PAID",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Other(s) => s,
        }
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Other("UNKNOWN".to_string())
    }
}

impl From<String> for BookingStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "BOOKED" => BookingStatus::Booked,
            "PAID" => BookingStatus::Paid,
            "CANCELLED" | "CANCELED" => BookingStatus::Cancelled,
            _ => BookingStatus::Other(raw),
        }
    }
}

impl From<&str> for BookingStatus {
    fn from(raw: &str) -> Self {
        BookingStatus::from(raw.to_string())
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reservation of a car by a user over a date range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    #[serde(default)]
    pub car_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BookingStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
}

impl Booking {
    pub fn new(id: i64, car_id: i64, user_id: i64) -> Self {
        Self {
            id,
            car_id: Some(car_id),
            user_id: Some(user_id),
            status: BookingStatus::Booked,
            created_at: None,
            start_date: None,
            end_date: None,
            total_price: None,
        }
    }

    /// Builder method: set the status
    pub fn status(mut self, status: impl Into<BookingStatus>) -> Self {
        self.status = status.into();
        self
    }

    /// Builder method: set the creation timestamp
    pub fn created_at(mut self, at: impl Into<String>) -> Self {
        self.created_at = Some(at.into());
        self
    }

    /// Builder method: set the rental period
    pub fn period(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    /// Parsed creation time, if present and well-formed
    pub fn created(&self) -> Option<NaiveDateTime> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Rental length in fractional days
    ///
    /// `None` unless both ends of the period parse.
    pub fn duration_days(&self) -> Option<f64> {
        let start = self.start_date.as_deref().and_then(parse_timestamp)?;
        let end = self.end_date.as_deref().and_then(parse_timestamp)?;
        Some((end - start).num_milliseconds() as f64 / MILLIS_PER_DAY)
    }
}

/// A payment settling a booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    #[serde(default)]
    pub booking_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default)]
    pub payment_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Payment {
    pub fn new(id: i64, booking_id: i64, amount: f64) -> Self {
        Self {
            id,
            booking_id: Some(booking_id),
            amount,
            payment_time: None,
            method: None,
        }
    }

    /// Builder method: set the payment timestamp
    pub fn paid_at(mut self, at: impl Into<String>) -> Self {
        self.payment_time = Some(at.into());
        self
    }

    /// Parsed payment time, if present and well-formed
    pub fn paid(&self) -> Option<NaiveDateTime> {
        self.payment_time.as_deref().and_then(parse_timestamp)
    }
}

/// A registered platform user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at: None,
            role: None,
        }
    }

    /// Builder method: set the registration timestamp
    pub fn created_at(mut self, at: impl Into<String>) -> Self {
        self.created_at = Some(at.into());
        self
    }

    /// Parsed registration time, if present and well-formed
    pub fn registered(&self) -> Option<NaiveDateTime> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

/// The four collections behind one dashboard load
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Snapshot {
    pub fn new(
        users: Vec<User>,
        cars: Vec<Car>,
        bookings: Vec<Booking>,
        payments: Vec<Payment>,
    ) -> Self {
        Self {
            users,
            cars,
            bookings,
            payments,
        }
    }

    /// Default-fill and de-duplicate before aggregation
    ///
    /// Records repeating an earlier id are dropped (first wins). Payment
    /// amounts that are negative or not finite count as 0.
    pub fn sanitize(mut self) -> Self {
        dedup_by_id(&mut self.users, |u| u.id);
        dedup_by_id(&mut self.cars, |c| c.id);
        dedup_by_id(&mut self.bookings, |b| b.id);
        dedup_by_id(&mut self.payments, |p| p.id);

        for payment in &mut self.payments {
            if !payment.amount.is_finite() || payment.amount < 0.0 {
                tracing::debug!(payment_id = payment.id, amount = payment.amount, "Zeroing invalid payment amount");
                payment.amount = 0.0;
            }
        }

        self
    }
}

fn dedup_by_id<T>(items: &mut Vec<T>, id: impl Fn(&T) -> i64) {
    let before = items.len();
    let mut seen = std::collections::HashSet::with_capacity(before);
    items.retain(|item| seen.insert(id(item)));

    if items.len() != before {
        tracing::warn!(dropped = before - items.len(), "Dropped records with duplicate ids");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_from_backend_json() {
        let json = r#"{
            "id": 7,
            "brand": "Toyota",
            "model": "Corolla",
            "type": "Sedan",
            "pricePerDay": 2500.0,
            "available": true,
            "imageUrl": "https://cdn.example/corolla.jpg"
        }"#;

        let car: Car = serde_json::from_str(json).unwrap();
        assert_eq!(car.car_type, "Sedan");
        assert_eq!(car.price_per_day, 2500.0);
        assert_eq!(car.display_name(), "Toyota Corolla");
        assert_eq!(car.image_url.as_deref(), Some("https://cdn.example/corolla.jpg"));
    }

    #[test]
    fn test_null_fields_default() {
        let json = r#"{"id": 1, "brand": null, "model": "X5", "type": null, "pricePerDay": null}"#;
        let car: Car = serde_json::from_str(json).unwrap();
        assert_eq!(car.brand, "");
        assert_eq!(car.car_type, "");
        assert_eq!(car.price_per_day, 0.0);
    }

    #[test]
    fn test_status_case_insensitive() {
        assert_eq!(BookingStatus::from("paid"), BookingStatus::Paid);
        assert_eq!(BookingStatus::from(" Booked "), BookingStatus::Booked);
        assert_eq!(BookingStatus::from("CANCELED"), BookingStatus::Cancelled);
        assert_eq!(
            BookingStatus::from("REFUNDED"),
            BookingStatus::Other("REFUNDED".to_string())
        );
    }

    #[test]
    fn test_booking_from_backend_json() {
        let json = r#"{
            "id": 3,
            "carId": 7,
            "userId": 2,
            "status": "Paid",
            "createdAt": "2026-05-02T10:15:00",
            "startDate": "2026-05-10",
            "endDate": "2026-05-13"
        }"#;

        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.status, BookingStatus::Paid);
        assert_eq!(booking.car_id, Some(7));
        assert!(booking.created().is_some());
        assert_eq!(booking.duration_days(), Some(3.0));

        let out = serde_json::to_value(&booking).unwrap();
        assert_eq!(out["status"], "PAID");
    }

    #[test]
    fn test_missing_status_and_dates() {
        let booking: Booking = serde_json::from_str(r#"{"id": 9, "status": null}"#).unwrap();
        assert_eq!(booking.status, BookingStatus::default());
        assert!(booking.created().is_none());
        assert!(booking.duration_days().is_none());
    }

    #[test]
    fn test_sanitize_drops_duplicates_and_bad_amounts() {
        let snapshot = Snapshot::new(
            vec![User::new(1, "A", "a@x.io"), User::new(1, "B", "b@x.io")],
            vec![],
            vec![],
            vec![
                Payment::new(1, 1, -50.0),
                Payment::new(2, 2, f64::NAN),
                Payment::new(3, 3, 120.0),
            ],
        )
        .sanitize();

        assert_eq!(snapshot.users.len(), 1);
        assert_eq!(snapshot.users[0].name, "A");
        let amounts: Vec<f64> = snapshot.payments.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![0.0, 0.0, 120.0]);
    }
}
