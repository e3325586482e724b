//! Categorical breakdowns and time-of-week histograms

use chrono::{Datelike, Timelike};
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::Lookup;
use crate::models::{Booking, Car};

/// Key used for cars whose type is blank
pub const UNSPECIFIED_TYPE: &str = "Unspecified";

/// Weekday names, Sunday first
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

fn type_key(car: &Car) -> String {
    if car.car_type.is_empty() {
        UNSPECIFIED_TYPE.to_string()
    } else {
        car.car_type.clone()
    }
}

/// Booking counts keyed by status
pub fn bookings_by_status(bookings: &[Booking]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for booking in bookings {
        *counts.entry(booking.status.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Fleet size keyed by car type
pub fn cars_by_type(cars: &[Car]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for car in cars {
        *counts.entry(type_key(car)).or_insert(0) += 1;
    }
    counts
}

/// Paid revenue keyed by the booked car's type
///
/// A booking counts only when both its car and its payment are known.
pub fn revenue_by_car_type(bookings: &[Booking], lookup: &Lookup<'_>) -> BTreeMap<String, f64> {
    let mut revenue = BTreeMap::new();
    for booking in bookings {
        let car = booking.car_id.and_then(|id| lookup.car(id));
        let payment = lookup.payment_for(booking.id);

        if let (Some(car), Some(payment)) = (car, payment) {
            *revenue.entry(type_key(car)).or_insert(0.0) += payment.amount;
        }
    }
    revenue
}

/// Bookings per weekday of creation, Sunday first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekdayHistogram(pub [usize; 7]);

impl WeekdayHistogram {
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        let mut buckets = [0usize; 7];
        for created in bookings.iter().filter_map(Booking::created) {
            buckets[created.weekday().num_days_from_sunday() as usize] += 1;
        }
        Self(buckets)
    }

    /// `(weekday name, count)` pairs, Sunday first
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        WEEKDAYS.iter().copied().zip(self.0.iter().copied())
    }
}

impl Serialize for WeekdayHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Bookings per hour of creation, 0 through 23
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourHistogram(pub [usize; 24]);

impl Default for HourHistogram {
    fn default() -> Self {
        Self([0; 24])
    }
}

impl HourHistogram {
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        let mut buckets = [0usize; 24];
        for created in bookings.iter().filter_map(Booking::created) {
            buckets[created.hour() as usize] += 1;
        }
        Self(buckets)
    }

    /// `(hour, count)` pairs in hour order
    pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        (0u32..).zip(self.0.iter().copied())
    }
}

impl Serialize for HourHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
