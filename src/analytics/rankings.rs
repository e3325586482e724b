//! Per-car and per-customer top-10 tables

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::Lookup;
use crate::models::{Booking, Car, User};

/// Rows kept in every ranking
pub const TOP_N: usize = 10;

/// Utilization points per booking; ten bookings saturate the score
const UTILIZATION_PER_BOOKING: usize = 10;
const UTILIZATION_CAP: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarUtilization {
    pub car_id: i64,
    pub car_name: String,
    /// 0–100
    pub utilization: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularCar {
    pub car_id: i64,
    pub car_name: String,
    pub booking_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerValue {
    pub user_id: i64,
    pub customer_name: String,
    pub total_revenue: f64,
    pub booking_count: usize,
}

/// Heuristic utilization score for a booking count, capped at 100
pub fn utilization_score(bookings: usize) -> u32 {
    bookings
        .saturating_mul(UTILIZATION_PER_BOOKING)
        .min(UTILIZATION_CAP) as u32
}

/// Bookings per car id
pub fn bookings_per_car(bookings: &[Booking]) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for car_id in bookings.iter().filter_map(|b| b.car_id) {
        *counts.entry(car_id).or_insert(0) += 1;
    }
    counts
}

/// Top 10 cars by utilization score, highest first
///
/// Ties keep fleet order.
pub fn car_utilization(cars: &[Car], bookings: &[Booking]) -> Vec<CarUtilization> {
    let counts = bookings_per_car(bookings);

    let mut rows: Vec<CarUtilization> = cars
        .iter()
        .map(|car| CarUtilization {
            car_id: car.id,
            car_name: car.display_name(),
            utilization: utilization_score(counts.get(&car.id).copied().unwrap_or(0)),
        })
        .collect();

    rows.sort_by(|a, b| b.utilization.cmp(&a.utilization));
    rows.truncate(TOP_N);
    rows
}

/// Top 10 cars by booking count, highest first
pub fn popular_cars(cars: &[Car], bookings: &[Booking]) -> Vec<PopularCar> {
    let counts = bookings_per_car(bookings);

    let mut rows: Vec<PopularCar> = cars
        .iter()
        .map(|car| PopularCar {
            car_id: car.id,
            car_name: car.display_name(),
            booking_count: counts.get(&car.id).copied().unwrap_or(0),
        })
        .collect();

    rows.sort_by(|a, b| b.booking_count.cmp(&a.booking_count));
    rows.truncate(TOP_N);
    rows
}

/// Top 10 paying customers
///
/// Revenue is the sum of the payments linked to each of the user's
/// bookings. Users who paid nothing are left out.
pub fn customer_lifetime_value(users: &[User], bookings: &[Booking], lookup: &Lookup<'_>) -> Vec<CustomerValue> {
    let mut per_user: HashMap<i64, (f64, usize)> = HashMap::new();
    for booking in bookings {
        let Some(user_id) = booking.user_id else {
            continue;
        };
        let entry = per_user.entry(user_id).or_insert((0.0, 0));
        entry.0 += lookup.payment_for(booking.id).map(|p| p.amount).unwrap_or(0.0);
        entry.1 += 1;
    }

    let mut rows: Vec<CustomerValue> = users
        .iter()
        .filter_map(|user| {
            let (total_revenue, booking_count) = per_user.get(&user.id).copied()?;
            (total_revenue > 0.0).then(|| CustomerValue {
                user_id: user.id,
                customer_name: user.name.clone(),
                total_revenue,
                booking_count,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_revenue
            .partial_cmp(&a.total_revenue)
            .unwrap_or(Ordering::Equal)
    });
    rows.truncate(TOP_N);
    rows
}
