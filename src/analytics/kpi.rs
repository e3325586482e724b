//! Summary tiles and performance ratios

use serde::Serialize;

use super::monthly::MonthlyValue;
use crate::models::{BookingStatus, Snapshot};

/// Headline counts shown as tiles
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub users: usize,
    pub cars: usize,
    pub bookings: usize,
    /// Sum of every payment amount
    pub revenue: f64,
}

impl SummaryStats {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            users: snapshot.users.len(),
            cars: snapshot.cars.len(),
            bookings: snapshot.bookings.len(),
            revenue: snapshot.payments.iter().map(|p| p.amount).sum(),
        }
    }
}

/// Performance ratios; each is 0 when its denominator is 0
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    /// PAID bookings as a percentage of all bookings
    pub booking_success_rate: f64,
    pub average_revenue_per_booking: f64,
    pub bookings_per_car: f64,
    /// Average rental length in days for the latest month
    pub latest_average_duration: f64,
}

impl Kpis {
    pub fn compute(
        stats: &SummaryStats,
        snapshot: &Snapshot,
        average_duration: &[MonthlyValue<f64>],
    ) -> Self {
        let paid = snapshot
            .bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Paid)
            .count();

        Self {
            booking_success_rate: ratio(paid as f64, stats.bookings as f64) * 100.0,
            average_revenue_per_booking: ratio(stats.revenue, stats.bookings as f64),
            bookings_per_car: ratio(stats.bookings as f64, stats.cars as f64),
            latest_average_duration: average_duration.last().map(|m| m.value).unwrap_or(0.0),
        }
    }
}

/// `numerator / denominator`, or 0 for a zero denominator
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
