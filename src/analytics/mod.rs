//! Dashboard Analytics
//!
//! Pure aggregations over one [`Snapshot`]. Nothing here performs I/O; the
//! [`dashboard`](crate::dashboard) pipeline fetches the snapshot and hands
//! it to [`DashboardReport::build`].
//!
//! ## Series
//!
//! - **Monthly** (revenue, registrations, bookings, average duration): six
//!   calendar months ending with the reference month
//! - **Rankings** (utilization, popular cars, customer value): top 10
//! - **Distributions**: status, car type, revenue by type, weekday, hour
//! - **KPIs**: success rate, revenue per booking, bookings per car

mod charts;
mod distribution;
mod kpi;
mod monthly;
mod rankings;

pub use charts::{ChartData, DashboardCharts, Dataset};
pub use distribution::{
    bookings_by_status, cars_by_type, revenue_by_car_type, HourHistogram, WeekdayHistogram,
    UNSPECIFIED_TYPE, WEEKDAYS,
};
pub use kpi::{ratio, Kpis, SummaryStats};
pub use monthly::{
    month_window, monthly_average_duration, monthly_bookings, monthly_registrations,
    monthly_revenue, MonthSlot, MonthlyValue, MONTHS_SHOWN,
};
pub use rankings::{
    bookings_per_car, car_utilization, customer_lifetime_value, popular_cars, utilization_score,
    CarUtilization, CustomerValue, PopularCar, TOP_N,
};

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use crate::models::{Car, Payment, Snapshot};

/// Id indexes shared by the join-style aggregations
pub struct Lookup<'a> {
    cars: HashMap<i64, &'a Car>,
    payments: HashMap<i64, &'a Payment>,
}

impl<'a> Lookup<'a> {
    /// Index cars by id and payments by booking id
    ///
    /// When several payments reference one booking the first one wins.
    pub fn new(cars: &'a [Car], payments: &'a [Payment]) -> Self {
        let mut by_booking = HashMap::with_capacity(payments.len());
        for payment in payments {
            if let Some(booking_id) = payment.booking_id {
                by_booking.entry(booking_id).or_insert(payment);
            }
        }

        let mut by_id = HashMap::with_capacity(cars.len());
        for car in cars {
            by_id.entry(car.id).or_insert(car);
        }

        Self {
            cars: by_id,
            payments: by_booking,
        }
    }

    pub fn car(&self, id: i64) -> Option<&'a Car> {
        self.cars.get(&id).copied()
    }

    pub fn payment_for(&self, booking_id: i64) -> Option<&'a Payment> {
        self.payments.get(&booking_id).copied()
    }
}

/// Everything the admin dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// Reference date the monthly windows end on
    pub generated_for: NaiveDate,
    pub stats: SummaryStats,
    pub kpis: Kpis,
    pub monthly_revenue: Vec<MonthlyValue<f64>>,
    pub user_registrations: Vec<MonthlyValue<usize>>,
    pub monthly_bookings: Vec<MonthlyValue<usize>>,
    pub average_booking_duration: Vec<MonthlyValue<f64>>,
    pub bookings_by_status: BTreeMap<String, usize>,
    pub cars_by_type: BTreeMap<String, usize>,
    pub revenue_by_car_type: BTreeMap<String, f64>,
    pub bookings_by_day_of_week: WeekdayHistogram,
    pub bookings_by_hour: HourHistogram,
    pub car_utilization: Vec<CarUtilization>,
    pub customer_lifetime_value: Vec<CustomerValue>,
    pub popular_cars: Vec<PopularCar>,
}

impl DashboardReport {
    /// Run every aggregation over `snapshot`, with monthly windows ending
    /// in the month of `today`
    pub fn build(snapshot: &Snapshot, today: NaiveDate) -> Self {
        let started = Instant::now();
        let lookup = Lookup::new(&snapshot.cars, &snapshot.payments);

        let stats = SummaryStats::from_snapshot(snapshot);
        let average_booking_duration = monthly_average_duration(&snapshot.bookings, today);
        let kpis = Kpis::compute(&stats, snapshot, &average_booking_duration);

        let report = Self {
            generated_for: today,
            monthly_revenue: monthly_revenue(&snapshot.payments, today),
            user_registrations: monthly_registrations(&snapshot.users, today),
            monthly_bookings: monthly_bookings(&snapshot.bookings, today),
            average_booking_duration,
            bookings_by_status: bookings_by_status(&snapshot.bookings),
            cars_by_type: cars_by_type(&snapshot.cars),
            revenue_by_car_type: revenue_by_car_type(&snapshot.bookings, &lookup),
            bookings_by_day_of_week: WeekdayHistogram::from_bookings(&snapshot.bookings),
            bookings_by_hour: HourHistogram::from_bookings(&snapshot.bookings),
            car_utilization: car_utilization(&snapshot.cars, &snapshot.bookings),
            customer_lifetime_value: customer_lifetime_value(
                &snapshot.users,
                &snapshot.bookings,
                &lookup,
            ),
            popular_cars: popular_cars(&snapshot.cars, &snapshot.bookings),
            stats,
            kpis,
        };

        tracing::debug!(
            users = report.stats.users,
            cars = report.stats.cars,
            bookings = report.stats.bookings,
            elapsed_us = started.elapsed().as_micros() as u64,
            "Built dashboard report"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Booking, User};

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                User::new(1, "Asha", "asha@x.io").created_at("2026-09-01T10:00:00"),
                User::new(2, "Ravi", "ravi@x.io").created_at("2026-10-02T10:00:00"),
            ],
            vec![
                Car::new(1, "Honda", "City", "Sedan"),
                Car::new(2, "Kia", "Seltos", "SUV"),
            ],
            vec![
                Booking::new(1, 1, 1)
                    .status("PAID")
                    .created_at("2026-10-05T14:00:00")
                    .period("2026-10-10", "2026-10-12"),
                Booking::new(2, 2, 2)
                    .status("BOOKED")
                    .created_at("2026-09-20T09:00:00"),
            ],
            vec![Payment::new(1, 1, 5000.0).paid_at("2026-10-05T14:10:00")],
        )
    }

    #[test]
    fn test_build_report() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let report = DashboardReport::build(&snapshot(), today);

        assert_eq!(report.stats.users, 2);
        assert_eq!(report.stats.revenue, 5000.0);
        assert_eq!(report.kpis.booking_success_rate, 50.0);
        assert_eq!(report.kpis.latest_average_duration, 2.0);
        assert_eq!(report.monthly_revenue.last().unwrap().value, 5000.0);
        assert_eq!(report.user_registrations[4].value, 1);
        assert_eq!(report.monthly_bookings[4].value, 1);
        assert_eq!(report.revenue_by_car_type.get("Sedan"), Some(&5000.0));
        assert_eq!(report.revenue_by_car_type.get("SUV"), None);
        assert_eq!(report.bookings_by_hour.0[14], 1);
        assert_eq!(report.customer_lifetime_value.len(), 1);
        assert_eq!(report.popular_cars.len(), 2);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let json = serde_json::to_value(DashboardReport::build(&snapshot(), today)).unwrap();

        assert_eq!(json["generatedFor"], "2026-10-17");
        assert_eq!(json["monthlyRevenue"].as_array().unwrap().len(), 6);
        assert_eq!(json["monthlyRevenue"][5]["month"], "Oct 2026");
        assert_eq!(json["bookingsByDayOfWeek"]["Monday"], 0);
        assert_eq!(json["carUtilization"][0]["carName"], "Honda City");
        assert_eq!(json["kpis"]["bookingsPerCar"], 1.0);
    }

    #[test]
    fn test_lookup_first_car_and_payment_win() {
        let cars = vec![Car::new(1, "A", "One", "Sedan"), Car::new(1, "B", "Two", "SUV")];
        let payments = vec![Payment::new(1, 7, 10.0), Payment::new(2, 7, 20.0)];
        let lookup = Lookup::new(&cars, &payments);

        assert_eq!(lookup.car(1).unwrap().brand, "A");
        assert_eq!(lookup.payment_for(7).unwrap().amount, 10.0);
        assert!(lookup.payment_for(8).is_none());
    }
}
