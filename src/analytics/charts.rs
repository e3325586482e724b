//! Chart-ready reshaping
//!
//! Turns a [`DashboardReport`] into `{labels, datasets}` structures that a
//! chart.js-style front end plots without further work.

use serde::Serialize;
use std::collections::BTreeMap;

use super::monthly::MonthlyValue;
use super::DashboardReport;

/// One plotted series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    /// Legend text; absent for pie/doughnut charts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
}

/// Labels plus one or more datasets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    fn single(label: Option<&str>, points: impl IntoIterator<Item = (String, f64)>) -> Self {
        let (labels, data) = points.into_iter().unzip();
        Self {
            labels,
            datasets: vec![Dataset {
                label: label.map(String::from),
                data,
            }],
        }
    }

    fn monthly(label: &str, series: &[MonthlyValue<f64>]) -> Self {
        Self::single(Some(label), series.iter().map(|m| (m.month.clone(), m.value)))
    }

    fn counts(label: Option<&str>, map: &BTreeMap<String, usize>) -> Self {
        Self::single(label, map.iter().map(|(k, v)| (k.clone(), *v as f64)))
    }
}

/// Every chart on the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub revenue: ChartData,
    pub bookings: ChartData,
    pub status: ChartData,
    pub car_types: ChartData,
    pub user_registrations: ChartData,
    pub car_utilization: ChartData,
    pub revenue_by_car_type: ChartData,
    pub bookings_by_day: ChartData,
    pub bookings_by_hour: ChartData,
    pub average_duration: ChartData,
    pub popular_cars: ChartData,
    pub customer_value: ChartData,
}

impl DashboardReport {
    /// Reshape the report into chart datasets
    pub fn charts(&self) -> DashboardCharts {
        DashboardCharts {
            revenue: ChartData::monthly("Revenue (₹)", &self.monthly_revenue),
            bookings: ChartData::single(
                Some("Bookings"),
                self.monthly_bookings
                    .iter()
                    .map(|m| (m.month.clone(), m.value as f64)),
            ),
            status: ChartData::counts(None, &self.bookings_by_status),
            car_types: ChartData::counts(None, &self.cars_by_type),
            user_registrations: ChartData::single(
                Some("New Users"),
                self.user_registrations
                    .iter()
                    .map(|m| (m.month.clone(), m.value as f64)),
            ),
            car_utilization: ChartData::single(
                Some("Utilization %"),
                self.car_utilization
                    .iter()
                    .map(|c| (c.car_name.clone(), f64::from(c.utilization))),
            ),
            revenue_by_car_type: ChartData::single(
                None,
                self.revenue_by_car_type.iter().map(|(k, v)| (k.clone(), *v)),
            ),
            bookings_by_day: ChartData::single(
                Some("Bookings"),
                self.bookings_by_day_of_week
                    .iter()
                    .map(|(day, n)| (day.to_string(), n as f64)),
            ),
            bookings_by_hour: ChartData::single(
                Some("Bookings"),
                self.bookings_by_hour
                    .iter()
                    .map(|(hour, n)| (format!("{}:00", hour), n as f64)),
            ),
            average_duration: ChartData::monthly("Average Days", &self.average_booking_duration),
            popular_cars: ChartData::single(
                Some("Bookings"),
                self.popular_cars
                    .iter()
                    .map(|c| (c.car_name.clone(), c.booking_count as f64)),
            ),
            customer_value: ChartData::single(
                Some("Revenue (₹)"),
                self.customer_lifetime_value
                    .iter()
                    .map(|c| (c.customer_name.clone(), c.total_revenue)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::analytics::DashboardReport;
    use crate::models::{Booking, Car, Payment, Snapshot};
    use chrono::NaiveDate;

    #[test]
    fn test_charts_line_up_with_report() {
        let snapshot = Snapshot {
            cars: vec![Car::new(1, "Honda", "City", "Sedan")],
            bookings: vec![Booking::new(1, 1, 1).status("PAID").created_at("2026-10-05T08:00:00")],
            payments: vec![Payment::new(1, 1, 1200.0).paid_at("2026-10-05T08:30:00")],
            ..Snapshot::default()
        };
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let charts = DashboardReport::build(&snapshot, today).charts();

        assert_eq!(charts.revenue.labels.len(), 6);
        assert_eq!(charts.revenue.datasets[0].data[5], 1200.0);
        assert_eq!(charts.revenue.datasets[0].label.as_deref(), Some("Revenue (₹)"));
        assert_eq!(charts.bookings_by_hour.labels[8], "8:00");
        assert_eq!(charts.bookings_by_hour.datasets[0].data[8], 1.0);
        assert_eq!(charts.bookings_by_day.labels[0], "Sunday");
        assert_eq!(charts.status.labels, vec!["PAID"]);
        assert!(charts.status.datasets[0].label.is_none());
        assert_eq!(charts.car_utilization.datasets[0].data, vec![10.0]);
    }
}
