//! Terminal and CSV rendering
//!
//! Plain-text tiles and fixed-width tables for the CLI, plus CSV writers
//! for the monthly series and the car list.

use serde::Serialize;
use std::fmt;
use std::io;

use crate::analytics::DashboardReport;
use crate::models::{Car, User};

/// Format an amount the way the dashboard tiles do: grouped thousands,
/// at most two decimals, trailing zeros dropped
pub fn format_amount(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + 6);
    if amount < 0.0 && cents > 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    match frac {
        0 => {}
        f if f % 10 == 0 => out.push_str(&format!(".{}", f / 10)),
        f => out.push_str(&format!(".{:02}", f)),
    }
    out
}

fn rupees(amount: f64) -> String {
    format!("₹{}", format_amount(amount))
}

/// Full dashboard as text
pub struct DashboardText<'a> {
    report: &'a DashboardReport,
    profile: Option<&'a User>,
}

impl<'a> DashboardText<'a> {
    pub fn new(report: &'a DashboardReport, profile: Option<&'a User>) -> Self {
        Self { report, profile }
    }
}

impl fmt::Display for DashboardText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;

        writeln!(f, "Admin Profile")?;
        writeln!(f, "  Name:  {}", self.profile.map(|u| u.name.as_str()).unwrap_or("N/A"))?;
        writeln!(f, "  Email: {}", self.profile.map(|u| u.email.as_str()).unwrap_or("N/A"))?;
        writeln!(f)?;

        writeln!(f, "{:<16} {:<16} {:<16} {}", "Total Users", "Total Cars", "Total Bookings", "Total Revenue")?;
        writeln!(
            f,
            "{:<16} {:<16} {:<16} {}",
            r.stats.users,
            r.stats.cars,
            r.stats.bookings,
            rupees(r.stats.revenue)
        )?;
        writeln!(f)?;

        writeln!(f, "Performance Metrics")?;
        writeln!(f, "  Booking Success Rate:          {:.1}%", r.kpis.booking_success_rate)?;
        writeln!(
            f,
            "  Average Revenue per Booking:   {}",
            rupees(r.kpis.average_revenue_per_booking.round())
        )?;
        writeln!(f, "  Bookings per Car:              {:.1}", r.kpis.bookings_per_car)?;
        writeln!(f, "  Avg. Booking Duration (Days):  {:.1}", r.kpis.latest_average_duration)?;
        writeln!(f)?;

        writeln!(f, "Monthly Trends (generated for {})", r.generated_for)?;
        writeln!(
            f,
            "{:<10} | {:>12} | {:>8} | {:>9} | {:>8}",
            "Month", "Revenue", "Bookings", "New Users", "Avg Days"
        )?;
        writeln!(f, "{}", "-".repeat(59))?;
        for (i, revenue) in r.monthly_revenue.iter().enumerate() {
            writeln!(
                f,
                "{:<10} | {:>12} | {:>8} | {:>9} | {:>8.1}",
                revenue.month,
                format_amount(revenue.value),
                r.monthly_bookings.get(i).map(|m| m.value).unwrap_or(0),
                r.user_registrations.get(i).map(|m| m.value).unwrap_or(0),
                r.average_booking_duration.get(i).map(|m| m.value).unwrap_or(0.0),
            )?;
        }
        writeln!(f)?;

        section(f, "Bookings by Status", r.bookings_by_status.iter().map(|(k, v)| (k.clone(), v.to_string())))?;
        section(f, "Cars by Type", r.cars_by_type.iter().map(|(k, v)| (k.clone(), v.to_string())))?;
        section(
            f,
            "Revenue by Car Type",
            r.revenue_by_car_type.iter().map(|(k, v)| (k.clone(), rupees(*v))),
        )?;
        section(
            f,
            "Bookings by Day of Week",
            r.bookings_by_day_of_week.iter().map(|(day, n)| (day.to_string(), n.to_string())),
        )?;
        section(
            f,
            "Bookings by Hour",
            r.bookings_by_hour
                .iter()
                .filter(|(_, n)| *n > 0)
                .map(|(hour, n)| (format!("{}:00", hour), n.to_string())),
        )?;
        section(
            f,
            "Car Utilization",
            r.car_utilization.iter().map(|c| (c.car_name.clone(), format!("{}%", c.utilization))),
        )?;
        section(
            f,
            "Popular Cars",
            r.popular_cars.iter().map(|c| (c.car_name.clone(), c.booking_count.to_string())),
        )?;

        writeln!(f, "Top Customers by Lifetime Value")?;
        if r.customer_lifetime_value.is_empty() {
            writeln!(f, "  (none)")?;
            return Ok(());
        }
        writeln!(
            f,
            "{:<4} {:<24} {:>14} {:>9} {:>14}",
            "#", "Customer", "Total Revenue", "Bookings", "Avg/Booking"
        )?;
        writeln!(f, "{}", "-".repeat(69))?;
        for (i, customer) in r.customer_lifetime_value.iter().enumerate() {
            let average = if customer.booking_count > 0 {
                (customer.total_revenue / customer.booking_count as f64).round()
            } else {
                0.0
            };
            writeln!(
                f,
                "{:<4} {:<24} {:>14} {:>9} {:>14}",
                i + 1,
                customer.customer_name,
                rupees(customer.total_revenue),
                customer.booking_count,
                rupees(average)
            )?;
        }
        Ok(())
    }
}

fn section(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    rows: impl Iterator<Item = (String, String)>,
) -> fmt::Result {
    writeln!(f, "{}", title)?;
    let mut empty = true;
    for (key, value) in rows {
        empty = false;
        writeln!(f, "  {:<28} {}", key, value)?;
    }
    if empty {
        writeln!(f, "  (none)")?;
    }
    writeln!(f)
}

/// Car list as a fixed-width table
pub struct CarTable<'a>(pub &'a [Car]);

impl fmt::Display for CarTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No cars match the selected filters.");
        }

        writeln!(
            f,
            "{:<6} {:<14} {:<16} {:<12} {:>10} {}",
            "ID", "Brand", "Model", "Type", "Per Day", "Available"
        )?;
        writeln!(f, "{}", "-".repeat(72))?;
        for car in self.0 {
            writeln!(
                f,
                "{:<6} {:<14} {:<16} {:<12} {:>10} {}",
                car.id,
                car.brand,
                car.model,
                car.car_type,
                rupees(car.price_per_day),
                if car.available { "yes" } else { "no" }
            )?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct MonthlyRow<'a> {
    month: &'a str,
    revenue: f64,
    bookings: usize,
    new_users: usize,
    average_days: f64,
}

/// Write the four monthly series as CSV, one row per month
pub fn write_monthly_csv<W: io::Write>(report: &DashboardReport, writer: W) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    for (i, revenue) in report.monthly_revenue.iter().enumerate() {
        csv.serialize(MonthlyRow {
            month: &revenue.month,
            revenue: revenue.value,
            bookings: report.monthly_bookings.get(i).map(|m| m.value).unwrap_or(0),
            new_users: report.user_registrations.get(i).map(|m| m.value).unwrap_or(0),
            average_days: report.average_booking_duration.get(i).map(|m| m.value).unwrap_or(0.0),
        })?;
    }
    csv.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct CarRow<'a> {
    id: i64,
    brand: &'a str,
    model: &'a str,
    #[serde(rename = "type")]
    car_type: &'a str,
    price_per_day: f64,
    available: bool,
}

/// Write cars as CSV
pub fn write_cars_csv<W: io::Write>(cars: &[Car], writer: W) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    for car in cars {
        csv.serialize(CarRow {
            id: car.id,
            brand: &car.brand,
            model: &car.model,
            car_type: &car.car_type,
            price_per_day: car.price_per_day,
            available: car.available,
        })?;
    }
    csv.flush()?;
    Ok(())
}
