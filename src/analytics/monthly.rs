//! Six-month series
//!
//! Every series covers the reference month and the five before it, oldest
//! first. A record lands in a slot only when both its month and year match;
//! records without a usable timestamp are skipped.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::{Booking, Payment, User};

/// Number of calendar months in every monthly series
pub const MONTHS_SHOWN: usize = 6;

/// One calendar month of a series window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSlot {
    /// First day of the month
    first: NaiveDate,
}

impl MonthSlot {
    /// Slot `back` months before the month containing `date`
    fn months_before(date: NaiveDate, back: u32) -> Option<Self> {
        let first = date.with_day(1)?.checked_sub_months(Months::new(back))?;
        Some(Self { first })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 1-based month
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn contains(&self, at: &NaiveDateTime) -> bool {
        at.year() == self.year() && at.month() == self.month()
    }

    /// en-US short month and year, e.g. "Oct 2026"
    pub fn label(&self) -> String {
        self.first.format("%b %Y").to_string()
    }
}

/// The six slots ending with the month of `today`, oldest first
///
/// Only dates at the edge of chrono's calendar range yield fewer slots.
pub fn month_window(today: NaiveDate) -> Vec<MonthSlot> {
    (0..MONTHS_SHOWN as u32)
        .rev()
        .filter_map(|back| MonthSlot::months_before(today, back))
        .collect()
}

/// A labelled value in a monthly series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyValue<T> {
    pub month: String,
    pub value: T,
}

fn slot_of(window: &[MonthSlot], at: Option<NaiveDateTime>) -> Option<usize> {
    let at = at?;
    window.iter().position(|slot| slot.contains(&at))
}

fn label_values<T>(window: &[MonthSlot], values: Vec<T>) -> Vec<MonthlyValue<T>> {
    window
        .iter()
        .zip(values)
        .map(|(slot, value)| MonthlyValue {
            month: slot.label(),
            value,
        })
        .collect()
}

/// Sum of payment amounts by `paymentTime`
pub fn monthly_revenue(payments: &[Payment], today: NaiveDate) -> Vec<MonthlyValue<f64>> {
    let window = month_window(today);
    let mut totals = vec![0.0; window.len()];

    for payment in payments {
        if let Some(slot) = slot_of(&window, payment.paid()) {
            totals[slot] += payment.amount;
        }
    }

    label_values(&window, totals)
}

/// Count of users by `createdAt`
pub fn monthly_registrations(users: &[User], today: NaiveDate) -> Vec<MonthlyValue<usize>> {
    let window = month_window(today);
    let mut counts = vec![0usize; window.len()];

    for user in users {
        if let Some(slot) = slot_of(&window, user.registered()) {
            counts[slot] += 1;
        }
    }

    label_values(&window, counts)
}

/// Count of bookings by `createdAt`
pub fn monthly_bookings(bookings: &[Booking], today: NaiveDate) -> Vec<MonthlyValue<usize>> {
    let window = month_window(today);
    let mut counts = vec![0usize; window.len()];

    for booking in bookings {
        if let Some(slot) = slot_of(&window, booking.created()) {
            counts[slot] += 1;
        }
    }

    label_values(&window, counts)
}

/// Mean rental length in days of bookings created each month
///
/// A booking without a usable period adds nothing to the total but still
/// counts toward that month's average. Empty months are 0.
pub fn monthly_average_duration(bookings: &[Booking], today: NaiveDate) -> Vec<MonthlyValue<f64>> {
    let window = month_window(today);
    let mut totals = vec![0.0; window.len()];
    let mut counts = vec![0usize; window.len()];

    for booking in bookings {
        if let Some(slot) = slot_of(&window, booking.created()) {
            totals[slot] += booking.duration_days().unwrap_or(0.0);
            counts[slot] += 1;
        }
    }

    let averages = totals
        .into_iter()
        .zip(counts)
        .map(|(total, count)| if count > 0 { total / count as f64 } else { 0.0 })
        .collect();

    label_values(&window, averages)
}
