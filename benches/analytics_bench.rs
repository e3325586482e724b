//! Benchmarks for the dashboard aggregations
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rentify::analytics::{car_utilization, monthly_bookings, DashboardReport, Lookup};
use rentify::models::{Booking, Car, Payment, Snapshot, User};

const TYPES: [&str; 4] = ["Sedan", "SUV", "Hatchback", "MUV"];
const STATUSES: [&str; 3] = ["PAID", "BOOKED", "CANCELLED"];

fn create_snapshot(bookings: usize) -> Snapshot {
    let cars: Vec<Car> = (0..50)
        .map(|i| {
            Car::new(i, format!("Brand{}", i % 8), format!("Model{}", i), TYPES[i as usize % 4])
                .price_per_day(1500.0 + i as f64 * 100.0)
        })
        .collect();

    let users: Vec<User> = (0..200)
        .map(|i| {
            User::new(i, format!("User {}", i), format!("user{}@example.com", i))
                .created_at(format!("2026-{:02}-{:02}T10:00:00", i % 12 + 1, i % 28 + 1))
        })
        .collect();

    let bookings: Vec<Booking> = (0..bookings as i64)
        .map(|i| {
            let month = i % 12 + 1;
            let day = i % 25 + 1;
            Booking::new(i, i % 50, i % 200)
                .status(STATUSES[i as usize % 3])
                .created_at(format!("2026-{:02}-{:02}T{:02}:15:00", month, day, i % 24))
                .period(
                    format!("2026-{:02}-{:02}", month, day),
                    format!("2026-{:02}-{:02}", month, day + 3),
                )
        })
        .collect();

    let payments: Vec<Payment> = bookings
        .iter()
        .filter(|b| b.id % 3 == 0)
        .map(|b| {
            Payment::new(b.id, b.id, 4500.0)
                .paid_at(b.created_at.clone().unwrap_or_default())
        })
        .collect();

    Snapshot::new(users, cars, bookings, payments)
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");
    let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();

    for size in [100, 1000, 10000] {
        let snapshot = create_snapshot(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("build_{}", size), |b| {
            b.iter(|| DashboardReport::build(black_box(&snapshot), today))
        });

        let report = DashboardReport::build(&snapshot, today);

        group.bench_function(format!("charts_{}", size), |b| {
            b.iter(|| black_box(&report).charts())
        });
    }

    group.finish();
}

fn bench_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("series");
    let snapshot = create_snapshot(10000);
    let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();

    group.bench_function("monthly_bookings", |b| {
        b.iter(|| monthly_bookings(black_box(&snapshot.bookings), today))
    });

    group.bench_function("car_utilization", |b| {
        b.iter(|| car_utilization(black_box(&snapshot.cars), black_box(&snapshot.bookings)))
    });

    group.bench_function("lookup", |b| {
        b.iter(|| Lookup::new(black_box(&snapshot.cars), black_box(&snapshot.payments)))
    });

    group.bench_function("sanitize", |b| {
        b.iter(|| black_box(snapshot.clone()).sanitize())
    });

    group.finish();
}

criterion_group!(benches, bench_report, bench_series);
criterion_main!(benches);
